// Copyright 2026 The QCC Developers
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not use this file except
// in compliance with the License.You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software distributed under the License
// is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express
// or implied. See the License for the specific language governing permissions and limitations under
// the License.

use std::fmt;

/// Errors raised by the grid-problem solver and unitary decomposition.
#[derive(Debug, Clone, PartialEq)]
pub enum SynthError {
    /// The Diophantine step exhausted its millisecond budget without
    /// finding or ruling out a solution for the current candidate.
    DiophantineTimeout,
    /// No candidate in the searched scale range produced a solution; the
    /// caller should widen the search (increase the scale bound) or treat
    /// this as a hard failure for the given `(theta, epsilon)`.
    NoSolutionFound,
    /// A factor with no square root modulo the given prime was required
    /// by the `p = 7 (mod 8)` Diophantine case, which has no solution in
    /// this ring.
    NoRingSolution,
}

impl fmt::Display for SynthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SynthError::DiophantineTimeout => write!(f, "diophantine step timed out"),
            SynthError::NoSolutionFound => write!(f, "no solution found within the searched scale range"),
            SynthError::NoRingSolution => write!(f, "no solution exists in this ring for the given candidate"),
        }
    }
}

impl std::error::Error for SynthError {}
