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

#[derive(Debug, Clone, PartialEq)]
pub enum SchedError {
    /// Propagated from the binary instruction stream reader/writer.
    Circuit(qcc_circuit::CircuitError),
    /// The emitter returned a working set whose size did not match the
    /// compute region's capacity; always a bug in the emitter.
    WorkingSetSizeMismatch { expected: usize, got: usize },
}

impl fmt::Display for SchedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchedError::Circuit(e) => write!(f, "{e}"),
            SchedError::WorkingSetSizeMismatch { expected, got } => {
                write!(f, "working set size {got} does not match compute region capacity {expected}")
            }
        }
    }
}

impl std::error::Error for SchedError {}

impl From<qcc_circuit::CircuitError> for SchedError {
    fn from(e: qcc_circuit::CircuitError) -> Self {
        SchedError::Circuit(e)
    }
}

impl From<std::io::Error> for SchedError {
    fn from(e: std::io::Error) -> Self {
        SchedError::Circuit(qcc_circuit::CircuitError::from(e))
    }
}
