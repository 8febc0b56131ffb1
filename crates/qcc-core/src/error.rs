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

/// Errors raised by the arbitrary-precision and ring-algebra layer.
///
/// Most ring operations that can fail (`sqrt`, `inv`, `divmod` by zero)
/// signal failure through `Option`/`Result<_, ()>` at the call site; this
/// enum exists for the handful of cases that need a descriptive message
/// surfaced to a caller several layers up (e.g. a malformed pi-expression
/// string).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A pi-expression string did not match the `[sign][coeff][*]?pi[/denom]` grammar.
    InvalidPiExpr(String),
    /// A ring element that is not a unit was passed to `inv()`.
    NonUnit,
    /// A `ZRootTwo`/`DRootTwo` value has no square root in the ring.
    NoSquareRoot,
    /// A Pauli string operation was given mismatched qubit counts.
    QubitCountMismatch { expected: usize, found: usize },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::InvalidPiExpr(s) => write!(f, "invalid pi-expression: {s}"),
            CoreError::NonUnit => write!(f, "ring element is not a unit"),
            CoreError::NoSquareRoot => write!(f, "no square root exists in this ring"),
            CoreError::QubitCountMismatch { expected, found } => {
                write!(f, "expected {expected} qubits, found {found}")
            }
        }
    }
}

impl std::error::Error for CoreError {}
