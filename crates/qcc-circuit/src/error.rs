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

/// Errors raised by the circuit IR, its DAG, and serialization layers.
#[derive(Debug, Clone, PartialEq)]
pub enum CircuitError {
    /// `get_qubit_index`/`get_bit_index` was given a register name that was
    /// never declared with `add_qreg`/`add_creg`.
    UnknownRegister(String),
    /// `expand_gate` was given a name never registered with `define_gate`.
    UnknownGate(String),
    /// A qubit or classical-bit index in an `Operation` is `>=` the
    /// circuit's declared count. Always a caller bug, per the "halts;
    /// always a bug in caller" policy for DAG/index errors.
    IndexOutOfRange { index: usize, bound: usize },
    /// The binary instruction stream ended mid-record.
    TruncatedRecord,
    /// A binary record's opcode byte did not match any known `OpType`.
    UnknownOpcode(u8),
    /// Low-level I/O failure while reading/writing the binary stream.
    Io(String),
}

impl fmt::Display for CircuitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CircuitError::UnknownRegister(name) => write!(f, "unknown register: {name}"),
            CircuitError::UnknownGate(name) => write!(f, "unknown gate: {name}"),
            CircuitError::IndexOutOfRange { index, bound } => {
                write!(f, "index {index} out of range (bound {bound})")
            }
            CircuitError::TruncatedRecord => write!(f, "truncated instruction record"),
            CircuitError::UnknownOpcode(b) => write!(f, "unknown opcode byte: {b}"),
            CircuitError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl std::error::Error for CircuitError {}

impl From<std::io::Error> for CircuitError {
    fn from(e: std::io::Error) -> Self {
        CircuitError::Io(e.to_string())
    }
}
