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

/// A lexer or parser failure, reported as `line:col: message` per the
/// toolchain's error-taxonomy policy for `ParseError`: halts compilation of
/// the current file.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub line: usize,
    pub col: usize,
    pub message: String,
}

impl ParseError {
    #[must_use]
    pub fn new(line: usize, col: usize, message: String) -> Self {
        ParseError { line, col, message }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.col, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Errors raised while lowering a parsed [`crate::ast::Program`] to a
/// `Circuit`.
#[derive(Debug, Clone, PartialEq)]
pub enum LowerError {
    /// A gate application named a gate neither built in nor declared with `gate ... { ... }`.
    UnknownGate(String),
    /// A register reference named a register never declared with `qreg`/`creg`.
    UnknownRegister(String),
    /// A construct the grammar accepts but circuit flattening doesn't support, e.g. `if`.
    UnsupportedConstruct(String),
    /// A Pauli-rotation extension statement's string failed to parse as a Pauli string.
    InvalidPauliString(String),
    Circuit(qcc_circuit::CircuitError),
}

impl fmt::Display for LowerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LowerError::UnknownGate(name) => write!(f, "unknown gate: {name}"),
            LowerError::UnknownRegister(name) => write!(f, "unknown register: {name}"),
            LowerError::UnsupportedConstruct(msg) => write!(f, "unsupported construct: {msg}"),
            LowerError::InvalidPauliString(msg) => write!(f, "invalid Pauli string: {msg}"),
            LowerError::Circuit(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LowerError {}

impl From<qcc_circuit::CircuitError> for LowerError {
    fn from(e: qcc_circuit::CircuitError) -> Self {
        LowerError::Circuit(e)
    }
}
