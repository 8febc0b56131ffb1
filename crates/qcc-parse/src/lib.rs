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

//! OpenQASM 2.0 subset lexer, recursive-descent parser, and AST-to-`Circuit`
//! lowering, plus the Pauli-rotation extension statements
//! (`t_pauli`/`s_pauli`/`z_pauli`/`m_pauli`).

pub mod ast;
pub mod error;
pub mod lexer;
pub mod lower;
pub mod parser;

pub use ast::{Expr, GateCall, GateDecl, Program, Statement};
pub use error::{LowerError, ParseError};
pub use lower::ast_to_circuit;
pub use parser::parse;
use qcc_circuit::Circuit;

/// Parses and lowers `source` to a `Circuit` in one call.
pub fn compile(source: &str) -> Result<Circuit, CompileError> {
    let program = parse(source)?;
    Ok(ast_to_circuit(&program)?)
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Parse(ParseError),
    Lower(LowerError),
}

impl std::fmt::Display for CompileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "{e}"),
            CompileError::Lower(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<LowerError> for CompileError {
    fn from(e: LowerError) -> Self {
        CompileError::Lower(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compiles_source_straight_to_a_circuit() {
        let circuit = compile("qreg q[2];\nh q[0];\ncx q[0],q[1];\n").unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.get_operations().len(), 2);
    }

    #[test]
    fn surfaces_parse_errors_through_compile_error() {
        let err = compile("qreg q[2]\n").unwrap_err();
        assert!(matches!(err, CompileError::Parse(_)));
    }
}
