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

//! AST to `Circuit` lowering: resolves register references, expands
//! user-defined gate calls by substitution (not `Circuit::expand_gate`,
//! which assumes a single-qubit-per-formal-argument body; a `gate ... { }`
//! body here can be invoked with whole-register arguments applied
//! element-wise, per the external grammar), and rejects `if` per the
//! "parsed, not semantically supported" policy.

use crate::ast::{Expr, GateCall, GateDecl, Program, Statement};
use crate::error::LowerError;
use qcc_circuit::{Circuit, OpType, Operation};
use std::collections::HashMap;

struct Lowerer {
    circuit: Circuit,
    gate_defs: HashMap<String, GateDecl>,
    qubit_bindings: Vec<HashMap<String, Vec<usize>>>,
}

impl Lowerer {
    fn new() -> Self {
        Lowerer { circuit: Circuit::new(), gate_defs: HashMap::new(), qubit_bindings: Vec::new() }
    }

    fn resolve_qubit_index(&self, reg: &str, local_index: Option<i64>) -> Result<Vec<usize>, LowerError> {
        for scope in self.qubit_bindings.iter().rev() {
            if let Some(indices) = scope.get(reg) {
                return Ok(indices.clone());
            }
        }
        match local_index {
            Some(idx) => Ok(vec![self.circuit.get_qubit_index(reg, idx as usize)?]),
            None => {
                let size = self.circuit.get_qubit_reg_size(reg)?;
                (0..size).map(|i| self.circuit.get_qubit_index(reg, i).map_err(LowerError::from)).collect()
            }
        }
    }

    fn process_qubit_expr(&self, expr: &Expr) -> Result<Vec<usize>, LowerError> {
        match expr {
            Expr::Index(name, index) => {
                let local_index = index.evaluate() as i64;
                self.resolve_qubit_index(name, Some(local_index))
            }
            Expr::Variable(name) => {
                for scope in self.qubit_bindings.iter().rev() {
                    if let Some(indices) = scope.get(name) {
                        return Ok(indices.clone());
                    }
                }
                self.resolve_qubit_index(name, None)
            }
            other => Err(LowerError::UnknownRegister(format!("{other:?} is not a valid qubit reference"))),
        }
    }

    fn process_bit_expr(&self, expr: &Expr) -> Result<Vec<usize>, LowerError> {
        match expr {
            Expr::Index(name, index) => {
                let local_index = index.evaluate() as usize;
                Ok(vec![self.circuit.get_bit_index(name, local_index)?])
            }
            Expr::Variable(name) => {
                let size = self.circuit.get_bit_reg_size(name)?;
                (0..size).map(|i| self.circuit.get_bit_index(name, i).map_err(LowerError::from)).collect()
            }
            other => Err(LowerError::UnknownRegister(format!("{other:?} is not a valid bit reference"))),
        }
    }

    fn process_builtin_gate(&mut self, call: &GateCall) -> Result<(), LowerError> {
        let name = call.name.to_ascii_lowercase();
        let (ty, dagger, x_rotation) = gate_name_to_op(&name).ok_or_else(|| LowerError::UnknownGate(name.clone()))?;

        let qubit_indices: Vec<Vec<usize>> =
            call.qubits.iter().map(|q| self.process_qubit_expr(q)).collect::<Result<_, _>>()?;
        let max_reg_size = qubit_indices.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let params: Vec<f64> = call.params.iter().map(Expr::evaluate).collect();

        for i in 0..max_reg_size {
            let sub_qubits: Vec<usize> = qubit_indices
                .iter()
                .map(|indices| if indices.len() > 1 { indices[i] } else { indices[0] })
                .collect();
            let op = if dagger || x_rotation {
                Operation::p_gate(ty, sub_qubits, dagger, x_rotation)
            } else if params.is_empty() {
                Operation::new(ty, sub_qubits)
            } else {
                Operation::with_params(ty, sub_qubits, params.clone())
            };
            self.circuit.add_operation(op);
        }
        Ok(())
    }

    fn process_user_defined_gate(&mut self, name: &str, call: &GateCall) -> Result<(), LowerError> {
        let def = self.gate_defs.get(name).cloned().ok_or_else(|| LowerError::UnknownGate(name.to_string()))?;

        let qubit_indices: Vec<Vec<usize>> =
            call.qubits.iter().map(|q| self.process_qubit_expr(q)).collect::<Result<_, _>>()?;
        let mut bindings = HashMap::new();
        for (formal, actual) in def.qubits.iter().zip(qubit_indices) {
            bindings.insert(formal.clone(), actual);
        }
        self.qubit_bindings.push(bindings);

        let body = def.body.clone();
        for stmt in &body {
            self.process_stmt(stmt)?;
        }

        self.qubit_bindings.pop();
        Ok(())
    }

    fn process_gate_stmt(&mut self, call: &GateCall) -> Result<(), LowerError> {
        let name = call.name.to_ascii_lowercase();
        if gate_name_to_op(&name).is_some() {
            self.process_builtin_gate(call)
        } else {
            self.process_user_defined_gate(&name, call)
        }
    }

    fn process_measure_stmt(&mut self, qubit: &Expr, bit: &Expr) -> Result<(), LowerError> {
        let qubit_indices = self.process_qubit_expr(qubit)?;
        let bit_indices = self.process_bit_expr(bit)?;
        let count = qubit_indices.len().max(bit_indices.len());
        for i in 0..count {
            let q = if qubit_indices.len() > 1 { qubit_indices[i] } else { qubit_indices[0] };
            let b = if bit_indices.len() > 1 { bit_indices[i] } else { bit_indices[0] };
            self.circuit.add_operation(Operation::with_bits(OpType::Measure, vec![q], vec![b]));
        }
        Ok(())
    }

    fn process_reset_stmt(&mut self, qubit: &Expr) -> Result<(), LowerError> {
        for q in self.process_qubit_expr(qubit)? {
            self.circuit.add_operation(Operation::new(OpType::Reset, vec![q]));
        }
        Ok(())
    }

    fn process_barrier_stmt(&mut self, qubits: &[Expr]) -> Result<(), LowerError> {
        let mut indices = Vec::new();
        for q in qubits {
            indices.extend(self.process_qubit_expr(q)?);
        }
        self.circuit.add_operation(Operation::new(OpType::Barrier, indices));
        Ok(())
    }

    fn process_pauli_stmt(&mut self, gate_name: &str, pauli_string: &str) -> Result<(), LowerError> {
        let ty = match gate_name {
            "t_pauli" => OpType::TPauli,
            "s_pauli" => OpType::SPauli,
            "z_pauli" => OpType::ZPauli,
            "m_pauli" => OpType::MPauli,
            other => return Err(LowerError::UnknownGate(other.to_string())),
        };
        let pauli = qcc_core::PauliOp::parse(pauli_string).map_err(|e| LowerError::InvalidPauliString(e.to_string()))?;
        self.circuit.add_operation(Operation::pauli_rotation(ty, pauli));
        Ok(())
    }

    fn process_stmt(&mut self, stmt: &Statement) -> Result<(), LowerError> {
        match stmt {
            Statement::Version(_) | Statement::Include(_) => Ok(()),
            Statement::QReg { name, size } => {
                self.circuit.add_qreg(name, *size);
                Ok(())
            }
            Statement::CReg { name, size } => {
                self.circuit.add_creg(name, *size);
                Ok(())
            }
            Statement::Gate(call) => self.process_gate_stmt(call),
            Statement::Measure { qubit, bit } => self.process_measure_stmt(qubit, bit),
            Statement::Reset(qubit) => self.process_reset_stmt(qubit),
            Statement::Barrier(qubits) => self.process_barrier_stmt(qubits),
            Statement::Pauli { gate_name, pauli_string } => self.process_pauli_stmt(gate_name, pauli_string),
            Statement::GateDecl(decl) => {
                self.gate_defs.insert(decl.name.to_ascii_lowercase(), decl.clone());
                Ok(())
            }
            Statement::Block(statements) => {
                for s in statements {
                    self.process_stmt(s)?;
                }
                Ok(())
            }
            Statement::If { creg, .. } => Err(LowerError::UnsupportedConstruct(format!(
                "conditional on creg '{creg}' is parsed but not semantically supported"
            ))),
        }
    }
}

/// Maps a lowercased QASM gate-call name to `(OpType, dagger, x_rotation)`,
/// the inverse of [`qcc_circuit::OpType::name`]. `t_pauli`/`s_pauli`/
/// `z_pauli`/`m_pauli` aren't included: they carry a `PauliOp` rather than
/// a qubit list and are handled by `process_pauli_stmt` instead.
fn gate_name_to_op(name: &str) -> Option<(OpType, bool, bool)> {
    Some(match name {
        "x" => (OpType::X, false, false),
        "y" => (OpType::Y, false, false),
        "z" => (OpType::Z, false, false),
        "h" => (OpType::H, false, false),
        "s" => (OpType::S, false, false),
        "sdg" => (OpType::Sdg, false, false),
        "sx" => (OpType::Sx, false, false),
        "sxdg" => (OpType::Sxdg, false, false),
        "id" => (OpType::Id, false, false),
        "t" => (OpType::T, false, false),
        "tdg" => (OpType::Tdg, false, false),
        "p4" => (OpType::P4, false, false),
        "p4dg" => (OpType::P4, true, false),
        "p8" => (OpType::P8, false, false),
        "p8dg" => (OpType::P8, true, false),
        "p16" => (OpType::P16, false, false),
        "p16dg" => (OpType::P16, true, false),
        "rxp4" => (OpType::P4, false, true),
        "rxp4dg" => (OpType::P4, true, true),
        "rx" => (OpType::Rx, false, false),
        "ry" => (OpType::Ry, false, false),
        "rz" => (OpType::Rz, false, false),
        "p" => (OpType::P, false, false),
        "u" => (OpType::U, false, false),
        "u1" => (OpType::U1, false, false),
        "u2" => (OpType::U2, false, false),
        "u3" => (OpType::U3, false, false),
        "cx" => (OpType::Cx, false, false),
        "cy" => (OpType::Cy, false, false),
        "cz" => (OpType::Cz, false, false),
        "ch" => (OpType::Ch, false, false),
        "cs" => (OpType::Cs, false, false),
        "csdg" => (OpType::Csdg, false, false),
        "ct" => (OpType::Ct, false, false),
        "ctdg" => (OpType::Ctdg, false, false),
        "csx" => (OpType::Csx, false, false),
        "swap" => (OpType::Swap, false, false),
        "ecr" => (OpType::Ecr, false, false),
        "crx" => (OpType::Crx, false, false),
        "cry" => (OpType::Cry, false, false),
        "crz" => (OpType::Crz, false, false),
        "cp" => (OpType::Cp, false, false),
        "cu" => (OpType::Cu, false, false),
        "cu1" => (OpType::Cu1, false, false),
        "cu3" => (OpType::Cu3, false, false),
        "rxx" => (OpType::Rxx, false, false),
        "ryy" => (OpType::Ryy, false, false),
        "rzz" => (OpType::Rzz, false, false),
        "ccx" => (OpType::Ccx, false, false),
        "cswap" => (OpType::Cswap, false, false),
        "rccx" => (OpType::Rccx, false, false),
        _ => return None,
    })
}

/// Lowers a parsed program into a `Circuit`, expanding user-defined gates
/// by substitution and resolving every register reference.
pub fn ast_to_circuit(program: &Program) -> Result<Circuit, LowerError> {
    let mut lowerer = Lowerer::new();
    for stmt in &program.statements {
        lowerer.process_stmt(stmt)?;
    }
    Ok(lowerer.circuit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn lowers_bell_circuit() {
        let program = parse("OPENQASM 2.0;\nqreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\nmeasure q[0] -> c[0];\nmeasure q[1] -> c[1];\n").unwrap();
        let circuit = ast_to_circuit(&program).unwrap();
        assert_eq!(circuit.num_qubits(), 2);
        assert_eq!(circuit.get_operations().len(), 4);
    }

    #[test]
    fn expands_user_defined_gate_over_whole_registers() {
        let src = "gate bell a,b { h a; cx a,b; }\nqreg q[4];\nbell q[0],q[1];\n";
        let program = parse(src).unwrap();
        let circuit = ast_to_circuit(&program).unwrap();
        assert_eq!(circuit.get_operations().len(), 2);
        assert_eq!(circuit.get_operations()[0].get_qubits(), &[0]);
        assert_eq!(circuit.get_operations()[1].get_qubits(), &[0, 1]);
    }

    #[test]
    fn rejects_unknown_gate() {
        let program = parse("qreg q[1];\nbogus q[0];\n").unwrap();
        assert!(matches!(ast_to_circuit(&program), Err(LowerError::UnknownGate(_))));
    }

    #[test]
    fn rejects_if_statement() {
        let program = parse("creg c[1];\nif (c==1) x q[0];\n").unwrap();
        assert!(matches!(ast_to_circuit(&program), Err(LowerError::UnsupportedConstruct(_))));
    }

    #[test]
    fn lowers_pauli_rotation_extension() {
        let program = parse("t_pauli +XYZI;\n").unwrap();
        let circuit = ast_to_circuit(&program).unwrap();
        assert_eq!(circuit.get_operations()[0].get_type(), OpType::TPauli);
    }

    #[test]
    fn barrier_flattens_whole_register_arguments() {
        let program = parse("qreg q[3];\nbarrier q;\n").unwrap();
        let circuit = ast_to_circuit(&program).unwrap();
        assert_eq!(circuit.get_operations()[0].get_qubits(), &[0, 1, 2]);
    }
}
