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

//! Converts a Clifford+T circuit into Pauli-based computation (PBC): a
//! sequence of Pauli rotations followed by Pauli measurements, via a
//! single forward scan that conjugates every row through a `VTab` in
//! circuit order, so the final measurement rows land on the actual
//! stabilizers of the circuit's output state.

use crate::Pass;
use log::debug;
use qcc_circuit::{Circuit, OpType, Operation};
use qcc_core::tableau::CliffordGate;
use qcc_core::{PauliOp, VTab};

/// Runs the PBC conversion. `keep_cx` re-expresses each `CX` as a
/// Pauli-rotation row plus two single-qubit Clifford corrections instead
/// of feeding it to the tableau as a generator, trading two-qubit gate
/// count for rotation count.
pub struct PbcPass {
    keep_cx: bool,
}

impl PbcPass {
    #[must_use]
    pub fn new(keep_cx: bool) -> Self {
        PbcPass { keep_cx }
    }
}

impl Pass for PbcPass {
    fn name(&self) -> &'static str {
        "PbcPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let n = circuit.num_qubits();
        let ops = circuit.get_operations().to_vec();
        let mut vtab = VTab::new(n, ops.len());

        for op in ops.iter() {
            let q = op.get_qubits();
            match op.get_type() {
                OpType::H => vtab.apply_gate(CliffordGate::H, q[0], None),
                OpType::S => vtab.apply_gate(CliffordGate::S, q[0], None),
                OpType::Sdg => vtab.apply_gate(CliffordGate::Sdg, q[0], None),
                OpType::Sx => vtab.apply_gate(CliffordGate::Sx, q[0], None),
                OpType::Sxdg => vtab.apply_gate(CliffordGate::Sxdg, q[0], None),
                OpType::X => vtab.apply_gate(CliffordGate::X, q[0], None),
                OpType::Y => vtab.apply_gate(CliffordGate::Y, q[0], None),
                OpType::Z => vtab.apply_gate(CliffordGate::Z, q[0], None),
                OpType::Cx if self.keep_cx => {
                    let mut row = PauliOp::identity(n);
                    row.add_z(q[0]);
                    row.add_x(q[1]);
                    vtab.add_stab(&row);
                    vtab.apply_gate(CliffordGate::Sdg, q[0], None);
                    vtab.apply_gate(CliffordGate::Sxdg, q[1], None);
                }
                OpType::Cx => vtab.apply_gate(CliffordGate::Cx, q[0], Some(q[1])),
                OpType::T => vtab.add_t_stab(q[0], false),
                OpType::Tdg => vtab.add_t_stab(q[0], true),
                OpType::TPauli | OpType::SPauli => {
                    if let Some(p) = op.get_pauli() {
                        vtab.add_stab(p);
                    }
                }
                OpType::Ccx => {
                    for row in PauliOp::create_ccx_ops(q[0], q[1], q[2], n) {
                        vtab.add_stab(&row);
                    }
                }
                OpType::Measure | OpType::Reset | OpType::Barrier => {}
                other => debug!("PbcPass: skipping non-Clifford+T op {other:?}, run DecomposePass/CliffordReductionPass first"),
            }
        }

        let rows = vtab.get_pauli_ops();
        let (measurement_rows, rotation_rows) = rows.split_at(n);
        let mut new_ops: Vec<Operation> = rotation_rows.iter().cloned().map(|p| Operation::pauli_rotation(OpType::TPauli, p)).collect();
        new_ops.extend(measurement_rows.iter().cloned().map(|p| Operation::pauli_rotation(OpType::MPauli, p)));

        circuit.set_operations_list(new_ops);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_circuit_yields_z_measurements() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        let pass = PbcPass::new(false);
        pass.run(&mut c);
        let ops = c.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.get_type() == OpType::MPauli));
    }

    #[test]
    fn single_t_gate_becomes_one_rotation_plus_measurements() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::T, vec![0]));
        let pass = PbcPass::new(false);
        pass.run(&mut c);
        let ops = c.get_operations();
        assert_eq!(ops.len(), 2);
        assert_eq!(ops[0].get_type(), OpType::TPauli);
        assert_eq!(ops[1].get_type(), OpType::MPauli);
        assert_eq!(ops[0].get_pauli().unwrap().to_pauli_string(), "+Z");
    }

    #[test]
    fn bell_preparation_yields_xx_zz_measurements() {
        // h q[0]; cx q[0],q[1] prepares a Bell pair; the output state's
        // stabilizers are +XX and +ZZ, so PbcPass must fully absorb the
        // circuit into those two M_PAULI rows with no surviving rotations.
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::Cx, vec![0, 1]));
        let pass = PbcPass::new(false);
        pass.run(&mut c);
        let ops = c.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(ops.iter().all(|op| op.get_type() == OpType::MPauli));
        let mut paulis: Vec<String> = ops.iter().map(|op| op.get_pauli().unwrap().to_pauli_string()).collect();
        paulis.sort();
        assert_eq!(paulis, vec!["+XX".to_string(), "+ZZ".to_string()]);
    }

    #[test]
    fn ccx_expands_into_seven_rotation_rows() {
        let mut c = Circuit::new();
        c.add_qreg("q", 3);
        c.add_operation(Operation::new(OpType::Ccx, vec![0, 1, 2]));
        let pass = PbcPass::new(false);
        pass.run(&mut c);
        let ops = c.get_operations();
        let rotations = ops.iter().filter(|op| op.get_type() == OpType::TPauli).count();
        let measurements = ops.iter().filter(|op| op.get_type() == OpType::MPauli).count();
        assert_eq!(rotations, 7);
        assert_eq!(measurements, 3);
    }
}
