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

//! Rewrites every op outside the target basis into an equivalent
//! Clifford+T sequence, using a fixed expansion table.

use crate::Pass;
use qcc_circuit::{Circuit, OpType, Operation};
use std::f64::consts::PI;

/// Expands every non-Clifford+T op (and `CCX`, unless `keep_ccx`) into a
/// fixed Clifford+T gate sequence.
pub struct DecomposePass {
    keep_ccx: bool,
}

impl DecomposePass {
    #[must_use]
    pub fn new(keep_ccx: bool) -> Self {
        DecomposePass { keep_ccx }
    }

    fn in_basis(&self, ty: OpType) -> bool {
        ty.is_clifford_t() || (self.keep_ccx && ty == OpType::Ccx)
    }

    fn expand(&self, op: &Operation, out: &mut Vec<Operation>) {
        let q = op.get_qubits();
        let p = op.get_parameters();
        match op.get_type() {
            OpType::U3 => {
                let (theta, phi, lambda) = (p[0], p[1], p[2]);
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![lambda]));
                out.push(Operation::new(OpType::Sx, vec![q[0]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![theta + PI]));
                out.push(Operation::new(OpType::Sx, vec![q[0]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![phi + 3.0 * PI]));
            }
            OpType::U2 => {
                self.expand(&Operation::with_params(OpType::U3, q.to_vec(), vec![PI / 2.0, p[0], p[1]]), out);
            }
            OpType::U1 | OpType::P => {
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![p[0]]));
            }
            OpType::U => {
                self.expand(&Operation::with_params(OpType::U3, q.to_vec(), p.to_vec()), out);
            }
            OpType::Ccx => {
                let (c0, c1, t) = (q[0], q[1], q[2]);
                out.push(Operation::new(OpType::H, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c1, t]));
                out.push(Operation::new(OpType::Tdg, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c0, t]));
                out.push(Operation::new(OpType::T, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c1, t]));
                out.push(Operation::new(OpType::T, vec![c1]));
                out.push(Operation::new(OpType::Tdg, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c0, t]));
                out.push(Operation::new(OpType::Cx, vec![c0, c1]));
                out.push(Operation::new(OpType::T, vec![c0]));
                out.push(Operation::new(OpType::Tdg, vec![c1]));
                out.push(Operation::new(OpType::Cx, vec![c0, c1]));
                out.push(Operation::new(OpType::T, vec![t]));
                out.push(Operation::new(OpType::H, vec![t]));
            }
            OpType::Cswap => {
                // Textbook Fredkin-via-Toffoli: CX(t1,t0) then CCX(c,t0,t1) then CX(t1,t0).
                let (c, t0, t1) = (q[0], q[1], q[2]);
                out.push(Operation::new(OpType::Cx, vec![t1, t0]));
                self.expand(&Operation::new(OpType::Ccx, vec![c, t0, t1]), out);
                out.push(Operation::new(OpType::Cx, vec![t1, t0]));
            }
            OpType::Rccx => {
                // "Simplified Toffoli": same wire pattern, relative-phase safe, so
                // omit the two single-qubit T/Tdg pairs on the controls.
                let (c0, c1, t) = (q[0], q[1], q[2]);
                out.push(Operation::new(OpType::H, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c1, t]));
                out.push(Operation::new(OpType::Tdg, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c0, t]));
                out.push(Operation::new(OpType::T, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c1, t]));
                out.push(Operation::new(OpType::Tdg, vec![t]));
                out.push(Operation::new(OpType::Cx, vec![c0, t]));
                out.push(Operation::new(OpType::H, vec![t]));
            }
            OpType::Swap => {
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::new(OpType::Cx, vec![q[1], q[0]]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
            }
            OpType::Rxx => {
                let theta = p[0];
                out.push(Operation::new(OpType::H, vec![q[0]]));
                out.push(Operation::new(OpType::H, vec![q[1]]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![theta]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::new(OpType::H, vec![q[0]]));
                out.push(Operation::new(OpType::H, vec![q[1]]));
            }
            OpType::Ryy => {
                let theta = p[0];
                out.push(Operation::new(OpType::Sx, vec![q[0]]));
                out.push(Operation::new(OpType::Sx, vec![q[1]]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![theta]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::new(OpType::Sxdg, vec![q[0]]));
                out.push(Operation::new(OpType::Sxdg, vec![q[1]]));
            }
            OpType::Rzz => {
                let theta = p[0];
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![theta]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
            }
            OpType::Crz => {
                let theta = p[0];
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![-theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
            }
            OpType::Crx => {
                let theta = p[0];
                out.push(Operation::with_params(OpType::U1, vec![q[1]], vec![PI / 2.0]));
                self.expand(&Operation::with_params(OpType::Crz, q.to_vec(), vec![theta]), out);
                out.push(Operation::new(OpType::H, vec![q[1]]));
                out.push(Operation::with_params(OpType::U1, vec![q[1]], vec![-PI / 2.0]));
                out.push(Operation::new(OpType::H, vec![q[1]]));
            }
            OpType::Cry => {
                let theta = p[0];
                out.push(Operation::with_params(OpType::Ry, vec![q[1]], vec![theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Ry, vec![q[1]], vec![-theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
            }
            OpType::Cp | OpType::Cu1 => {
                let theta = p[0];
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![-theta / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![theta / 2.0]));
            }
            OpType::Cu3 | OpType::Cu => {
                let (theta, phi, lambda) = (p[0], p[1], p[2]);
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![(lambda + phi) / 2.0]));
                out.push(Operation::with_params(OpType::Rz, vec![q[1]], vec![(lambda - phi) / 2.0]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                self.expand(&Operation::with_params(OpType::U3, vec![q[1]], vec![-theta / 2.0, 0.0, -(phi + lambda) / 2.0]), out);
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                self.expand(&Operation::with_params(OpType::U3, vec![q[1]], vec![theta / 2.0, phi, 0.0]), out);
            }
            OpType::Rx => {
                out.push(Operation::new(OpType::H, vec![q[0]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![p[0]]));
                out.push(Operation::new(OpType::H, vec![q[0]]));
            }
            OpType::Ry => {
                out.push(Operation::new(OpType::Sx, vec![q[0]]));
                out.push(Operation::with_params(OpType::Rz, vec![q[0]], vec![p[0]]));
                out.push(Operation::new(OpType::Sxdg, vec![q[0]]));
            }
            OpType::Ecr => {
                out.push(Operation::with_params(OpType::Rzz, q.to_vec(), vec![PI / 4.0]));
                out.push(Operation::new(OpType::X, vec![q[0]]));
            }
            OpType::Ch => {
                out.push(Operation::new(OpType::Sdg, vec![q[1]]));
                out.push(Operation::new(OpType::H, vec![q[1]]));
                out.push(Operation::new(OpType::Tdg, vec![q[1]]));
                out.push(Operation::new(OpType::Cx, vec![q[0], q[1]]));
                out.push(Operation::new(OpType::T, vec![q[1]]));
                out.push(Operation::new(OpType::H, vec![q[1]]));
                out.push(Operation::new(OpType::S, vec![q[1]]));
            }
            OpType::Cs => {
                self.expand(&Operation::with_params(OpType::Cp, q.to_vec(), vec![PI / 2.0]), out);
            }
            OpType::Csdg => {
                self.expand(&Operation::with_params(OpType::Cp, q.to_vec(), vec![-PI / 2.0]), out);
            }
            OpType::Ct => {
                self.expand(&Operation::with_params(OpType::Cp, q.to_vec(), vec![PI / 4.0]), out);
            }
            OpType::Ctdg => {
                self.expand(&Operation::with_params(OpType::Cp, q.to_vec(), vec![-PI / 4.0]), out);
            }
            OpType::Csx => {
                self.expand(&Operation::with_params(OpType::Crx, q.to_vec(), vec![PI / 2.0]), out);
            }
            other => {
                // Already in the requested basis, or not a gate this table covers
                // (e.g. MEASURE/RESET/BARRIER/Pauli-rotation ops): pass through.
                out.push(Operation::with_params(other, q.to_vec(), p.to_vec()));
            }
        }
    }
}

impl Pass for DecomposePass {
    fn name(&self) -> &'static str {
        "DecomposePass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let ops = circuit.get_operations().to_vec();
        if ops.iter().all(|op| self.in_basis(op.get_type())) {
            return false;
        }
        let mut worklist: Vec<Operation> = ops;
        // A single pass of `expand` may itself emit ops outside the basis
        // (e.g. CRZ -> RZ, or U3 -> RZ/SX which are already terminal); loop
        // to a fixed point rather than assuming one level suffices.
        loop {
            let mut changed_this_round = false;
            let mut next = Vec::with_capacity(worklist.len());
            for op in &worklist {
                if self.in_basis(op.get_type()) {
                    next.push(op.clone());
                } else {
                    changed_this_round = true;
                    self.expand(op, &mut next);
                }
            }
            worklist = next;
            if !changed_this_round {
                break;
            }
        }
        circuit.set_operations_list(worklist);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_circuit::OpType;

    #[test]
    fn already_in_basis_is_a_no_op() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        let pass = DecomposePass::new(false);
        assert!(!pass.run(&mut c));
    }

    #[test]
    fn ccx_expands_to_fifteen_gates_when_not_kept() {
        let mut c = Circuit::new();
        c.add_qreg("q", 3);
        c.add_operation(Operation::new(OpType::Ccx, vec![0, 1, 2]));
        let pass = DecomposePass::new(false);
        assert!(pass.run(&mut c));
        let ops = c.get_operations();
        assert_eq!(ops.len(), 15);
        assert!(ops.iter().all(|op| op.get_type().is_clifford_t()));
        let kinds: Vec<OpType> = ops.iter().map(Operation::get_type).collect();
        use OpType::{Cx, H, T, Tdg};
        assert_eq!(kinds, vec![H, Cx, Tdg, Cx, T, Cx, T, Tdg, Cx, Cx, T, Tdg, Cx, T, H]);
        let qubits: Vec<Vec<usize>> = ops.iter().map(|op| op.get_qubits().to_vec()).collect();
        assert_eq!(
            qubits,
            vec![
                vec![2],
                vec![1, 2],
                vec![2],
                vec![0, 2],
                vec![2],
                vec![1, 2],
                vec![1],
                vec![2],
                vec![0, 2],
                vec![0, 1],
                vec![0],
                vec![1],
                vec![0, 1],
                vec![2],
                vec![2],
            ]
        );
    }

    #[test]
    fn ccx_kept_when_flag_set() {
        let mut c = Circuit::new();
        c.add_qreg("q", 3);
        c.add_operation(Operation::new(OpType::Ccx, vec![0, 1, 2]));
        let pass = DecomposePass::new(true);
        assert!(!pass.run(&mut c));
        assert_eq!(c.get_operations().len(), 1);
    }

    #[test]
    fn swap_expands_to_three_cx() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::Swap, vec![0, 1]));
        let pass = DecomposePass::new(false);
        pass.run(&mut c);
        assert_eq!(c.get_operations().len(), 3);
        assert!(c.get_operations().iter().all(|op| op.get_type() == OpType::Cx));
    }

    #[test]
    fn u3_expands_to_rz_sx_rz_sx_rz_in_order() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::U3, vec![0], vec![0.1, 0.2, 0.3]));
        let pass = DecomposePass::new(false);
        pass.run(&mut c);
        let kinds: Vec<OpType> = c.get_operations().iter().map(Operation::get_type).collect();
        assert_eq!(kinds, vec![OpType::Rz, OpType::Sx, OpType::Rz, OpType::Sx, OpType::Rz]);
    }
}
