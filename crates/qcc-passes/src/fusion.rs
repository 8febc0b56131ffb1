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

//! Cancels and merges adjacent same-qubit single-qubit gates, to a fixed
//! point.

use crate::{normalize_angle, Pass, ANGLE_TOLERANCE};
use qcc_circuit::{Circuit, OpType, Operation};
use std::collections::BTreeMap;

pub struct GateFusionPass;

impl GateFusionPass {
    #[must_use]
    pub fn new() -> Self {
        GateFusionPass
    }
}

impl Default for GateFusionPass {
    fn default() -> Self {
        Self::new()
    }
}

/// `None`: the pair doesn't merge and both must be flushed as-is.
/// `Some(None)`: the pair cancels to the identity.
/// `Some(Some(op))`: the pair merges into a single replacement op.
fn try_merge(first: &Operation, second: &Operation) -> Option<Option<Operation>> {
    use OpType::{Rx, Ry, Rz, Sdg, Sx, Sxdg, H, P, S, T, U1, X, Y, Z};
    let q = first.get_qubits()[0];
    match (first.get_type(), second.get_type()) {
        (X, X) | (Y, Y) | (Z, Z) | (H, H) => Some(None),
        (S, Sdg) | (Sdg, S) | (T, OpType::Tdg) | (OpType::Tdg, T) | (Sx, Sxdg) | (Sxdg, Sx) => Some(None),
        (a, b) if a == b && matches!(a, Rx | Ry | Rz | P | U1) => {
            let theta = normalize_angle(first.get_parameters()[0] + second.get_parameters()[0]);
            if theta.abs() < ANGLE_TOLERANCE {
                Some(None)
            } else {
                Some(Some(Operation::with_params(a, vec![q], vec![theta])))
            }
        }
        _ => None,
    }
}

/// One fusion sweep: returns the rewritten op list and whether anything changed.
fn fuse_once(ops: &[Operation]) -> (Vec<Operation>, bool) {
    let mut out = Vec::with_capacity(ops.len());
    let mut pending: BTreeMap<usize, Operation> = BTreeMap::new();
    let mut changed = false;

    let mut flush = |out: &mut Vec<Operation>, pending: &mut BTreeMap<usize, Operation>, qubits: &[usize]| {
        for q in qubits {
            if let Some(op) = pending.remove(q) {
                out.push(op);
            }
        }
    };

    for op in ops {
        if op.is_single_qubit_gate() {
            let q = op.get_qubits()[0];
            if let Some(prev) = pending.get(&q).cloned() {
                match try_merge(&prev, op) {
                    Some(None) => {
                        pending.remove(&q);
                        changed = true;
                    }
                    Some(Some(merged)) => {
                        pending.insert(q, merged);
                        changed = true;
                    }
                    None => {
                        out.push(prev);
                        pending.insert(q, op.clone());
                    }
                }
            } else {
                pending.insert(q, op.clone());
            }
        } else {
            flush(&mut out, &mut pending, &op.active_qubits());
            out.push(op.clone());
        }
    }
    let remaining: Vec<usize> = pending.keys().copied().collect();
    flush(&mut out, &mut pending, &remaining);
    (out, changed)
}

impl Pass for GateFusionPass {
    fn name(&self) -> &'static str {
        "GateFusionPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let mut ops = circuit.get_operations().to_vec();
        let mut any_change = false;
        loop {
            let (next, changed) = fuse_once(&ops);
            ops = next;
            if !changed {
                break;
            }
            any_change = true;
        }
        if any_change {
            circuit.set_operations_list(ops);
        }
        any_change
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_x_cancels() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::X, vec![0]));
        let pass = GateFusionPass::new();
        assert!(pass.run(&mut c));
        assert!(c.get_operations().is_empty());
    }

    #[test]
    fn t_tdg_cancels_across_nothing_in_between() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::T, vec![0]));
        c.add_operation(Operation::new(OpType::Tdg, vec![0]));
        let pass = GateFusionPass::new();
        pass.run(&mut c);
        assert!(c.get_operations().is_empty());
    }

    #[test]
    fn rz_angles_merge() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![0.5]));
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![0.25]));
        let pass = GateFusionPass::new();
        pass.run(&mut c);
        assert_eq!(c.get_operations().len(), 1);
        assert!((c.get_operations()[0].get_parameters()[0] - 0.75).abs() < 1e-9);
    }

    #[test]
    fn two_qubit_gate_breaks_the_run() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::Cx, vec![0, 1]));
        c.add_operation(Operation::new(OpType::X, vec![0]));
        let pass = GateFusionPass::new();
        assert!(!pass.run(&mut c));
        assert_eq!(c.get_operations().len(), 3);
    }

    #[test]
    fn independent_qubit_runs_survive_interleaving() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::Y, vec![1]));
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::Y, vec![1]));
        let pass = GateFusionPass::new();
        assert!(pass.run(&mut c));
        assert!(c.get_operations().is_empty());
    }
}
