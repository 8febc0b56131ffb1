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

//! "TACO": expands `CCX` into its Pauli-rotation stabiliser encoding, then
//! optimises every maximal same-qubit single-qubit run by cancellation,
//! the `T.S -> T^dg.Z` rewrite, and commuting every `H` to the run's end.

use crate::Pass;
use qcc_circuit::{Circuit, OpType, Operation};
use qcc_core::PauliOp;
use std::collections::BTreeMap;

pub struct CliffordReductionPass;

impl CliffordReductionPass {
    #[must_use]
    pub fn new() -> Self {
        CliffordReductionPass
    }
}

impl Default for CliffordReductionPass {
    fn default() -> Self {
        Self::new()
    }
}

fn is_reducible_single(ty: OpType) -> bool {
    matches!(ty, OpType::X | OpType::Y | OpType::Z | OpType::H | OpType::S | OpType::Sdg | OpType::Sx | OpType::Sxdg | OpType::T | OpType::Tdg)
}

/// `Some(true)` iff `a` immediately followed by `b` is a self- or
/// mutual-inverse pair that cancels to the identity.
fn cancels(a: OpType, b: OpType) -> bool {
    use OpType::{Sdg, Sx, Sxdg, Tdg, H, S, T, X, Y, Z};
    matches!((a, b), (X, X) | (Y, Y) | (Z, Z) | (H, H) | (S, Sdg) | (Sdg, S) | (T, Tdg) | (Tdg, T) | (Sx, Sxdg) | (Sxdg, Sx))
}

/// `T.S -> T^dg.Z` and `S.T -> T^dg.Z`: not a cancellation, but a rewrite
/// that exposes further cancellation opportunities once re-scanned.
fn pair_rewrite(a: OpType, b: OpType, qubit: usize) -> Option<Vec<Operation>> {
    match (a, b) {
        (OpType::T, OpType::S) | (OpType::S, OpType::T) => {
            Some(vec![Operation::new(OpType::Tdg, vec![qubit]), Operation::new(OpType::Z, vec![qubit])])
        }
        _ => None,
    }
}

/// One cancel+rewrite sweep over a same-qubit run, stack-based.
fn reduce_step(ops: &[Operation], qubit: usize) -> (Vec<Operation>, bool) {
    let mut stack: Vec<Operation> = Vec::new();
    let mut changed = false;
    for op in ops {
        if let Some(last) = stack.last() {
            if cancels(last.get_type(), op.get_type()) {
                stack.pop();
                changed = true;
                continue;
            }
            if let Some(replacement) = pair_rewrite(last.get_type(), op.get_type(), qubit) {
                stack.pop();
                stack.extend(replacement);
                changed = true;
                continue;
            }
        }
        stack.push(op.clone());
    }
    (stack, changed)
}

/// Conjugate of `ty` through `H` (`H.ty.H`), per the rewrite table; `None`
/// for gates the table doesn't cover, which pass through unchanged.
fn conjugate_by_h(ty: OpType) -> Option<(OpType, bool, bool)> {
    match ty {
        OpType::X => Some((OpType::Z, false, false)),
        OpType::Z => Some((OpType::X, false, false)),
        OpType::Y => Some((OpType::Y, false, false)), // global phase of -1 ignored
        OpType::S => Some((OpType::Sx, false, false)),
        OpType::Sdg => Some((OpType::Sxdg, false, false)),
        OpType::Sx => Some((OpType::Sdg, false, false)),
        OpType::Sxdg => Some((OpType::S, false, false)),
        OpType::T => Some((OpType::P4, false, true)),
        OpType::Tdg => Some((OpType::P4, true, true)),
        _ => None,
    }
}

/// Commutes every `H` in the (already cancelled/rewritten) run to the end,
/// tracking only the running parity of `H`s seen so far: a gate between
/// two (eventually-cancelling) `H`s is conjugated, one surviving at the
/// end iff the final parity is odd.
fn commute_h_to_end(ops: &[Operation], qubit: usize) -> Vec<Operation> {
    let mut out = Vec::with_capacity(ops.len());
    let mut parity = false;
    for op in ops {
        if op.get_type() == OpType::H {
            parity = !parity;
            continue;
        }
        if parity {
            if let Some((ty, dagger, x_rotation)) = conjugate_by_h(op.get_type()) {
                out.push(Operation::p_gate(ty, vec![qubit], dagger, x_rotation));
                continue;
            }
        }
        out.push(op.clone());
    }
    if parity {
        out.push(Operation::new(OpType::H, vec![qubit]));
    }
    out
}

fn optimize_run(ops: Vec<Operation>, qubit: usize) -> Vec<Operation> {
    let mut current = ops;
    loop {
        let (next, changed) = reduce_step(&current, qubit);
        current = next;
        if !changed {
            break;
        }
    }
    commute_h_to_end(&current, qubit)
}

impl Pass for CliffordReductionPass {
    fn name(&self) -> &'static str {
        "CliffordReductionPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let ops = circuit.get_operations().to_vec();
        let n_qubits = circuit.num_qubits();
        let mut changed = false;

        // Step 1: CCX -> seven T_PAULI stabiliser rows.
        let mut expanded = Vec::with_capacity(ops.len());
        for op in ops {
            if op.get_type() == OpType::Ccx {
                let q = op.get_qubits();
                for pauli in PauliOp::create_ccx_ops(q[0], q[1], q[2], n_qubits) {
                    expanded.push(Operation::pauli_rotation(OpType::TPauli, pauli));
                }
                changed = true;
            } else {
                expanded.push(op);
            }
        }

        // Step 2: optimise each maximal same-qubit single-qubit run.
        let mut out = Vec::with_capacity(expanded.len());
        let mut pending: BTreeMap<usize, Vec<Operation>> = BTreeMap::new();

        let flush_one = |out: &mut Vec<Operation>, pending: &mut BTreeMap<usize, Vec<Operation>>, q: usize| {
            if let Some(run) = pending.remove(&q) {
                if !run.is_empty() {
                    out.extend(optimize_run(run, q));
                }
            }
        };

        for op in expanded {
            if op.get_qubits().len() == 1 && is_reducible_single(op.get_type()) {
                let q = op.get_qubits()[0];
                pending.entry(q).or_default().push(op);
            } else {
                for q in op.active_qubits() {
                    flush_one(&mut out, &mut pending, q);
                }
                out.push(op);
            }
        }
        let remaining_qubits: Vec<usize> = pending.keys().copied().collect();
        for q in remaining_qubits {
            flush_one(&mut out, &mut pending, q);
        }

        if out.len() != circuit.get_operations().len() || out != *circuit.get_operations() {
            changed = true;
        }
        circuit.set_operations_list(out);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ccx_expands_to_seven_t_pauli_rows() {
        let mut c = Circuit::new();
        c.add_qreg("q", 3);
        c.add_operation(Operation::new(OpType::Ccx, vec![0, 1, 2]));
        let pass = CliffordReductionPass::new();
        assert!(pass.run(&mut c));
        assert_eq!(c.get_operations().len(), 7);
        assert!(c.get_operations().iter().all(|op| op.get_type() == OpType::TPauli));
    }

    #[test]
    fn t_s_rewrites_to_tdg_z() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::T, vec![0]));
        c.add_operation(Operation::new(OpType::S, vec![0]));
        let pass = CliffordReductionPass::new();
        pass.run(&mut c);
        let kinds: Vec<OpType> = c.get_operations().iter().map(Operation::get_type).collect();
        assert_eq!(kinds, vec![OpType::Tdg, OpType::Z]);
    }

    #[test]
    fn h_commutes_past_x_to_become_z_with_trailing_h() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::X, vec![0]));
        let pass = CliffordReductionPass::new();
        pass.run(&mut c);
        let ops = c.get_operations();
        assert_eq!(ops[0].get_type(), OpType::Z);
        assert_eq!(ops[1].get_type(), OpType::H);
    }

    #[test]
    fn even_h_count_leaves_no_trailing_h() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::H, vec![0]));
        let pass = CliffordReductionPass::new();
        pass.run(&mut c);
        assert!(!c.get_operations().iter().any(|op| op.get_type() == OpType::H));
    }
}
