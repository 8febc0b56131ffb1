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

//! T-fusion: merges commuting `T_PAULI` rows layer by layer, promoting
//! pairs through `S`/`Z` rank and absorbing the promoted rows into the
//! measurement basis. Operates only on circuits that are entirely
//! `T_PAULI`/`M_PAULI` (i.e. already converted to Pauli-based computation).

use crate::Pass;
use qcc_circuit::{Circuit, OpType, Operation};
use qcc_core::{HTab, PauliOp, RowType};

/// How a fresh `T_PAULI` row picks which commuting layer to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayeringStrategy {
    /// Extend the most recently started layer while it still commutes
    /// with the new row; start a new layer otherwise.
    Greedy,
    /// Scan layers newest-to-oldest; join the layer just after the first
    /// one the row doesn't commute with, or the oldest layer if it
    /// commutes with everything.
    EarliestFit,
}

pub struct TfusePass {
    strategy: LayeringStrategy,
}

impl TfusePass {
    #[must_use]
    pub fn new(strategy: LayeringStrategy) -> Self {
        TfusePass { strategy }
    }

    fn layer(&self, rows_newest_first: &[PauliOp]) -> Vec<Vec<PauliOp>> {
        match self.strategy {
            LayeringStrategy::Greedy => layer_greedy(rows_newest_first),
            LayeringStrategy::EarliestFit => layer_earliest_fit(rows_newest_first),
        }
    }
}

fn commutes_with_all(layer: &[PauliOp], row: &PauliOp) -> bool {
    layer.iter().all(|r| r.commutes_with(row))
}

fn layer_greedy(rows_newest_first: &[PauliOp]) -> Vec<Vec<PauliOp>> {
    let mut layers: Vec<Vec<PauliOp>> = Vec::new();
    for row in rows_newest_first {
        match layers.last() {
            Some(last) if commutes_with_all(last, row) => layers.last_mut().unwrap().push(row.clone()),
            _ => layers.push(vec![row.clone()]),
        }
    }
    layers
}

fn layer_earliest_fit(rows_newest_first: &[PauliOp]) -> Vec<Vec<PauliOp>> {
    let mut layers: Vec<Vec<PauliOp>> = Vec::new();
    for row in rows_newest_first {
        if layers.is_empty() {
            layers.push(vec![row.clone()]);
            continue;
        }
        let first_conflict = layers.iter().position(|l| !commutes_with_all(l, row));
        match first_conflict {
            Some(i) if i + 1 < layers.len() => layers[i + 1].push(row.clone()),
            Some(_) => layers.push(vec![row.clone()]),
            None => {
                let last = layers.len() - 1;
                layers[last].push(row.clone());
            }
        }
    }
    layers
}

/// Front-multiplies every row in `measurement` by `p`, matching
/// `HTab::front_multiply`'s sign rule, applied directly to a flat
/// measurement-basis list rather than a tagged-row tableau.
fn front_multiply_measurement(measurement: &mut [PauliOp], p: &PauliOp) {
    for row in measurement.iter_mut() {
        let (g, product) = p.g_function(row);
        if g % 2 != 0 {
            let half_odd = g.div_euclid(2).rem_euclid(2) != 0;
            let sign = row.negative() ^ p.negative() ^ half_odd;
            let mut updated = product;
            updated.set_negative(sign);
            *row = updated;
        }
    }
}

impl Pass for TfusePass {
    fn name(&self) -> &'static str {
        "TfusePass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let mut t_rows: Vec<PauliOp> = Vec::new();
        let mut measurement: Vec<PauliOp> = Vec::new();
        for op in circuit.get_operations() {
            match op.get_type() {
                OpType::TPauli => t_rows.push(op.get_pauli().cloned().expect("T_PAULI op must carry a Pauli")),
                OpType::MPauli => measurement.push(op.get_pauli().cloned().expect("M_PAULI op must carry a Pauli")),
                _ => {}
            }
        }
        let original_count = t_rows.len();

        loop {
            let newest_first: Vec<PauliOp> = t_rows.iter().rev().cloned().collect();
            let layers = self.layer(&newest_first);

            let mut surviving_newest_first: Vec<PauliOp> = Vec::new();
            let mut promoted_any = false;
            for layer in &layers {
                let mut htab = HTab::new();
                for row in layer {
                    htab.push(row.clone(), RowType::T);
                }
                htab.reduce();
                for (op, kind) in htab.valid_rows() {
                    match kind {
                        RowType::T => surviving_newest_first.push(op),
                        RowType::S | RowType::Z => {
                            front_multiply_measurement(&mut measurement, &op);
                            promoted_any = true;
                        }
                    }
                }
            }
            t_rows = surviving_newest_first.into_iter().rev().collect();
            if !promoted_any {
                break;
            }
        }

        let mut new_ops: Vec<Operation> = t_rows.into_iter().map(|p| Operation::pauli_rotation(OpType::TPauli, p)).collect();
        new_ops.extend(measurement.into_iter().map(|p| Operation::pauli_rotation(OpType::MPauli, p)));
        let changed = new_ops.len() != circuit.get_operations().len() || original_count != new_ops.iter().filter(|op| op.get_type() == OpType::TPauli).count();
        circuit.set_operations_list(new_ops);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_t_rows_fuse_and_vanish_from_the_t_list() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::pauli_rotation(OpType::TPauli, PauliOp::parse("+Z").unwrap()));
        c.add_operation(Operation::pauli_rotation(OpType::TPauli, PauliOp::parse("+Z").unwrap()));
        c.add_operation(Operation::pauli_rotation(OpType::MPauli, PauliOp::parse("+Z").unwrap()));
        let pass = TfusePass::new(LayeringStrategy::Greedy);
        assert!(pass.run(&mut c));
        let t_count = c.get_operations().iter().filter(|op| op.get_type() == OpType::TPauli).count();
        assert_eq!(t_count, 0);
    }

    #[test]
    fn non_commuting_rows_stay_in_separate_layers_and_survive() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::pauli_rotation(OpType::TPauli, PauliOp::parse("+X").unwrap()));
        c.add_operation(Operation::pauli_rotation(OpType::TPauli, PauliOp::parse("+Z").unwrap()));
        c.add_operation(Operation::pauli_rotation(OpType::MPauli, PauliOp::parse("+Z").unwrap()));
        let pass = TfusePass::new(LayeringStrategy::Greedy);
        assert!(!pass.run(&mut c));
        let t_count = c.get_operations().iter().filter(|op| op.get_type() == OpType::TPauli).count();
        assert_eq!(t_count, 2);
    }

    #[test]
    fn double_fusion_reaching_z_rank_is_absorbed_into_measurement() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        for _ in 0..4 {
            c.add_operation(Operation::pauli_rotation(OpType::TPauli, PauliOp::parse("+Z").unwrap()));
        }
        c.add_operation(Operation::pauli_rotation(OpType::MPauli, PauliOp::parse("+Z").unwrap()));
        let pass = TfusePass::new(LayeringStrategy::EarliestFit);
        assert!(pass.run(&mut c));
        let t_count = c.get_operations().iter().filter(|op| op.get_type() == OpType::TPauli).count();
        assert_eq!(t_count, 0);
    }
}
