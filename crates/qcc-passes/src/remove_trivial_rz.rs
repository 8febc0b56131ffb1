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

//! Drops `RZ` ops that are (near-)multiples of a standard angle, and
//! groups the rest into a canonical "distinct angles" table for
//! `SynthesizeRzPass` to consult.

use crate::{normalize_angle, Pass, ANGLE_TOLERANCE};
use qcc_circuit::{Circuit, OpType, Operation};
use std::collections::HashMap;
use std::f64::consts::PI;

/// Eliminates `RZ(theta)` where `theta` is a (near-)multiple of `pi/4`,
/// replacing it with the matching Clifford+T gate (or dropping it
/// entirely for `theta = 0`). Angles that don't match are rounded to a
/// 4-significant-digit key and recorded in `Circuit::distinct_rz_angles`.
pub struct RemoveTrivialRzPass;

/// 4-significant-digit rounding used to group near-equal angles together
/// without relying on exact floating-point equality.
fn round_key(theta: f64) -> String {
    if theta == 0.0 {
        return "0".to_string();
    }
    let magnitude = theta.abs().log10().floor() as i32;
    let decimals = (3 - magnitude).max(0) as usize;
    format!("{theta:.decimals$}")
}

impl RemoveTrivialRzPass {
    #[must_use]
    pub fn new() -> Self {
        RemoveTrivialRzPass
    }

    /// `Some(op)` if `theta` is within tolerance of a standard angle's
    /// single matching Clifford+T gate, `None` (keep RZ) otherwise.
    fn standard_gate(theta: f64, qubit: usize) -> Option<Option<Operation>> {
        let near = |target: f64| (theta - target).abs() < ANGLE_TOLERANCE;
        if near(0.0) || near(2.0 * PI) || near(-2.0 * PI) {
            Some(None)
        } else if near(PI) || near(-PI) {
            Some(Some(Operation::new(OpType::Z, vec![qubit])))
        } else if near(PI / 2.0) {
            Some(Some(Operation::new(OpType::S, vec![qubit])))
        } else if near(-PI / 2.0) {
            Some(Some(Operation::new(OpType::Sdg, vec![qubit])))
        } else if near(PI / 4.0) {
            Some(Some(Operation::new(OpType::T, vec![qubit])))
        } else if near(-PI / 4.0) {
            Some(Some(Operation::new(OpType::Tdg, vec![qubit])))
        } else {
            None
        }
    }

    /// Exact greedy decomposition into `Z^a . S^b . T^c`, `a,b,c in {0,1}`.
    fn exact_zst(theta: f64, qubit: usize) -> Option<Vec<Operation>> {
        for a in 0..=1 {
            for b in 0..=1 {
                for c in 0..=1 {
                    let candidate = (a as f64) * PI + (b as f64) * (PI / 2.0) + (c as f64) * (PI / 4.0);
                    if (normalize_angle(theta) - normalize_angle(candidate)).abs() < ANGLE_TOLERANCE {
                        let mut ops = Vec::new();
                        if a == 1 {
                            ops.push(Operation::new(OpType::Z, vec![qubit]));
                        }
                        if b == 1 {
                            ops.push(Operation::new(OpType::S, vec![qubit]));
                        }
                        if c == 1 {
                            ops.push(Operation::new(OpType::T, vec![qubit]));
                        }
                        return Some(ops);
                    }
                }
            }
        }
        None
    }
}

impl Default for RemoveTrivialRzPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemoveTrivialRzPass {
    fn name(&self) -> &'static str {
        "RemoveTrivialRzPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let ops = circuit.get_operations().to_vec();
        let mut changed = false;
        let mut new_ops = Vec::with_capacity(ops.len());
        let mut distinct_angles: Vec<f64> = Vec::new();
        let mut angle_index: HashMap<String, usize> = HashMap::new();
        let mut rz_angle_map: HashMap<usize, usize> = HashMap::new();

        for op in ops {
            if op.get_type() != OpType::Rz {
                new_ops.push(op);
                continue;
            }
            let qubit = op.get_qubits()[0];
            let theta = normalize_angle(op.get_parameters()[0]);
            if let Some(replacement) = Self::standard_gate(theta, qubit) {
                changed = true;
                if let Some(op) = replacement {
                    new_ops.push(op);
                }
                continue;
            }
            if let Some(word) = Self::exact_zst(theta, qubit) {
                changed = true;
                new_ops.extend(word);
                continue;
            }
            let key = round_key(theta);
            let idx = *angle_index.entry(key).or_insert_with(|| {
                distinct_angles.push(theta);
                distinct_angles.len() - 1
            });
            rz_angle_map.insert(new_ops.len(), idx);
            new_ops.push(op);
        }

        circuit.set_operations_list(new_ops);
        circuit.distinct_rz_angles = distinct_angles;
        circuit.rz_angle_map = rz_angle_map;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_is_dropped() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![0.0]));
        let pass = RemoveTrivialRzPass::new();
        assert!(pass.run(&mut c));
        assert!(c.get_operations().is_empty());
    }

    #[test]
    fn pi_over_four_becomes_t() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![PI / 4.0]));
        let pass = RemoveTrivialRzPass::new();
        pass.run(&mut c);
        assert_eq!(c.get_operations()[0].get_type(), OpType::T);
    }

    #[test]
    fn three_pi_over_four_decomposes_to_s_then_t() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![3.0 * PI / 4.0]));
        let pass = RemoveTrivialRzPass::new();
        pass.run(&mut c);
        let kinds: Vec<OpType> = c.get_operations().iter().map(Operation::get_type).collect();
        assert_eq!(kinds, vec![OpType::S, OpType::T]);
    }

    #[test]
    fn irrational_angle_kept_and_recorded() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![0.123_456]));
        let pass = RemoveTrivialRzPass::new();
        assert!(!pass.run(&mut c));
        assert_eq!(c.get_operations()[0].get_type(), OpType::Rz);
        assert_eq!(circuit_distinct_len(&c), 1);
    }

    fn circuit_distinct_len(c: &Circuit) -> usize {
        c.distinct_rz_angles.len()
    }
}
