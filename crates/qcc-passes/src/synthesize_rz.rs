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

//! Synthesises every remaining `RZ(theta)` into a Clifford+T gate word via
//! `gridsynth`, caching one word per distinct angle.

use crate::Pass;
use log::warn;
use qcc_circuit::{Circuit, OpType, Operation};
use std::collections::HashMap;

/// Synthesises each distinct `RZ` angle once via `gridsynth_gates`, then
/// rewrites every `RZ` op with the cached word. `epsilon_override`, when
/// set, replaces the default `|theta| * 1e-2` policy.
pub struct SynthesizeRzPass {
    epsilon_override: Option<f64>,
}

impl SynthesizeRzPass {
    #[must_use]
    pub fn new(epsilon_override: Option<f64>) -> Self {
        SynthesizeRzPass { epsilon_override }
    }

    fn synthesize(&self, theta: f64) -> Vec<char> {
        let epsilon = self.epsilon_override.unwrap_or_else(|| qcc_synth::default_epsilon(theta));
        match qcc_synth::gridsynth_gates(theta, epsilon) {
            Ok(word) => word,
            Err(err) => {
                warn!("gridsynth failed for theta={theta}: {err}; emitting identity");
                Vec::new()
            }
        }
    }

    fn word_to_ops(word: &[char], qubit: usize) -> Vec<Operation> {
        word.iter()
            .filter_map(|&g| {
                let ty = match g {
                    'H' => Some(OpType::H),
                    'S' => Some(OpType::S),
                    'T' => Some(OpType::T),
                    'X' => Some(OpType::X),
                    'Y' => Some(OpType::Y),
                    'Z' => Some(OpType::Z),
                    // `W` carries global phase only and is dropped.
                    'W' => None,
                    _ => None,
                };
                ty.map(|t| Operation::new(t, vec![qubit]))
            })
            .collect()
    }
}

impl Pass for SynthesizeRzPass {
    fn name(&self) -> &'static str {
        "SynthesizeRzPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        if circuit.distinct_rz_angles.is_empty() {
            let ops = circuit.get_operations().to_vec();
            let mut distinct: Vec<f64> = Vec::new();
            let mut angle_index: HashMap<u64, usize> = HashMap::new();
            let mut rz_angle_map: HashMap<usize, usize> = HashMap::new();
            for (i, op) in ops.iter().enumerate() {
                if op.get_type() == OpType::Rz {
                    let theta = op.get_parameters()[0];
                    let key = theta.to_bits();
                    let idx = *angle_index.entry(key).or_insert_with(|| {
                        distinct.push(theta);
                        distinct.len() - 1
                    });
                    rz_angle_map.insert(i, idx);
                }
            }
            circuit.distinct_rz_angles = distinct;
            circuit.rz_angle_map = rz_angle_map;
        }

        if circuit.distinct_rz_angles.is_empty() {
            return false;
        }

        let words: Vec<Vec<char>> = circuit.distinct_rz_angles.iter().map(|&theta| self.synthesize(theta)).collect();

        let mut changed = false;
        let mut new_ops = Vec::new();
        for (i, op) in circuit.get_operations().iter().enumerate() {
            if op.get_type() != OpType::Rz {
                new_ops.push(op.clone());
                continue;
            }
            let qubit = op.get_qubits()[0];
            let idx = circuit.rz_angle_map.get(&i).copied().unwrap_or_else(|| {
                circuit.distinct_rz_angles.iter().position(|&a| a == op.get_parameters()[0]).unwrap_or(0)
            });
            new_ops.extend(Self::word_to_ops(&words[idx], qubit));
            changed = true;
        }
        circuit.set_operations_list(new_ops);
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_rz_ops_is_a_no_op() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        let pass = SynthesizeRzPass::new(None);
        assert!(!pass.run(&mut c));
    }

    #[test]
    fn rz_is_replaced_with_clifford_t_word() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::with_params(OpType::Rz, vec![0], vec![std::f64::consts::FRAC_PI_3]));
        let pass = SynthesizeRzPass::new(Some(0.2));
        assert!(pass.run(&mut c));
        assert!(c.get_operations().iter().all(|op| op.get_type().is_clifford_t() && op.get_type() != OpType::Rz));
    }
}
