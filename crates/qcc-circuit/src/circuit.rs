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

//! [`Circuit`]: a sequential operation list with register maps and
//! user-defined gate bodies.

use crate::error::CircuitError;
use crate::operation::{OpType, Operation};
use std::collections::HashMap;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy)]
struct RegSpan {
    start: usize,
    size: usize,
}

/// A sequential list of [`Operation`]s plus register maps and user-defined
/// gate bodies. Kept free of any dependency-graph bookkeeping; see
/// [`crate::DAGCircuit`] for that layer.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    num_qubits: usize,
    num_bits: usize,
    qregs: HashMap<String, RegSpan>,
    cregs: HashMap<String, RegSpan>,
    gate_defs: HashMap<String, Vec<Operation>>,
    operations: Vec<Operation>,
    is_clifford_t: bool,
    /// Populated by `RemoveTrivialRzPass`/`SynthesizeRzPass`: the distinct
    /// `RZ` angles seen so far, rounded to a canonical string, and a map
    /// from operation index to the index into this list.
    pub distinct_rz_angles: Vec<f64>,
    pub rz_angle_map: HashMap<usize, usize>,
}

impl Circuit {
    #[must_use]
    pub fn new() -> Self {
        Circuit { is_clifford_t: true, ..Default::default() }
    }

    pub fn add_qreg(&mut self, name: &str, size: usize) {
        let start = self.num_qubits;
        self.qregs.insert(name.to_string(), RegSpan { start, size });
        self.num_qubits += size;
    }

    pub fn add_creg(&mut self, name: &str, size: usize) {
        let start = self.num_bits;
        self.cregs.insert(name.to_string(), RegSpan { start, size });
        self.num_bits += size;
    }

    #[must_use]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    #[must_use]
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    pub fn get_qubit_index(&self, reg: &str, local_idx: usize) -> Result<usize, CircuitError> {
        let span = self.qregs.get(reg).ok_or_else(|| CircuitError::UnknownRegister(reg.to_string()))?;
        Ok(span.start + local_idx)
    }

    pub fn get_bit_index(&self, reg: &str, local_idx: usize) -> Result<usize, CircuitError> {
        let span = self.cregs.get(reg).ok_or_else(|| CircuitError::UnknownRegister(reg.to_string()))?;
        Ok(span.start + local_idx)
    }

    pub fn get_qubit_reg_size(&self, reg: &str) -> Result<usize, CircuitError> {
        self.qregs.get(reg).map(|s| s.size).ok_or_else(|| CircuitError::UnknownRegister(reg.to_string()))
    }

    pub fn get_bit_reg_size(&self, reg: &str) -> Result<usize, CircuitError> {
        self.cregs.get(reg).map(|s| s.size).ok_or_else(|| CircuitError::UnknownRegister(reg.to_string()))
    }

    /// Registers a user gate body expressed over formal qubits `0..k`.
    pub fn define_gate(&mut self, name: &str, body: Vec<Operation>) {
        self.gate_defs.insert(name.to_string(), body);
    }

    #[must_use]
    pub fn is_user_defined_gate(&self, name: &str) -> bool {
        self.gate_defs.contains_key(name)
    }

    /// Substitutes formal qubits in the named gate's body for `actual_qubits`
    /// and appends the result to the operation list.
    pub fn expand_gate(&mut self, name: &str, actual_qubits: &[usize]) -> Result<(), CircuitError> {
        let body = self.gate_defs.get(name).ok_or_else(|| CircuitError::UnknownGate(name.to_string()))?.clone();
        for op in body {
            let mapped_qubits: Vec<usize> = op.get_qubits().iter().map(|&q| actual_qubits[q]).collect();
            let mut new_op = Operation::with_params(op.get_type(), mapped_qubits, op.get_parameters().to_vec());
            if op.dagger() || op.x_rotation() {
                new_op = Operation::p_gate(op.get_type(), new_op.get_qubits().to_vec(), op.dagger(), op.x_rotation());
            }
            self.add_operation(new_op);
        }
        Ok(())
    }

    /// Appends `op`, growing `num_qubits`/`num_bits` if needed and keeping
    /// the Clifford+T cache flag consistent.
    pub fn add_operation(&mut self, op: Operation) {
        for &q in &op.get_qubits().to_vec() {
            self.num_qubits = self.num_qubits.max(q + 1);
        }
        if let Some(p) = op.get_pauli() {
            self.num_qubits = self.num_qubits.max(p.len());
        }
        for &b in &op.get_bits().to_vec() {
            self.num_bits = self.num_bits.max(b + 1);
        }
        if !op.get_type().is_clifford_t() {
            self.is_clifford_t = false;
        }
        self.operations.push(op);
    }

    /// Replaces the operation list wholesale and recomputes the Clifford+T flag.
    pub fn set_operations_list(&mut self, ops: Vec<Operation>) {
        self.is_clifford_t = ops.iter().all(|op| op.get_type().is_clifford_t());
        self.operations = ops;
    }

    /// Maps a flat qubit index back to `(register name, local index)` for
    /// printing. Falls back to a synthetic `"q"` register covering the
    /// whole circuit if no declared register claims `idx` (e.g. after a
    /// pass rebuilds the circuit without re-declaring the original registers).
    #[must_use]
    pub fn qubit_ref(&self, idx: usize) -> (String, usize) {
        for (name, span) in &self.qregs {
            if idx >= span.start && idx < span.start + span.size {
                return (name.clone(), idx - span.start);
            }
        }
        ("q".to_string(), idx)
    }

    #[must_use]
    pub fn bit_ref(&self, idx: usize) -> (String, usize) {
        for (name, span) in &self.cregs {
            if idx >= span.start && idx < span.start + span.size {
                return (name.clone(), idx - span.start);
            }
        }
        ("c".to_string(), idx)
    }

    /// Declared quantum registers as `(name, size)`, in an unspecified order.
    #[must_use]
    pub fn qregs(&self) -> Vec<(String, usize)> {
        self.qregs.iter().map(|(n, s)| (n.clone(), s.size)).collect()
    }

    #[must_use]
    pub fn cregs(&self) -> Vec<(String, usize)> {
        self.cregs.iter().map(|(n, s)| (n.clone(), s.size)).collect()
    }

    #[must_use]
    pub fn get_operations(&self) -> &[Operation] {
        &self.operations
    }

    #[must_use]
    pub fn is_clifford_t(&self) -> bool {
        self.is_clifford_t
    }

    /// Per-qubit critical-path length.
    #[must_use]
    pub fn depth(&self) -> usize {
        let mut depth_counts: HashMap<usize, usize> = HashMap::new();
        let mut max_depth = 0usize;
        for op in &self.operations {
            let qubits = op.active_qubits();
            let base = qubits.iter().map(|q| *depth_counts.get(q).unwrap_or(&0)).max().unwrap_or(0);
            let new_depth = base + 1;
            for q in qubits {
                depth_counts.insert(q, new_depth);
            }
            max_depth = max_depth.max(new_depth);
        }
        max_depth
    }

    /// Per-gate latency `a*d + b` for a surface-code distance `d`.
    #[must_use]
    pub fn get_gate_duration(ty: OpType, code_distance: usize) -> f64 {
        let d = code_distance as f64;
        match ty {
            OpType::Cx | OpType::H => 3.0 * d + 4.0,
            OpType::S | OpType::Sdg | OpType::Sx | OpType::Sxdg => 1.5 * d + 3.0,
            OpType::T | OpType::Tdg | OpType::P4 => 2.5 * d + 4.0,
            _ => d,
        }
    }

    /// Same critical-path computation as `depth()` but weighted by
    /// `get_gate_duration`.
    #[must_use]
    pub fn duration(&self, code_distance: usize) -> f64 {
        let mut finish: HashMap<usize, f64> = HashMap::new();
        let mut max_finish = 0.0f64;
        for op in &self.operations {
            let qubits = op.active_qubits();
            let base = qubits.iter().map(|q| *finish.get(q).unwrap_or(&0.0)).fold(0.0, f64::max);
            let new_finish = base + Self::get_gate_duration(op.get_type(), code_distance);
            for q in qubits {
                finish.insert(q, new_finish);
            }
            max_finish = max_finish.max(new_finish);
        }
        max_finish
    }

    /// Histogram of canonical gate names.
    #[must_use]
    pub fn count_ops(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for op in &self.operations {
            *counts.entry(op.get_type_name()).or_insert(0) += 1;
        }
        counts
    }

    #[must_use]
    pub fn print_stats(&self) -> String {
        let counts = self.count_ops();
        let mut out = String::new();
        let _ = writeln!(out, "Circuit statistics:");
        let _ = writeln!(out, "  qubits: {}", self.num_qubits);
        let _ = writeln!(out, "  bits: {}", self.num_bits);
        let _ = writeln!(out, "  operations: {}", self.operations.len());
        let _ = writeln!(out, "  depth: {}", self.depth());
        let _ = writeln!(out, "  clifford+T only: {}", self.is_clifford_t);

        let t_gates = counts.get("t").copied().unwrap_or(0)
            + counts.get("tdg").copied().unwrap_or(0)
            + counts.get("t_pauli").copied().unwrap_or(0)
            + counts.get("p4").copied().unwrap_or(0);
        let two_qubit_gates = counts.get("cx").copied().unwrap_or(0)
            + counts.get("cy").copied().unwrap_or(0)
            + counts.get("cz").copied().unwrap_or(0)
            + counts.get("swap").copied().unwrap_or(0)
            + counts.get("ecr").copied().unwrap_or(0);
        let total = self.operations.len().max(1) as f64;
        let _ = writeln!(out, "  T gates: {t_gates} ({:.1}%)", 100.0 * t_gates as f64 / total);
        let _ = writeln!(out, "  2-qubit gates: {two_qubit_gates} ({:.1}%)", 100.0 * two_qubit_gates as f64 / total);

        let mut names: Vec<_> = counts.keys().collect();
        names.sort();
        for name in names {
            let _ = writeln!(out, "  {name}: {}", counts[name]);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qreg_index_resolution() {
        let mut c = Circuit::new();
        c.add_qreg("q", 3);
        assert_eq!(c.get_qubit_index("q", 2).unwrap(), 2);
        assert!(c.get_qubit_index("missing", 0).is_err());
    }

    #[test]
    fn add_operation_grows_qubit_count_and_clears_clifford_t_flag() {
        let mut c = Circuit::new();
        c.add_operation(Operation::with_params(OpType::Rz, vec![4], vec![0.3]));
        assert_eq!(c.num_qubits(), 5);
        assert!(!c.is_clifford_t());
    }

    #[test]
    fn depth_over_independent_qubits_is_one() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::H, vec![1]));
        assert_eq!(c.depth(), 1);
    }

    #[test]
    fn depth_over_shared_qubit_chains() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::Cx, vec![0, 1]));
        c.add_operation(Operation::new(OpType::H, vec![1]));
        assert_eq!(c.depth(), 3);
    }

    #[test]
    fn expand_gate_maps_formal_to_actual_qubits() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.define_gate("bell", vec![Operation::new(OpType::H, vec![0]), Operation::new(OpType::Cx, vec![0, 1])]);
        c.expand_gate("bell", &[1, 0]).unwrap();
        assert_eq!(c.get_operations()[0].get_qubits(), &[1]);
        assert_eq!(c.get_operations()[1].get_qubits(), &[1, 0]);
    }

    #[test]
    fn count_ops_histograms_by_canonical_name() {
        let mut c = Circuit::new();
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::H, vec![1]));
        c.add_operation(Operation::new(OpType::T, vec![0]));
        let counts = c.count_ops();
        assert_eq!(counts["h"], 2);
        assert_eq!(counts["t"], 1);
    }
}
