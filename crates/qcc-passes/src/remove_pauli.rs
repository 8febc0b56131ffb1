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

//! Drops every `X`/`Y`/`Z` op, for architectures where Pauli corrections
//! are free and only non-Pauli gate cost matters.

use crate::Pass;
use qcc_circuit::{Circuit, OpType};

pub struct RemovePauliPass;

impl RemovePauliPass {
    #[must_use]
    pub fn new() -> Self {
        RemovePauliPass
    }
}

impl Default for RemovePauliPass {
    fn default() -> Self {
        Self::new()
    }
}

impl Pass for RemovePauliPass {
    fn name(&self) -> &'static str {
        "RemovePauliPass"
    }

    fn run(&self, circuit: &mut Circuit) -> bool {
        let ops = circuit.get_operations().to_vec();
        let before = ops.len();
        let kept: Vec<_> = ops.into_iter().filter(|op| !matches!(op.get_type(), OpType::X | OpType::Y | OpType::Z)).collect();
        let changed = kept.len() != before;
        if changed {
            circuit.set_operations_list(kept);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_circuit::Operation;

    #[test]
    fn drops_pauli_ops_keeps_others() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::X, vec![0]));
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::Z, vec![0]));
        let pass = RemovePauliPass::new();
        assert!(pass.run(&mut c));
        assert_eq!(c.get_operations().len(), 1);
        assert_eq!(c.get_operations()[0].get_type(), OpType::H);
    }

    #[test]
    fn no_pauli_ops_is_a_no_op() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        let pass = RemovePauliPass::new();
        assert!(!pass.run(&mut c));
    }
}
