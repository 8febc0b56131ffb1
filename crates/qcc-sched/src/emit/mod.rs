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

//! Memory-instruction emitters: given the current working set and the
//! pending instruction buffer, pick a new working set and the `MSwap`
//! ops needed to get there.

mod cost_aware;
mod viszlai;

pub use cost_aware::CostAware;
pub use viszlai::Viszlai;

use qcc_circuit::serialize::binary::{Instruction, InstructionKind};
use std::collections::{HashMap, HashSet, VecDeque};

/// Result of one emitter invocation: the chosen working set, the memory
/// ops needed to reach it, and how much of the available memory
/// bandwidth this step left unused.
pub struct EmitResult {
    pub working_set: HashSet<usize>,
    pub memory_instructions: Vec<Instruction>,
    pub unused_bandwidth: u64,
}

/// A strategy for choosing the compute region's next working set. `pool`
/// holds every instruction read so far; `pending`/`windows` reference it
/// by index rather than owning instructions directly, mirroring the
/// scheduler's index-based instruction windows.
pub trait Emitter {
    fn emit_memory_instructions(
        &mut self,
        cmp_count: usize,
        num_qubits: usize,
        current_working_set: &HashSet<usize>,
        pending: &[usize],
        windows: &HashMap<usize, VecDeque<usize>>,
        pool: &[Instruction],
    ) -> EmitResult;
}

/// Which built-in [`Emitter`] a [`crate::Scheduler`] should construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterKind {
    Viszlai,
    CostAware,
}

/// Diffs `current` against `new_set` into a minimal list of `inst_type`
/// ops (`MSwap`/`MSwapD`), each swapping one qubit entering the working
/// set into the physical slot vacated by one qubit leaving it. Since
/// every working set has exactly `cmp_count` qubits, the two qubit lists
/// are always the same length. Per the wire convention, `qubits[0]` is
/// the entering (not-yet-resident) qubit and `qubits[1]` is the
/// resident qubit it replaces.
pub(crate) fn transform_working_set_into(
    current: &HashSet<usize>,
    new_set: &HashSet<usize>,
    inst_type: InstructionKind,
) -> (Vec<Instruction>, u64) {
    let mut leaving: Vec<usize> = current.difference(new_set).copied().collect();
    let mut entering: Vec<usize> = new_set.difference(current).copied().collect();
    leaving.sort_unstable();
    entering.sort_unstable();
    let ops = entering.into_iter().zip(leaving).map(|(in_q, out_q)| Instruction::new(inst_type, vec![in_q, out_q])).collect();
    (ops, 0)
}

/// Gate-type score used by [`CostAware`]'s Compute-Set Tree: how much
/// compute value an instruction contributes if its operands are already
/// resident.
pub(crate) fn compute_value_of(kind: InstructionKind) -> i64 {
    match kind {
        InstructionKind::Rz | InstructionKind::Rx => 20,
        InstructionKind::Ccx | InstructionKind::Ccz => 10,
        InstructionKind::Cx | InstructionKind::Cz => 2,
        k if k.is_software() => 0,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_pairs_leaving_with_entering() {
        let current: HashSet<usize> = [0, 1, 2].into_iter().collect();
        let new_set: HashSet<usize> = [0, 1, 5].into_iter().collect();
        let (ops, _) = transform_working_set_into(&current, &new_set, InstructionKind::MSwap);
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].qubits, vec![5, 2]);
    }

    #[test]
    fn identical_sets_produce_no_ops() {
        let current: HashSet<usize> = [0, 1].into_iter().collect();
        let (ops, _) = transform_working_set_into(&current, &current.clone(), InstructionKind::MSwap);
        assert!(ops.is_empty());
    }
}
