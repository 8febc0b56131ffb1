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

//! Priority-greedy emitter: prefers to keep instructions whose operands
//! already overlap the current working set, filling any remaining
//! capacity from other ready instructions.

use super::{transform_working_set_into, Emitter, EmitResult};
use qcc_circuit::serialize::binary::{Instruction, InstructionKind};
use std::collections::{HashMap, HashSet, VecDeque};

#[derive(Debug, Default)]
pub struct Viszlai;

impl Viszlai {
    #[must_use]
    pub fn new() -> Self {
        Viszlai
    }

    fn instruction_selection_iteration(cmp_count: usize, inst: &Instruction, ws: &mut HashSet<usize>) {
        if inst.qubits.len() > cmp_count - ws.len() {
            return;
        }
        ws.extend(inst.qubits.iter().copied());
    }
}

impl Emitter for Viszlai {
    fn emit_memory_instructions(
        &mut self,
        cmp_count: usize,
        num_qubits: usize,
        current_working_set: &HashSet<usize>,
        _pending: &[usize],
        windows: &HashMap<usize, VecDeque<usize>>,
        pool: &[Instruction],
    ) -> EmitResult {
        let mut visited = vec![false; num_qubits];
        let mut priority_instructions = Vec::new();
        let mut head_instructions = Vec::new();

        for (&q, win) in windows {
            if visited[q] {
                continue;
            }
            let Some(&front_idx) = win.front() else { continue };
            let inst = &pool[front_idx];
            let all_ready = inst.qubits.iter().all(|&qq| windows.get(&qq).and_then(VecDeque::front) == Some(&front_idx));
            if !all_ready {
                continue;
            }

            let mut is_priority = false;
            for &qq in &inst.qubits {
                visited[qq] = true;
                is_priority |= current_working_set.contains(&qq);
            }
            if is_priority {
                priority_instructions.push(front_idx);
            } else {
                head_instructions.push(front_idx);
            }
        }

        let mut new_working_set = HashSet::new();
        for idx in priority_instructions {
            Self::instruction_selection_iteration(cmp_count, &pool[idx], &mut new_working_set);
            if new_working_set.len() >= cmp_count {
                break;
            }
        }
        if new_working_set.len() < cmp_count {
            for idx in head_instructions {
                Self::instruction_selection_iteration(cmp_count, &pool[idx], &mut new_working_set);
                if new_working_set.len() >= cmp_count {
                    break;
                }
            }
        }

        let (memory_instructions, unused_bandwidth) =
            transform_working_set_into(current_working_set, &new_working_set, InstructionKind::MSwap);
        EmitResult { working_set: new_working_set, memory_instructions, unused_bandwidth }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(indices: &[usize]) -> VecDeque<usize> {
        indices.iter().copied().collect()
    }

    #[test]
    fn prefers_instructions_touching_the_current_working_set() {
        let pool = vec![Instruction::new(InstructionKind::Cx, vec![0, 1]), Instruction::new(InstructionKind::Cx, vec![2, 3])];
        let mut windows = HashMap::new();
        windows.insert(0, window_of(&[0]));
        windows.insert(1, window_of(&[0]));
        windows.insert(2, window_of(&[1]));
        windows.insert(3, window_of(&[1]));
        let current: HashSet<usize> = [0].into_iter().collect();

        let mut emitter = Viszlai::new();
        let result = emitter.emit_memory_instructions(2, 4, &current, &[0, 1], &windows, &pool);
        assert_eq!(result.working_set, [0, 1].into_iter().collect());
    }

    #[test]
    fn stops_absorbing_once_capacity_is_reached() {
        let pool = vec![
            Instruction::new(InstructionKind::Cx, vec![0, 1]),
            Instruction::new(InstructionKind::Cx, vec![2, 3]),
            Instruction::new(InstructionKind::Cx, vec![4, 5]),
        ];
        let mut windows = HashMap::new();
        for (q, idx) in [(0, 0), (1, 0), (2, 1), (3, 1), (4, 2), (5, 2)] {
            windows.insert(q, window_of(&[idx]));
        }
        let current: HashSet<usize> = HashSet::new();
        let mut emitter = Viszlai::new();
        let result = emitter.emit_memory_instructions(4, 6, &current, &[0, 1, 2], &windows, &pool);
        assert_eq!(result.working_set.len(), 4);
    }
}
