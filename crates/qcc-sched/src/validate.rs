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

//! Checks a scheduled (expanded) instruction stream against its
//! unscheduled ground truth: every non-software, non-memory op's
//! operands must be resident at execution time, and per qubit the
//! sub-sequence of non-memory ops must match exactly.

use log::warn;
use qcc_circuit::serialize::binary::{read_header, read_record, Instruction, InstructionKind};
use std::collections::HashMap;
use std::io::Read;

/// Per-qubit projection of a stream's non-memory instructions, used to
/// diff a ground-truth stream against a candidate schedule.
pub type InstructionSchedule = HashMap<usize, Vec<Instruction>>;

/// A validation failure, with enough detail to report to the user
/// without ever panicking.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatorMismatch {
    QubitInComputeRegion { qubit: usize },
    QubitNotInComputeRegion { qubit: usize },
    OperandNotResident { qubit: usize },
    QubitMissingFromTest { qubit: usize },
    WindowLengthMismatch { qubit: usize, ground_truth: usize, test: usize },
    InstructionMismatch { qubit: usize, position: usize },
}

impl std::fmt::Display for ValidatorMismatch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidatorMismatch::QubitInComputeRegion { qubit } => write!(f, "qubit {qubit} found in compute region during a memory op"),
            ValidatorMismatch::QubitNotInComputeRegion { qubit } => write!(f, "qubit {qubit} not found in compute region during a memory op"),
            ValidatorMismatch::OperandNotResident { qubit } => write!(f, "qubit {qubit} not resident for a non-software instruction"),
            ValidatorMismatch::QubitMissingFromTest { qubit } => write!(f, "qubit {qubit} not found in test schedule"),
            ValidatorMismatch::WindowLengthMismatch { qubit, ground_truth, test } => {
                write!(f, "qubit {qubit} window length mismatch: {ground_truth} (ground truth) != {test} (test)")
            }
            ValidatorMismatch::InstructionMismatch { qubit, position } => write!(f, "qubit {qubit} instruction {position} mismatch"),
        }
    }
}

/// Reads an entire stream into a per-qubit instruction schedule,
/// skipping `MSwap`/`MSwapD`/`MPrefetch` records. When
/// `check_memory_access_validity` is set, also tracks which physical
/// slot each qubit currently occupies and flags operand-residency
/// violations as they're found.
pub fn read_schedule<R: Read>(
    istrm: &mut R,
    cmp_count: usize,
    check_memory_access_validity: bool,
) -> Result<InstructionSchedule, ValidatorMismatch> {
    let mut compute_region: Vec<usize> = (0..cmp_count).collect();
    let mut schedule: InstructionSchedule = HashMap::new();

    loop {
        let inst = match read_record(istrm) {
            Ok(Some(inst)) => inst,
            Ok(None) => break,
            Err(e) => {
                warn!("read_schedule: stopping on stream error: {e}");
                break;
            }
        };

        if matches!(inst.kind, InstructionKind::MSwap | InstructionKind::MSwapD | InstructionKind::MPrefetch) {
            if check_memory_access_validity {
                let (out_q, in_q) = (inst.qubits[0], inst.qubits[1]);
                if let Some(pos) = compute_region.iter().position(|&q| q == out_q) {
                    let _ = pos;
                    return Err(ValidatorMismatch::QubitInComputeRegion { qubit: out_q });
                }
                let Some(slot) = compute_region.iter().position(|&q| q == in_q) else {
                    return Err(ValidatorMismatch::QubitNotInComputeRegion { qubit: in_q });
                };
                compute_region[slot] = out_q;
            }
            continue;
        }

        if check_memory_access_validity && !inst.kind.is_software() {
            for &q in &inst.qubits {
                if !compute_region.contains(&q) {
                    return Err(ValidatorMismatch::OperandNotResident { qubit: q });
                }
            }
        }

        for &q in &inst.qubits {
            schedule.entry(q).or_default().push(inst.clone());
        }
    }

    Ok(schedule)
}

fn compare_schedules(ground_truth: &InstructionSchedule, test: &InstructionSchedule) -> Result<(), ValidatorMismatch> {
    for (&q, gt_win) in ground_truth {
        let Some(test_win) = test.get(&q) else { return Err(ValidatorMismatch::QubitMissingFromTest { qubit: q }) };
        if gt_win.len() != test_win.len() {
            return Err(ValidatorMismatch::WindowLengthMismatch { qubit: q, ground_truth: gt_win.len(), test: test_win.len() });
        }
        for (i, (a, b)) in gt_win.iter().zip(test_win.iter()).enumerate() {
            if a.kind != b.kind || a.qubits != b.qubits || a.gate_word != b.gate_word {
                return Err(ValidatorMismatch::InstructionMismatch { qubit: q, position: i });
            }
        }
    }
    Ok(())
}

/// Validates that `test` is a correct MEMOPT expansion of `ground_truth`:
/// every operand is resident when used, and every qubit's projected
/// non-memory instruction sequence is unchanged.
pub fn validate_schedule<R: Read>(ground_truth: &mut R, test: &mut R, cmp_count: usize) -> Result<(), ValidatorMismatch> {
    read_header(ground_truth).map_err(|_| ValidatorMismatch::QubitMissingFromTest { qubit: 0 })?;
    read_header(test).map_err(|_| ValidatorMismatch::QubitMissingFromTest { qubit: 0 })?;

    let gt_schedule = read_schedule(ground_truth, cmp_count, false)?;
    let test_schedule = read_schedule(test, cmp_count, true)?;

    compare_schedules(&gt_schedule, &test_schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_circuit::serialize::binary::write_header;
    use qcc_circuit::serialize::binary::write_record;
    use std::io::Cursor;

    fn stream(num_qubits: u32, insts: &[Instruction]) -> Cursor<Vec<u8>> {
        let mut buf = Vec::new();
        write_header(&mut buf, num_qubits).unwrap();
        for inst in insts {
            write_record(&mut buf, inst).unwrap();
        }
        Cursor::new(buf)
    }

    #[test]
    fn identical_streams_validate() {
        let insts = vec![Instruction::new(InstructionKind::Cx, vec![0, 1])];
        let mut gt = stream(2, &insts);
        let mut test = stream(2, &insts);
        assert!(validate_schedule(&mut gt, &mut test, 2).is_ok());
    }

    #[test]
    fn mswap_ops_are_skipped_from_the_projected_sequence() {
        // ground truth: a CX on qubits 0,1 with a compute region of capacity 2.
        let insts = vec![Instruction::new(InstructionKind::Cx, vec![0, 1])];
        let mut gt = stream(2, &insts);
        // qubit 2 enters in place of resident qubit 1, then the CX executes on {0, 2}.
        let scheduled =
            vec![Instruction::new(InstructionKind::MSwap, vec![2, 1]), Instruction::new(InstructionKind::Cx, vec![0, 2])];
        let mut test = stream(2, &scheduled);
        assert!(validate_schedule(&mut gt, &mut test, 2).is_err());
    }

    #[test]
    fn valid_mswap_then_resident_op_passes() {
        let insts = vec![Instruction::new(InstructionKind::Cx, vec![0, 2])];
        let mut gt = stream(2, &insts);
        let scheduled =
            vec![Instruction::new(InstructionKind::MSwap, vec![2, 1]), Instruction::new(InstructionKind::Cx, vec![0, 2])];
        let mut test = stream(2, &scheduled);
        assert!(validate_schedule(&mut gt, &mut test, 2).is_ok());
    }

    #[test]
    fn differing_window_lengths_are_rejected() {
        let mut gt = stream(2, &[Instruction::new(InstructionKind::Cx, vec![0, 1])]);
        let mut test = stream(
            2,
            &[Instruction::new(InstructionKind::Cx, vec![0, 1]), Instruction::new(InstructionKind::Cx, vec![0, 1])],
        );
        assert!(validate_schedule(&mut gt, &mut test, 2).is_err());
    }
}
