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

//! The MEMOPT main loop: reads a binary instruction stream, keeps a
//! fixed-capacity working set resident, and writes out an expanded
//! stream with `MSwap`/`MPrefetch` ops spliced in wherever the emitter
//! needed to change which qubits are resident.

use crate::emit::Emitter;
use crate::error::SchedError;
use log::info;
use qcc_circuit::serialize::binary::{read_header, read_record, write_header, write_record, Instruction, InstructionKind};
use std::collections::{HashMap, HashSet, VecDeque};
use std::io::{Read, Write};

/// How many ops the pending buffer can hold before `read_instructions`
/// stops pulling more from the stream.
pub const PENDING_INST_BUFFER_SIZE: usize = 16384;
/// How many ops the outgoing buffer can accumulate before the scheduler
/// drains half of it to the output stream.
pub const OUTGOING_INST_BUFFER_SIZE: usize = 1024 * 1024;
/// Max ops pulled from the input stream per `read_instructions` call.
pub const READ_LIMIT: usize = 2048;

#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub inst_read: u64,
    pub inst_done: u64,
    pub unrolled_inst_done: u64,
    pub memory_instructions_added: u64,
    pub memory_prefetches_added: u64,
    pub unused_bandwidth: u64,
    pub emission_calls: u64,
    pub timestep: u64,
}

pub struct Scheduler {
    cmp_count: usize,
    emitter: Box<dyn Emitter>,
    print_progress_freq: u64,
    working_set: HashSet<usize>,
    pool: Vec<Instruction>,
    pending: Vec<usize>,
    windows: HashMap<usize, VecDeque<usize>>,
    outgoing: Vec<usize>,
    stats: Stats,
}

impl Scheduler {
    #[must_use]
    pub fn new(cmp_count: usize, emitter: Box<dyn Emitter>, print_progress_freq: u64) -> Self {
        Scheduler {
            cmp_count,
            emitter,
            print_progress_freq,
            working_set: (0..cmp_count).collect(),
            pool: Vec::new(),
            pending: Vec::new(),
            windows: HashMap::new(),
            outgoing: Vec::new(),
            stats: Stats::default(),
        }
    }

    #[must_use]
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Runs the scheduler to completion (or until `stop_after` unrolled
    /// instructions have been emitted), reading from `istrm` and writing
    /// the expanded stream to `ostrm`.
    pub fn run<R: Read, W: Write>(&mut self, istrm: &mut R, ostrm: &mut W, stop_after: u64) -> Result<(), SchedError> {
        let num_qubits = read_header(istrm)? as usize;
        write_header(ostrm, num_qubits as u32)?;
        info!("MEMOPT: num qubits: {num_qubits}");

        let mut eof = false;
        while self.stats.unrolled_inst_done < stop_after && (!self.pending.is_empty() || !eof) {
            if !eof {
                eof = self.read_instructions(istrm)?;
            }

            let num_completed = self.advance_ready_instructions(num_qubits);
            if num_completed == 0 {
                self.emit_memory_instructions(num_qubits);
            }

            if self.outgoing.len() > OUTGOING_INST_BUFFER_SIZE {
                let drain_to = OUTGOING_INST_BUFFER_SIZE / 2;
                self.drain_outgoing_buffer(ostrm, drain_to)?;
            }

            self.stats.timestep += 1;
        }

        self.drain_outgoing_buffer(ostrm, self.outgoing.len())?;
        Ok(())
    }

    /// Reads up to `READ_LIMIT` more instructions, stamping sequence
    /// numbers and threading them onto every qubit window they touch.
    /// Returns whether the stream is now at EOF.
    fn read_instructions<R: Read>(&mut self, istrm: &mut R) -> Result<bool, SchedError> {
        if self.pending.len() >= PENDING_INST_BUFFER_SIZE {
            return Ok(false);
        }
        for _ in 0..READ_LIMIT {
            let Some(mut inst) = read_record(istrm)? else { return Ok(true) };
            inst.seq = self.stats.inst_read;
            self.stats.inst_read += 1;

            let idx = self.pool.len();
            for &q in &inst.qubits {
                self.windows.entry(q).or_default().push_back(idx);
            }
            self.pool.push(inst);
            self.pending.push(idx);
        }
        Ok(false)
    }

    /// One sweep of the pending buffer: completes every instruction that
    /// is at the head of all its qubits' windows and either has every
    /// operand resident or is a software op. Returns how many completed.
    fn advance_ready_instructions(&mut self, _num_qubits: usize) -> usize {
        let mut completed_positions = Vec::new();
        for (pos, &idx) in self.pending.iter().enumerate() {
            let inst = &self.pool[idx];
            let is_ready = inst.qubits.iter().all(|&q| self.windows.get(&q).and_then(VecDeque::front) == Some(&idx));
            let all_resident = inst.qubits.iter().all(|q| self.working_set.contains(q));
            if is_ready && (all_resident || inst.kind.is_software()) {
                completed_positions.push(pos);
            }
        }
        if completed_positions.is_empty() {
            return 0;
        }

        let mut num_unrolled = 0u64;
        for &pos in &completed_positions {
            let idx = self.pending[pos];
            let inst = &self.pool[idx];
            num_unrolled += inst.uop_count() as u64;
            for &q in &inst.qubits.clone() {
                self.windows.get_mut(&q).expect("window for a completed instruction's qubit must exist").pop_front();
            }
            self.outgoing.push(idx);
        }

        let mut kept = Vec::with_capacity(self.pending.len() - completed_positions.len());
        let completed_set: HashSet<usize> = completed_positions.into_iter().collect();
        for (pos, &idx) in self.pending.iter().enumerate() {
            if !completed_set.contains(&pos) {
                kept.push(idx);
            }
        }
        let num_completed = self.pending.len() - kept.len();
        self.pending = kept;

        self.stats.inst_done += num_completed as u64;
        self.stats.unrolled_inst_done += num_unrolled;

        if self.print_progress_freq > 0 && self.stats.inst_done % self.print_progress_freq == 0 {
            info!(
                "MEMOPT: progress: {} instructions processed, {} unrolled, {} memory ops",
                self.stats.inst_done, self.stats.unrolled_inst_done, self.stats.memory_instructions_added
            );
        }

        num_completed
    }

    fn emit_memory_instructions(&mut self, num_qubits: usize) {
        let result =
            self.emitter.emit_memory_instructions(self.cmp_count, num_qubits, &self.working_set, &self.pending, &self.windows, &self.pool);

        debug_assert_eq!(result.working_set.len(), self.cmp_count, "emitter must preserve the working set's capacity");
        self.working_set = result.working_set;

        for inst in result.memory_instructions {
            self.stats.memory_instructions_added += 1;
            if inst.kind == InstructionKind::MPrefetch {
                self.stats.memory_prefetches_added += 1;
            }
            let idx = self.pool.len();
            self.pool.push(inst);
            self.outgoing.push(idx);
        }
        self.stats.unused_bandwidth += result.unused_bandwidth;
        self.stats.emission_calls += 1;
    }

    fn drain_outgoing_buffer<W: Write>(&mut self, ostrm: &mut W, count: usize) -> Result<(), SchedError> {
        let count = count.min(self.outgoing.len());
        for idx in self.outgoing.drain(..count) {
            write_record(ostrm, &self.pool[idx])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Viszlai;
    use qcc_circuit::serialize::binary::write_header as wh;
    use std::io::Cursor;

    fn encode(num_qubits: u32, insts: &[Instruction]) -> Vec<u8> {
        let mut buf = Vec::new();
        wh(&mut buf, num_qubits).unwrap();
        for inst in insts {
            write_record(&mut buf, inst).unwrap();
        }
        buf
    }

    #[test]
    fn software_ops_pass_through_without_waiting_on_residency() {
        let insts = vec![Instruction::new(InstructionKind::X, vec![5])];
        let input = encode(6, &insts);
        let mut reader = Cursor::new(input);
        let mut output = Vec::new();
        let mut sched = Scheduler::new(4, Box::new(Viszlai::new()), 0);
        sched.run(&mut reader, &mut output, u64::MAX).unwrap();
        assert_eq!(sched.stats().inst_done, 1);
    }

    #[test]
    fn ready_instruction_with_resident_operands_completes_immediately() {
        let insts = vec![Instruction::new(InstructionKind::Cx, vec![0, 1])];
        let input = encode(4, &insts);
        let mut reader = Cursor::new(input);
        let mut output = Vec::new();
        let mut sched = Scheduler::new(4, Box::new(Viszlai::new()), 0);
        sched.run(&mut reader, &mut output, u64::MAX).unwrap();
        assert_eq!(sched.stats().inst_done, 1);
        assert_eq!(sched.stats().memory_instructions_added, 0);
    }

    #[test]
    fn non_resident_operand_triggers_a_memory_instruction() {
        let insts = vec![Instruction::new(InstructionKind::Cx, vec![4, 5])];
        let input = encode(6, &insts);
        let mut reader = Cursor::new(input);
        let mut output = Vec::new();
        let mut sched = Scheduler::new(2, Box::new(Viszlai::new()), 0);
        sched.run(&mut reader, &mut output, u64::MAX).unwrap();
        assert_eq!(sched.stats().inst_done, 1);
        assert!(sched.stats().memory_instructions_added > 0);
    }
}
