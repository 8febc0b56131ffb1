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

//! MEMOPT: a memory-aware instruction scheduler for architectures with a
//! fixed-capacity "compute region". Consumes a binary instruction stream
//! produced by [`qcc_circuit::serialize::binary`] and produces an
//! expanded stream with `MSwap`/`MPrefetch` ops inserted so every
//! non-software op's operands are resident when it executes.

pub mod emit;
mod error;
mod mmap_io;
mod scheduler;
pub mod validate;

pub use emit::{CostAware, Emitter, EmitterKind, Viszlai};
pub use error::SchedError;
pub use mmap_io::open_mmap_reader;
pub use scheduler::{Scheduler, Stats, OUTGOING_INST_BUFFER_SIZE, PENDING_INST_BUFFER_SIZE, READ_LIMIT};
pub use validate::{validate_schedule, ValidatorMismatch};

/// Builds a [`Scheduler`] with the requested built-in emitter.
#[must_use]
pub fn scheduler_for(cmp_count: usize, kind: EmitterKind, print_progress_freq: u64) -> Scheduler {
    let emitter: Box<dyn Emitter> = match kind {
        EmitterKind::Viszlai => Box::new(Viszlai::new()),
        EmitterKind::CostAware => Box::new(CostAware::new()),
    };
    Scheduler::new(cmp_count, emitter, print_progress_freq)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcc_circuit::serialize::binary::{write_header, write_record, Instruction, InstructionKind};
    use std::io::Cursor;

    #[test]
    fn scheduler_for_builds_both_emitter_kinds() {
        let mut buf = Vec::new();
        write_header(&mut buf, 4).unwrap();
        write_record(&mut buf, &Instruction::new(InstructionKind::Cx, vec![0, 1])).unwrap();

        for kind in [EmitterKind::Viszlai, EmitterKind::CostAware] {
            let mut reader = Cursor::new(buf.clone());
            let mut output = Vec::new();
            let mut sched = scheduler_for(2, kind, 0);
            sched.run(&mut reader, &mut output, u64::MAX).unwrap();
            assert_eq!(sched.stats().inst_done, 1);
        }
    }
}
