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

//! Circuit serialization: a deterministic OpenQASM-2.0-compatible textual
//! printer, and a length-prefixed binary instruction stream for the
//! memory-aware scheduler.

pub mod binary;
pub mod qasm;

pub use binary::{read_record, write_record, Instruction, InstructionKind};
pub use qasm::{format_param, print_circuit};
