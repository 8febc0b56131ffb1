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

//! Facade crate re-exporting the toolchain's leaf crates: Pauli algebra
//! and arbitrary-precision rings (`qcc-core`), the circuit IR and QASM
//! serializer (`qcc-circuit`), the QASM parser (`qcc-parse`), `gridsynth`
//! RZ synthesis (`qcc-synth`), the synthesis pass pipeline (`qcc-passes`),
//! and the memory-aware scheduler (`qcc-sched`).

pub mod prelude {
    // re-exporting qcc-core
    pub use qcc_core::{CoreError, DOmega, DRootTwo, Pauli, PauliOp, ZOmega, ZRootTwo};

    // re-exporting qcc-circuit
    pub use qcc_circuit::serialize::qasm::print_circuit;
    pub use qcc_circuit::{Circuit, CircuitError, OpType, Operation};

    // re-exporting qcc-parse
    pub use qcc_parse::{compile, CompileError, LowerError, ParseError};

    // re-exporting qcc-synth
    pub use qcc_synth::{default_epsilon, gridsynth, gridsynth_gates, word_to_string, DOmegaUnitary, SynthError};

    // re-exporting qcc-passes
    pub use qcc_passes::{PassManager, PassManagerError, PassRecipe, PassReport};

    // re-exporting qcc-sched
    pub use qcc_sched::{scheduler_for, Emitter, EmitterKind, Scheduler, SchedError};
}
