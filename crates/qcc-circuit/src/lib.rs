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

//! Circuit intermediate representation, its dependency DAG, and
//! serialization (OpenQASM-2.0-compatible text and a binary instruction
//! stream) for the `qcc` synthesis toolchain.

pub mod circuit;
pub mod dag;
pub mod error;
pub mod operation;
pub mod serialize;

pub use circuit::Circuit;
pub use dag::DAGCircuit;
pub use error::CircuitError;
pub use operation::{OpType, Operation};
