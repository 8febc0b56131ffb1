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

//! Arbitrary-precision numerics, exact rings, and Pauli/tableau algebra.
//!
//! This crate is the foundation layer of the `qcc` workspace: everything
//! above it (the gridsynth solver, the circuit IR, the synthesis passes,
//! the scheduler) is built on the types defined here.

pub mod bignum;
pub mod error;
pub mod float;
pub mod pauli;
pub mod pi_expr;
pub mod rings;
pub mod tableau;

pub use bignum::Int;
pub use error::CoreError;
pub use float::Float;
pub use pauli::{Pauli, PauliOp, Phase};
pub use rings::{DOmega, DRootTwo, ZOmega, ZRootTwo};
pub use tableau::{HTab, RowType, VTab};
