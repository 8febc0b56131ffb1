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

//! Two tableau abstractions over bit-packed Pauli strings: [`VTab`], a
//! Clifford stabiliser tableau updated by in-place bitwise generator
//! actions, and [`HTab`], a flat list of tagged Pauli-rotation rows with
//! commutation tests and T-fusion reduction.

mod htab;
mod vtab;

pub use htab::{HTab, RowType};
pub use vtab::{CliffordGate, VTab};
