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

//! The grid-problem solver (`gridsynth`) and unitary normal-form
//! decomposition: synthesises an arbitrary-angle `RZ` as an exact
//! Clifford+T gate sequence.

pub mod error;
pub mod gridsynth;
pub mod normal_form;
pub mod unitary;

pub use error::SynthError;
pub use gridsynth::{default_epsilon, gridsynth, gridsynth_gates, gridsynth_with_budget};
pub use normal_form::{decompose, simplify_word, word_to_string};
pub use unitary::DOmegaUnitary;
