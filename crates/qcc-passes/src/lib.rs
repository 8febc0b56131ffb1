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

//! Synthesis passes over a [`qcc_circuit::Circuit`]: gate decomposition,
//! trivial-RZ elimination, single-qubit fusion, RZ synthesis via
//! `gridsynth`, the Clifford-reduction single-qubit optimiser, conversion
//! to Pauli-based computation (PBC), T-fusion, and a pass manager that
//! assembles a recipe from user flags.

mod clifford_reduction;
mod decompose;
mod fusion;
mod pass_manager;
mod pbc;
mod remove_pauli;
mod remove_trivial_rz;
mod synthesize_rz;
mod tfuse;

pub use clifford_reduction::CliffordReductionPass;
pub use decompose::DecomposePass;
pub use fusion::GateFusionPass;
pub use pass_manager::{PassManager, PassReport, PassRecipe};
pub use pbc::PbcPass;
pub use remove_pauli::RemovePauliPass;
pub use remove_trivial_rz::RemoveTrivialRzPass;
pub use synthesize_rz::SynthesizeRzPass;
pub use tfuse::{LayeringStrategy, TfusePass};

use qcc_circuit::Circuit;

/// A rewrite over a circuit: `run` reports whether it changed anything,
/// matching the "every pass is `run(&mut Circuit) -> bool`" contract.
pub trait Pass {
    fn name(&self) -> &'static str;
    fn run(&self, circuit: &mut Circuit) -> bool;
}

/// Angles within this many radians of a standard value are treated as exact.
pub(crate) const ANGLE_TOLERANCE: f64 = 1e-4;

/// Normalises `theta` into `(-pi, pi]`.
pub(crate) fn normalize_angle(theta: f64) -> f64 {
    let two_pi = std::f64::consts::TAU;
    let mut t = theta % two_pi;
    if t <= -std::f64::consts::PI {
        t += two_pi;
    } else if t > std::f64::consts::PI {
        t -= two_pi;
    }
    t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_angle_wraps_into_principal_range() {
        assert!((normalize_angle(std::f64::consts::TAU) - 0.0).abs() < 1e-9);
        assert!((normalize_angle(3.0 * std::f64::consts::PI) - std::f64::consts::PI).abs() < 1e-9);
    }
}
