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

//! `gridsynth(theta, epsilon)`: the public entry point of the grid-problem
//! solver. Searches increasing denominator scales, enumerating candidate
//! points (TDGP) and attempting the Diophantine step on each, until a
//! solution is found or the search is exhausted.

pub mod diophantine;
pub mod odgp;
pub mod region;
pub mod tdgp;

use crate::error::SynthError;
use crate::unitary::DOmegaUnitary;
use qcc_core::{DOmega, DRootTwo, ZOmega, ZRootTwo};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use region::{EpsilonRegion, UnitDisk};
use std::cell::RefCell;
use std::time::{Duration, Instant};

/// Default millisecond budget given to each Diophantine-step attempt,
/// accumulated across retries within a single `gridsynth` call.
pub const DEFAULT_DIOPHANTINE_TIMEOUT_MS: u64 = 200;
/// Default millisecond budget given to the factoring subroutine within a
/// single Diophantine-step attempt.
pub const DEFAULT_FACTORING_TIMEOUT_MS: u64 = 50;
/// Upper bound on the denominator-exponent scale searched before giving up.
const MAX_SCALE: u32 = 80;

thread_local! {
    /// The solver's thread-local RNG, lazily seeded on first use. Shared by
    /// every `gridsynth` call on this thread so repeated calls don't pay to
    /// reseed, matching the "thread-local RNG, lazily initialised" design
    /// note.
    static RNG: RefCell<ChaCha8Rng> = RefCell::new(ChaCha8Rng::seed_from_u64(0x6771_6373));
}

/// `xi = 1 - z * conj(z)`, the quantity the Diophantine step must write as
/// `w * conj(w)`. `z * conj(z)` is always fixed by the complex-conjugation
/// automorphism (i.e. lies in the `Z[sqrt(2)]` subring embedded with
/// `b = 0, a = -c`), a structural fact this function relies on rather than
/// re-derives.
fn one_minus_norm(z: &DOmega) -> DRootTwo {
    let prod = z.u.mul(&z.u.conj());
    debug_assert!(prod.b.is_zero() && (prod.a.clone() + prod.c.clone()).is_zero(), "z*conj(z) must be sqrt(2)-real");
    let zrt = ZRootTwo::new(prod.d.clone(), prod.c.clone());
    let z_norm = DRootTwo::new(zrt, 2 * z.k);
    DRootTwo::from_z_root_two(ZRootTwo::one()).sub(&z_norm)
}

/// Solves the grid problem for `e^{-i*theta/2}` to within `epsilon` in
/// operator norm, returning the resulting `(z, w, n)` unitary.
///
/// # Errors
/// Returns [`SynthError::NoSolutionFound`] if no candidate up to
/// `MAX_SCALE` produced a Diophantine solution, or
/// [`SynthError::DiophantineTimeout`] if the accumulated Diophantine time
/// budget across all attempted candidates was exhausted first.
pub fn gridsynth(theta: f64, epsilon: f64) -> Result<DOmegaUnitary, SynthError> {
    gridsynth_with_budget(theta, epsilon, DEFAULT_DIOPHANTINE_TIMEOUT_MS, DEFAULT_FACTORING_TIMEOUT_MS)
}

/// As [`gridsynth`], with explicit millisecond budgets for the Diophantine
/// step and its inner factoring subroutine.
pub fn gridsynth_with_budget(
    theta: f64,
    epsilon: f64,
    diophantine_timeout_ms: u64,
    factoring_timeout_ms: u64,
) -> Result<DOmegaUnitary, SynthError> {
    if theta == 0.0 {
        return Ok(DOmegaUnitary::identity());
    }
    let region = EpsilonRegion::new(theta, epsilon);
    let disk = UnitDisk;
    let overall_budget = Duration::from_millis(diophantine_timeout_ms.max(1) * 50);
    let overall_deadline = Instant::now() + overall_budget;
    let mut accumulated_timeout = Duration::ZERO;
    let diophantine_budget = Duration::from_millis(diophantine_timeout_ms.max(factoring_timeout_ms));

    for scale in 0..MAX_SCALE {
        if Instant::now() > overall_deadline {
            break;
        }
        let candidates = tdgp::enumerate_candidates(&region, &disk, scale);
        for z in candidates {
            let xi = one_minus_norm(&z);
            let attempt_deadline = Instant::now() + diophantine_budget;
            let result = RNG.with(|rng| diophantine::solve(&xi, &mut rng.borrow_mut(), attempt_deadline));
            match result {
                Ok(Some((w, wk))) => {
                    let w_domega = DOmega::new(w, wk.max(z.k));
                    return Ok(DOmegaUnitary::new(z, w_domega, 0));
                }
                Ok(None) => continue,
                Err(SynthError::DiophantineTimeout) => {
                    accumulated_timeout += diophantine_budget;
                    if accumulated_timeout > overall_budget {
                        return Err(SynthError::DiophantineTimeout);
                    }
                }
                Err(other) => return Err(other),
            }
        }
    }
    Err(SynthError::NoSolutionFound)
}

/// As [`gridsynth`], post-composed with decomposition (§4.D) into a
/// Clifford+T gate word over `{H,S,T,X,Y,Z,W}`.
///
/// # Errors
/// Propagates [`gridsynth`]'s errors.
pub fn gridsynth_gates(theta: f64, epsilon: f64) -> Result<Vec<char>, SynthError> {
    let unitary = gridsynth(theta, epsilon)?;
    Ok(crate::normal_form::decompose(&unitary))
}

/// The default epsilon policy used when a caller doesn't supply one:
/// `epsilon = |theta| * 1e-2`.
#[must_use]
pub fn default_epsilon(theta: f64) -> f64 {
    (theta.abs() * 1e-2).max(1e-12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn identity_angle_is_trivial() {
        let u = gridsynth(0.0, 0.1).unwrap();
        let (re, im) = u.z_approx();
        assert!((re - 1.0).abs() < 1e-9 && im.abs() < 1e-9);
    }

    #[test]
    fn approximates_the_target_point_within_epsilon() {
        let theta = PI / 4.0;
        let epsilon = 0.25;
        let u = gridsynth(theta, epsilon).expect("gridsynth should find a candidate for a generous epsilon");
        let (re, im) = u.z_approx();
        let target = ((-theta / 2.0).cos(), (-theta / 2.0).sin());
        let dist = ((re - target.0).powi(2) + (im - target.1).powi(2)).sqrt();
        assert!(dist < epsilon, "dist={dist} epsilon={epsilon}");
    }

    #[test]
    fn gates_round_trip_through_decomposition() {
        let word = gridsynth_gates(PI / 4.0, 0.3).unwrap();
        assert!(word.iter().all(|c| "HSTXYZW".contains(*c)));
    }
}
