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

//! `DOmegaUnitary`: a 2x2 unitary over `Z[omega, 1/sqrt(2)]`, stored as
//! `(z, w, n)` with `z, w` sharing a denominator exponent `k` and a global
//! phase counter `n in Z/8`. The full matrix is
//! `[[z, -omega^n * conj(w)], [w, omega^n * conj(z)]]`.

use qcc_core::rings::omega_power;
use qcc_core::{DOmega, ZOmega};

/// A 2x2 special-unitary matrix over `D[omega]`, in the `(z, w, n)`
/// coordinates the grid solver and the Clifford+T decomposition both work
/// in directly, without ever materializing the full matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct DOmegaUnitary {
    pub z: DOmega,
    pub w: DOmega,
    pub n: u32,
}

impl DOmegaUnitary {
    /// Builds a unitary from components, aligning `z`/`w`'s denominator
    /// exponents to the larger of the two (constructors always keep both
    /// sides reduced, so this matters whenever they differ).
    #[must_use]
    pub fn new(z: DOmega, w: DOmega, n: u32) -> Self {
        let k = z.k.max(w.k);
        let lift = |d: &DOmega| -> DOmega {
            let mut u = d.u.clone();
            let sqrt2 = ZOmega::new(qcc_core::Int::from_i64(-1), qcc_core::Int::zero(), qcc_core::Int::one(), qcc_core::Int::zero());
            for _ in 0..(k - d.k) {
                u = u.mul(&sqrt2);
            }
            DOmega::new(u, k)
        };
        DOmegaUnitary { z: lift(&z), w: lift(&w), n: n % 8 }
    }

    #[must_use]
    pub fn identity() -> Self {
        DOmegaUnitary { z: DOmega::from_z_omega(ZOmega::one()), w: DOmega::zero(), n: 0 }
    }

    /// The matrix entry `[0][0]`, `z`, as a complex approximation
    /// `(re, im)`. Used to check the grid solver's output against the
    /// target rotation point.
    ///
    /// # Returns
    /// `(Re(z), Im(z))` evaluated at `omega = e^{i*pi/4}`.
    #[must_use]
    pub fn z_approx(&self) -> (f64, f64) {
        zomega_approx(&self.z.u, self.z.k)
    }

    /// Left-multiplies by the `T` gate: `n -> n+1`.
    #[must_use]
    pub fn apply_t(&self) -> Self {
        DOmegaUnitary::new(self.z.clone(), self.w.clone(), self.n + 1)
    }

    /// Left-multiplies by the `S` gate: `T^2`, i.e. `n -> n+2`.
    #[must_use]
    pub fn apply_s(&self) -> Self {
        DOmegaUnitary::new(self.z.clone(), self.w.clone(), self.n + 2)
    }

    /// Left-multiplies by `X`: swaps `z` and `w` and negates the phase
    /// counter's role appropriately (`X * [[z,-w^*],[w,z^*]] = [[w,z^*],[z,-w^*]]`,
    /// matched by swapping the roles and complementing `n`).
    #[must_use]
    pub fn apply_x(&self) -> Self {
        DOmegaUnitary::new(self.w.clone(), self.z.clone(), (8 - self.n % 8) % 8)
    }

    /// Left-multiplies by the Walsh-Hadamard gate `H`:
    /// `H * [[z,-w^*],[w,z^*]]` combines both columns by `(z+w)/sqrt(2)`
    /// and `(z-w)/sqrt(2)`.
    #[must_use]
    pub fn apply_h(&self) -> Self {
        let half_sqrt2 = DOmega::new(ZOmega::one(), 1); // 1/sqrt(2)
        let new_z = self.z.add(&self.w).mul(&half_sqrt2);
        let new_w = self.z.sub(&self.w).mul(&half_sqrt2);
        DOmegaUnitary::new(new_z, new_w, self.n)
    }

    /// Left-multiplies by the global-phase generator `W = omega * I`:
    /// contributes nothing to `(z,w)` but is tracked by callers that need
    /// the overall phase (the decomposition emits explicit `W` gates for
    /// exactly this reason); included here as a no-op for API symmetry.
    #[must_use]
    pub fn apply_w(&self) -> Self {
        self.clone()
    }
}

fn zomega_approx(u: &ZOmega, k: u32) -> (f64, f64) {
    let frac = std::f64::consts::FRAC_1_SQRT_2;
    let (a, b, c, d) = (u.a.to_f64(), u.b.to_f64(), u.c.to_f64(), u.d.to_f64());
    let re = a * (-frac) + c * frac + d;
    let im = a * frac + b + c * frac;
    let scale = std::f64::consts::SQRT_2.powi(k as i32);
    (re / scale, im / scale)
}

#[must_use]
pub(crate) fn omega_to_f64(n: u32) -> (f64, f64) {
    let z = omega_power(n);
    zomega_approx(&z, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_z_equal_to_one() {
        let u = DOmegaUnitary::identity();
        let (re, im) = u.z_approx();
        assert!((re - 1.0).abs() < 1e-9 && im.abs() < 1e-9);
    }

    #[test]
    fn t_gate_increments_phase_counter() {
        let u = DOmegaUnitary::identity().apply_t();
        assert_eq!(u.n, 1);
    }

    #[test]
    fn h_then_h_is_identity_up_to_phase() {
        let u = DOmegaUnitary::identity().apply_h().apply_h();
        let (re, im) = u.z_approx();
        assert!((re - 1.0).abs() < 1e-6, "re={re}");
        assert!(im.abs() < 1e-6, "im={im}");
    }
}
