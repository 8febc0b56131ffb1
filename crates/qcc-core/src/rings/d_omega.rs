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

//! `DOmega`: the ring `Z[omega, 1/sqrt(2)]`, elements `u / sqrt(2)^k` for
//! `u` in [`ZOmega`] and `k >= 0`. This is the coordinate ring unitary
//! matrix entries over the Clifford+T gate set are drawn from.

use super::ZOmega;
use crate::bignum::Int;
use std::fmt;

#[derive(Debug, Clone)]
pub struct DOmega {
    pub u: ZOmega,
    pub k: u32,
}

impl DOmega {
    #[must_use]
    pub fn new(u: ZOmega, k: u32) -> Self {
        DOmega { u, k }.reduced()
    }

    #[must_use]
    pub fn from_z_omega(u: ZOmega) -> Self {
        DOmega::new(u, 0)
    }

    #[must_use]
    pub fn zero() -> Self {
        DOmega::new(ZOmega::zero(), 0)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.u.is_zero()
    }

    /// `sqrt(2) = omega - omega^3`, i.e. `ZOmega::new(1,0,1,0)` with the
    /// `omega^3` coefficient negated: `(a,b,c,d) = (-1,0,1,0)`.
    fn sqrt2_in_zomega() -> ZOmega {
        ZOmega::new(Int::from_i64(-1), Int::zero(), Int::one(), Int::zero())
    }

    /// Shrinks `k` while `u` is exactly divisible by `sqrt(2)` in `ZOmega`,
    /// giving the canonical minimal-denominator representative.
    fn reduced(mut self) -> Self {
        if self.u.is_zero() {
            self.k = 0;
            return self;
        }
        let sqrt2 = Self::sqrt2_in_zomega();
        while self.k > 0 {
            match self.u.try_divexact(&sqrt2) {
                Some(next) => {
                    self.u = next;
                    self.k -= 1;
                }
                None => break,
            }
        }
        self
    }

    fn align(a: &DOmega, b: &DOmega) -> (ZOmega, ZOmega, u32) {
        let k = a.k.max(b.k);
        let sqrt2 = Self::sqrt2_in_zomega();
        let lift = |v: &DOmega| -> ZOmega {
            let mut scaled = v.u.clone();
            for _ in 0..(k - v.k) {
                scaled = scaled.mul(&sqrt2);
            }
            scaled
        };
        (lift(a), lift(b), k)
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, k) = Self::align(self, other);
        DOmega::new(a.add(&b), k)
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, k) = Self::align(self, other);
        DOmega::new(a.sub(&b), k)
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        DOmega::new(self.u.neg(), self.k)
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        DOmega::new(self.u.mul(&other.u), self.k + other.k)
    }

    #[must_use]
    pub fn conj(&self) -> Self {
        DOmega::new(self.u.conj(), self.k)
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.u.to_f64() / std::f64::consts::SQRT_2.powi(self.k as i32)
    }
}

impl PartialEq for DOmega {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = Self::align(self, other);
        a == b
    }
}
impl Eq for DOmega {}

impl fmt::Display for DOmega {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / sqrt2^{}", self.u, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_denominator_when_divisible() {
        let sqrt2 = DOmega::sqrt2_in_zomega();
        let d = DOmega::new(sqrt2, 1);
        assert_eq!(d.k, 0);
        assert_eq!(d.u, ZOmega::one());
    }

    #[test]
    fn add_with_differing_k() {
        let a = DOmega::new(ZOmega::one(), 0);
        let b = DOmega::new(ZOmega::one(), 2);
        let sum = a.add(&b);
        assert!((sum.to_f64() - (1.0 + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn mul_adds_k() {
        let a = DOmega::new(ZOmega::from_int(3), 1);
        let b = DOmega::new(ZOmega::from_int(2), 1);
        let p = a.mul(&b);
        assert!((p.to_f64() - a.to_f64() * b.to_f64()).abs() < 1e-9);
    }
}
