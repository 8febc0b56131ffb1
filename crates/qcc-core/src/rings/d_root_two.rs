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

//! `DRootTwo`: the ring `Z[sqrt(2), 1/sqrt(2)]`, elements `alpha / sqrt(2)^k`
//! for `alpha` in [`ZRootTwo`] and `k >= 0`.

use super::ZRootTwo;
use crate::bignum::Int;
use std::fmt;

#[derive(Debug, Clone)]
pub struct DRootTwo {
    pub alpha: ZRootTwo,
    pub k: u32,
}

impl DRootTwo {
    #[must_use]
    pub fn new(alpha: ZRootTwo, k: u32) -> Self {
        DRootTwo { alpha, k }.reduced()
    }

    #[must_use]
    pub fn from_z_root_two(alpha: ZRootTwo) -> Self {
        DRootTwo::new(alpha, 0)
    }

    #[must_use]
    pub fn zero() -> Self {
        DRootTwo::new(ZRootTwo::zero(), 0)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.alpha.is_zero()
    }

    /// Shrinks `k` while `alpha` is divisible by `sqrt(2)` (i.e. `a` is
    /// even, since `sqrt2 * (a+b*sqrt2) = 2b + a*sqrt2`), so that every
    /// value has a canonical minimal-denominator representation.
    fn reduced(mut self) -> Self {
        if self.alpha.is_zero() {
            self.k = 0;
            return self;
        }
        while self.k > 0 {
            // alpha / sqrt2 = alpha * sqrt2 / 2 = (2b + a*sqrt2) / 2, which is
            // in ZRootTwo iff a is even.
            if self.alpha.a.clone() % Int::from_i64(2) != Int::zero() {
                break;
            }
            let new_a = self.alpha.b.clone();
            let new_b = self.alpha.a.clone() / Int::from_i64(2);
            self.alpha = ZRootTwo::new(new_a, new_b);
            self.k -= 1;
        }
        self
    }

    fn align(a: &DRootTwo, b: &DRootTwo) -> (ZRootTwo, ZRootTwo, u32) {
        let k = a.k.max(b.k);
        let lift = |v: &DRootTwo| -> ZRootTwo {
            let shift = k - v.k;
            if shift == 0 {
                v.alpha.clone()
            } else {
                // multiply by sqrt(2)^shift: sqrt2^(2m) = 2^m, sqrt2^(2m+1) = 2^m*sqrt2
                let half = shift / 2;
                let two_pow = Int::from_i64(2).pow_u32(half);
                let scaled = v.alpha.scale(&two_pow);
                if shift % 2 == 1 {
                    // multiply scaled by sqrt2: (a + b*sqrt2)*sqrt2 = 2b + a*sqrt2
                    ZRootTwo::new(Int::from_i64(2) * scaled.b.clone(), scaled.a.clone())
                } else {
                    scaled
                }
            }
        };
        (lift(a), lift(b), k)
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        let (a, b, k) = Self::align(self, other);
        DRootTwo::new(a.add(&b), k)
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        let (a, b, k) = Self::align(self, other);
        DRootTwo::new(a.sub(&b), k)
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        DRootTwo::new(self.alpha.neg(), self.k)
    }

    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        DRootTwo::new(self.alpha.mul(&other.alpha), self.k + other.k)
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.alpha.to_f64() / std::f64::consts::SQRT_2.powi(self.k as i32)
    }
}

impl PartialEq for DRootTwo {
    fn eq(&self, other: &Self) -> bool {
        let (a, b, _) = Self::align(self, other);
        a == b
    }
}
impl Eq for DRootTwo {}

impl fmt::Display for DRootTwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / sqrt2^{}", self.alpha, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_denominator_when_possible() {
        // (2 + 0*sqrt2) / sqrt2^1 = sqrt2, which in lowest terms is (0+1*sqrt2)/sqrt2^0... no:
        // 2/sqrt2 = sqrt2 itself = (0 + 1*sqrt2), k=0.
        let d = DRootTwo::new(ZRootTwo::new(Int::from_i64(2), Int::zero()), 1);
        assert_eq!(d.k, 0);
        assert_eq!(d.alpha, ZRootTwo::new(Int::zero(), Int::one()));
    }

    #[test]
    fn add_with_differing_denominators() {
        let a = DRootTwo::new(ZRootTwo::one(), 0);
        let b = DRootTwo::new(ZRootTwo::one(), 1);
        let sum = a.add(&b);
        assert!((sum.to_f64() - (1.0 + 1.0 / std::f64::consts::SQRT_2)).abs() < 1e-9);
    }

    #[test]
    fn mul_adds_exponents() {
        let a = DRootTwo::new(ZRootTwo::from_int(3), 1);
        let b = DRootTwo::new(ZRootTwo::from_int(2), 2);
        let p = a.mul(&b);
        assert!((p.to_f64() - a.to_f64() * b.to_f64()).abs() < 1e-9);
    }
}
