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

//! `ZOmega`: the ring of integers `Z[omega]` of the cyclotomic field
//! `Q(zeta_8)`, `omega = e^{i*pi/4}`. Elements are stored in the basis
//! `a*omega^3 + b*omega^2 + c*omega + d` for integer `a, b, c, d`.
//!
//! `omega` satisfies `omega^4 = -1`, so multiplication is polynomial
//! convolution modulo `x^4 + 1`. The Galois group of `Q(zeta_8)/Q` is
//! `(Z/8Z)* = {1, 3, 5, 7}`; `conj` is the image of `omega -> omega^7`
//! and `conj_sq2` is the image of `omega -> omega^3`. Multiplying an
//! element by all four Galois images always yields a rational integer
//! (the field norm), which is what makes exact division and gcd possible
//! in this ring.

use crate::bignum::Int;
use num_rational::BigRational;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZOmega {
    pub a: Int,
    pub b: Int,
    pub c: Int,
    pub d: Int,
}

impl ZOmega {
    #[must_use]
    pub fn new(a: Int, b: Int, c: Int, d: Int) -> Self {
        ZOmega { a, b, c, d }
    }

    #[must_use]
    pub fn from_int(d: i64) -> Self {
        ZOmega::new(Int::zero(), Int::zero(), Int::zero(), Int::from_i64(d))
    }

    #[must_use]
    pub fn zero() -> Self {
        ZOmega::from_int(0)
    }

    #[must_use]
    pub fn one() -> Self {
        ZOmega::from_int(1)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero() && self.c.is_zero() && self.d.is_zero()
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        ZOmega::new(
            self.a.clone() + other.a.clone(),
            self.b.clone() + other.b.clone(),
            self.c.clone() + other.c.clone(),
            self.d.clone() + other.d.clone(),
        )
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        ZOmega::new(
            self.a.clone() - other.a.clone(),
            self.b.clone() - other.b.clone(),
            self.c.clone() - other.c.clone(),
            self.d.clone() - other.d.clone(),
        )
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        ZOmega::new(-self.a.clone(), -self.b.clone(), -self.c.clone(), -self.d.clone())
    }

    /// Polynomial convolution mod `x^4 + 1` (i.e. `x^4 = -1`), where `x`
    /// stands for `omega`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let (a1, b1, c1, d1) = (&self.a, &self.b, &self.c, &self.d);
        let (a2, b2, c2, d2) = (&other.a, &other.b, &other.c, &other.d);

        // raw[k] = coefficient of x^k for k in 0..=6 before reducing x^4=-1.
        let raw0 = d1.clone() * d2.clone();
        let raw1 = c1.clone() * d2.clone() + d1.clone() * c2.clone();
        let raw2 = b1.clone() * d2.clone() + c1.clone() * c2.clone() + d1.clone() * b2.clone();
        let raw3 = a1.clone() * d2.clone() + b1.clone() * c2.clone() + c1.clone() * b2.clone() + d1.clone() * a2.clone();
        let raw4 = a1.clone() * c2.clone() + b1.clone() * b2.clone() + c1.clone() * a2.clone();
        let raw5 = a1.clone() * b2.clone() + b1.clone() * a2.clone();
        let raw6 = a1.clone() * a2.clone();

        // x^4 = -1, x^5 = -x, x^6 = -x^2
        let d = raw0 - raw4;
        let c = raw1 - raw5;
        let b = raw2 - raw6;
        let a = raw3;
        ZOmega::new(a, b, c, d)
    }

    #[must_use]
    pub fn scale(&self, k: &Int) -> Self {
        ZOmega::new(
            self.a.clone() * k.clone(),
            self.b.clone() * k.clone(),
            self.c.clone() * k.clone(),
            self.d.clone() * k.clone(),
        )
    }

    /// `omega * (a,b,c,d)`, i.e. multiplication by `x`: shifts coefficients
    /// up one degree, wrapping the top coefficient through `x^4 = -1`.
    #[must_use]
    pub fn mul_by_omega(&self) -> Self {
        ZOmega::new(self.b.clone(), self.c.clone(), self.d.clone(), -self.a.clone())
    }

    /// The complex conjugate, image of the automorphism `omega -> omega^7 = -omega^3`.
    #[must_use]
    pub fn conj(&self) -> Self {
        ZOmega::new(-self.c.clone(), -self.b.clone(), -self.a.clone(), self.d.clone())
    }

    /// The `sqrt(2)`-flipping automorphism, image of `omega -> omega^3`.
    #[must_use]
    pub fn conj_sq2(&self) -> Self {
        ZOmega::new(self.c.clone(), -self.b.clone(), self.a.clone(), self.d.clone())
    }

    /// The field norm `N(u) = u * conj(u) * conj_sq2(u) * conj_sq2(conj(u))`,
    /// the product of all four Galois conjugates, always a rational integer.
    #[must_use]
    pub fn norm(&self) -> Int {
        let u = self.clone();
        let cu = self.conj();
        let prod = u.mul(&cu).mul(&u.conj_sq2()).mul(&cu.conj_sq2());
        assert!(prod.a.is_zero() && prod.b.is_zero() && prod.c.is_zero(), "norm must be rational");
        prod.d
    }

    /// Real-valued approximation, evaluated at `omega = e^{i*pi/4}`,
    /// returning only the real part (used for ordering heuristics, never
    /// exact equality).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        let frac = std::f64::consts::FRAC_1_SQRT_2;
        let omega_re = frac;
        let omega2_re = 0.0;
        let omega3_re = -frac;
        self.a.to_f64() * omega3_re + self.b.to_f64() * omega2_re + self.c.to_f64() * omega_re + self.d.to_f64()
    }

    #[must_use]
    pub fn is_unit(&self) -> bool {
        let n = self.norm();
        n == Int::from_i64(1) || n == Int::from_i64(-1)
    }

    /// Exact division, returning `None` if `other` does not divide `self`
    /// exactly. Implemented via "multiply by all conjugates, divide by the
    /// rational norm", which is exact because `Z[omega]` is the full ring
    /// of integers of `Q(zeta_8)` (hence a Dedekind domain of class number
    /// one, in fact Euclidean for this norm).
    #[must_use]
    pub fn try_divexact(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let norm = other.norm();
        let conj_prod = other.conj().mul(&other.conj_sq2()).mul(&other.conj_sq2().conj());
        let num = self.mul(&conj_prod);
        if !(num.a.clone() % norm.clone()).is_zero()
            || !(num.b.clone() % norm.clone()).is_zero()
            || !(num.c.clone() % norm.clone()).is_zero()
            || !(num.d.clone() % norm.clone()).is_zero()
        {
            return None;
        }
        Some(ZOmega::new(
            num.a / norm.clone(),
            num.b / norm.clone(),
            num.c / norm.clone(),
            num.d / norm,
        ))
    }

    /// Euclidean division rounding each rational coordinate of the exact
    /// quotient `self * conj(other) * conj_sq2(other) * conj_sq2(conj(other))
    /// / N(other)` to the nearest integer.
    #[must_use]
    pub fn divmod(&self, other: &Self) -> Option<(Self, Self)> {
        if other.is_zero() {
            return None;
        }
        let norm = other.norm();
        let conj_prod = other.conj().mul(&other.conj_sq2()).mul(&other.conj_sq2().conj());
        let num = self.mul(&conj_prod);
        let round = |n: &Int| -> Int { Int(BigRational::new(n.0.clone(), norm.0.clone()).round().to_integer()) };
        let q = ZOmega::new(round(&num.a), round(&num.b), round(&num.c), round(&num.d));
        let r = self.sub(&q.mul(other));
        Some((q, r))
    }

    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        let mut a = self.clone();
        let mut b = other.clone();
        while !b.is_zero() {
            let (_, r) = a.divmod(&b).expect("b is non-zero");
            a = b;
            b = r;
        }
        a
    }

    /// Multiplicative inverse, defined only when `self` is a unit.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        self.try_divexact_from_one()
    }

    fn try_divexact_from_one(&self) -> Option<Self> {
        ZOmega::one().try_divexact(self)
    }
}

impl fmt::Display for ZOmega {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})w^3 + ({})w^2 + ({})w + ({})", self.a, self.b, self.c, self.d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omega_to_the_eighth_is_one() {
        let mut acc = ZOmega::one();
        let omega = ZOmega::new(Int::zero(), Int::zero(), Int::one(), Int::zero());
        for _ in 0..8 {
            acc = acc.mul(&omega);
        }
        assert_eq!(acc, ZOmega::one());
    }

    #[test]
    fn conj_and_conj_sq2_are_involutions() {
        let u = ZOmega::new(Int::from_i64(1), Int::from_i64(-2), Int::from_i64(3), Int::from_i64(4));
        assert_eq!(u.conj().conj(), u);
        assert_eq!(u.conj_sq2().conj_sq2(), u);
    }

    #[test]
    fn norm_is_multiplicative() {
        let u = ZOmega::new(Int::from_i64(1), Int::from_i64(0), Int::from_i64(1), Int::from_i64(0));
        let v = ZOmega::new(Int::from_i64(0), Int::from_i64(1), Int::from_i64(0), Int::from_i64(1));
        assert_eq!(u.mul(&v).norm(), u.norm() * v.norm());
    }

    #[test]
    fn divexact_reconstructs() {
        let v = ZOmega::new(Int::from_i64(1), Int::from_i64(0), Int::from_i64(1), Int::from_i64(2));
        let u = ZOmega::new(Int::from_i64(0), Int::from_i64(0), Int::from_i64(0), Int::from_i64(3));
        let product = u.mul(&v);
        let recovered = product.try_divexact(&v).expect("should divide exactly");
        assert_eq!(recovered, u);
    }

    #[test]
    fn divmod_reduces_norm() {
        let a = ZOmega::new(Int::from_i64(5), Int::from_i64(3), Int::from_i64(-2), Int::from_i64(7));
        let b = ZOmega::new(Int::from_i64(0), Int::from_i64(1), Int::from_i64(0), Int::from_i64(2));
        let (q, r) = a.divmod(&b).unwrap();
        assert_eq!(q.mul(&b).add(&r), a);
        assert!(r.norm().abs() < b.norm().abs() || r.is_zero());
    }
}
