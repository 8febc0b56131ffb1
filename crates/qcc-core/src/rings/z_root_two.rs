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

//! `ZRootTwo`: the ring `Z[sqrt(2)]`, elements `a + b*sqrt(2)` for integer `a, b`.

use crate::bignum::Int;
use num_rational::BigRational;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ZRootTwo {
    pub a: Int,
    pub b: Int,
}

impl ZRootTwo {
    #[must_use]
    pub fn new(a: Int, b: Int) -> Self {
        ZRootTwo { a, b }
    }

    #[must_use]
    pub fn from_int(a: i64) -> Self {
        ZRootTwo::new(Int::from_i64(a), Int::zero())
    }

    #[must_use]
    pub fn zero() -> Self {
        ZRootTwo::from_int(0)
    }

    #[must_use]
    pub fn one() -> Self {
        ZRootTwo::from_int(1)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.a.is_zero() && self.b.is_zero()
    }

    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        ZRootTwo::new(self.a.clone() + other.a.clone(), self.b.clone() + other.b.clone())
    }

    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        ZRootTwo::new(self.a.clone() - other.a.clone(), self.b.clone() - other.b.clone())
    }

    #[must_use]
    pub fn neg(&self) -> Self {
        ZRootTwo::new(-self.a.clone(), -self.b.clone())
    }

    /// `(a1 + b1*sqrt2)(a2 + b2*sqrt2) = (a1a2 + 2b1b2) + (a1b2 + a2b1)*sqrt2`.
    #[must_use]
    pub fn mul(&self, other: &Self) -> Self {
        let a = self.a.clone() * other.a.clone() + Int::from_i64(2) * self.b.clone() * other.b.clone();
        let b = self.a.clone() * other.b.clone() + other.a.clone() * self.b.clone();
        ZRootTwo::new(a, b)
    }

    #[must_use]
    pub fn scale(&self, k: &Int) -> Self {
        ZRootTwo::new(self.a.clone() * k.clone(), self.b.clone() * k.clone())
    }

    /// The Galois conjugate `a - b*sqrt2`.
    #[must_use]
    pub fn conj(&self) -> Self {
        ZRootTwo::new(self.a.clone(), -self.b.clone())
    }

    /// `a^2 - 2b^2`, multiplicative.
    #[must_use]
    pub fn norm(&self) -> Int {
        self.a.clone() * self.a.clone() - Int::from_i64(2) * self.b.clone() * self.b.clone()
    }

    /// Real-valued approximation, used only for ordering/region tests in the
    /// grid solver (never for exact ring equality).
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.a.to_f64() + self.b.to_f64() * std::f64::consts::SQRT_2
    }

    /// The other real embedding, `a - b*sqrt2` evaluated numerically
    /// (distinct from `conj`, which stays in the ring).
    #[must_use]
    pub fn conj_to_f64(&self) -> f64 {
        self.a.to_f64() - self.b.to_f64() * std::f64::consts::SQRT_2
    }

    /// Exact Euclidean division: `self = q*other + r` with `N(r) < N(other)`
    /// (in absolute value) or `r = 0`. Implemented via rounding the exact
    /// rational quotient `self * conj(other) / N(other)` to the nearest
    /// ring element.
    #[must_use]
    pub fn divmod(&self, other: &Self) -> Option<(Self, Self)> {
        if other.is_zero() {
            return None;
        }
        let norm = other.norm();
        let num = self.mul(&other.conj());
        let qa = round_ratio(&num.a, &norm.0);
        let qb = round_ratio(&num.b, &norm.0);
        let q = ZRootTwo::new(Int(qa), Int(qb));
        let r = self.sub(&q.mul(other));
        Some((q, r))
    }

    /// `true` iff `self` is a unit in the ring, i.e. `norm(self) = +-1`.
    #[must_use]
    pub fn is_unit(&self) -> bool {
        let n = self.norm();
        n == Int::from_i64(1) || n == Int::from_i64(-1)
    }

    /// Multiplicative inverse, defined only for units.
    #[must_use]
    pub fn inv(&self) -> Option<Self> {
        if !self.is_unit() {
            return None;
        }
        let n = self.norm();
        let conj = self.conj();
        if n == Int::from_i64(1) {
            Some(conj)
        } else {
            Some(conj.neg())
        }
    }

    /// The unique `w` with `w*w = self`, or `None` if no such element
    /// exists in the ring. Solved in closed form: writing `w = p + q*sqrt2`,
    /// `w*w = self` expands to `p^2 + 2q^2 = a` and `2pq = b`, which reduces
    /// to a quadratic in `q^2` via the norm of `self`.
    #[must_use]
    pub fn sqrt(&self) -> Option<Self> {
        if self.is_zero() {
            return Some(ZRootTwo::zero());
        }
        let norm = self.norm();
        if norm.is_negative() {
            return None;
        }
        let sqrt_norm = norm.clone().floor_sqrt();
        if sqrt_norm.clone() * sqrt_norm.clone() != norm {
            return None;
        }

        for sign in [1i64, -1] {
            let rhs = self.a.clone() + Int::from_i64(sign) * sqrt_norm.clone();
            if !is_exact_multiple(&rhs, 4) {
                continue;
            }
            let u = rhs / Int::from_i64(4);
            if u.is_negative() {
                continue;
            }
            let q0 = u.clone().floor_sqrt();
            if q0.clone() * q0.clone() != u {
                continue;
            }
            let q_candidates: Vec<Int> = if q0.is_zero() {
                vec![q0]
            } else {
                vec![q0.clone(), -q0]
            };
            for q in q_candidates {
                if q.is_zero() {
                    if !self.b.is_zero() {
                        continue;
                    }
                    if self.a.is_negative() {
                        continue;
                    }
                    let p = self.a.clone().floor_sqrt();
                    if p.clone() * p.clone() != self.a {
                        continue;
                    }
                    for pc in [p.clone(), -p.clone()] {
                        let w = ZRootTwo::new(pc, Int::zero());
                        if w.mul(&w) == *self {
                            return Some(w);
                        }
                    }
                } else {
                    let two_q = Int::from_i64(2) * q.clone();
                    if !divides(&self.b, &two_q) {
                        continue;
                    }
                    let p = self.b.clone() / two_q;
                    let w = ZRootTwo::new(p, q);
                    if w.mul(&w) == *self {
                        return Some(w);
                    }
                }
            }
        }
        None
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

    /// `sim(a,b)` <=> `a|b` and `b|a`, i.e. `a` and `b` differ by a unit.
    #[must_use]
    pub fn sim(&self, other: &Self) -> bool {
        if self.is_zero() || other.is_zero() {
            return self.is_zero() && other.is_zero();
        }
        matches!(self.divmod(other), Some((_, r)) if r.is_zero())
            && matches!(other.divmod(self), Some((_, r)) if r.is_zero())
    }
}

fn is_exact_multiple(n: &Int, d: i64) -> bool {
    n.clone() % Int::from_i64(d) == Int::zero()
}

fn divides(n: &Int, d: &Int) -> bool {
    !d.is_zero() && n.clone() % d.clone() == Int::zero()
}

fn round_ratio(n: &num_bigint::BigInt, d: &num_bigint::BigInt) -> num_bigint::BigInt {
    BigRational::new(n.clone(), d.clone()).round().to_integer()
}

impl fmt::Display for ZRootTwo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({} + {}*sqrt2)", self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_is_multiplicative() {
        let a = ZRootTwo::new(Int::from_i64(3), Int::from_i64(2));
        let b = ZRootTwo::new(Int::from_i64(-1), Int::from_i64(4));
        assert_eq!(a.mul(&b).norm(), a.norm() * b.norm());
    }

    #[test]
    fn conj_is_involution() {
        let a = ZRootTwo::new(Int::from_i64(5), Int::from_i64(-3));
        assert_eq!(a.conj().conj(), a);
    }

    #[test]
    fn divmod_reconstructs_and_shrinks_norm() {
        let a = ZRootTwo::new(Int::from_i64(17), Int::from_i64(5));
        let b = ZRootTwo::new(Int::from_i64(3), Int::from_i64(1));
        let (q, r) = a.divmod(&b).unwrap();
        assert_eq!(q.mul(&b).add(&r), a);
        assert!(r.norm().abs() < b.norm().abs() || r.is_zero());
    }

    #[test]
    fn sqrt_of_perfect_square() {
        let w = ZRootTwo::new(Int::from_i64(3), Int::from_i64(2));
        let squared = w.mul(&w);
        let root = squared.sqrt().expect("should have a root");
        assert!(root == w || root == w.neg());
    }

    #[test]
    fn sqrt_of_non_square_fails() {
        // norm(3 + 0*sqrt2) = 9, sqrt_norm=3, but (3+3)/4 isn't divisible -> no sqrt expected.
        let z = ZRootTwo::new(Int::from_i64(3), Int::from_i64(0));
        assert!(z.sqrt().is_none());
    }

    #[test]
    fn lambda_is_a_unit() {
        let lambda = super::super::lambda();
        assert!(lambda.is_unit());
        let inv = lambda.inv().unwrap();
        assert_eq!(lambda.mul(&inv), ZRootTwo::one());
    }
}
