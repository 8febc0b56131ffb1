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

//! Arbitrary-precision signed integers.
//!
//! A thin newtype over [`num_bigint::BigInt`] plus the handful of
//! number-theoretic extras the rest of the crate needs: gcd, popcount,
//! trailing-zeros, modular exponentiation, shifts, and a probabilistic
//! primality test.

use num_bigint::{BigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Rem, Sub};

/// An arbitrary-precision signed integer.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Int(pub BigInt);

impl Int {
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Int(BigInt::from(n))
    }

    #[must_use]
    pub fn zero() -> Self {
        Int(BigInt::zero())
    }

    #[must_use]
    pub fn one() -> Self {
        Int(BigInt::one())
    }

    /// Parses a decimal string, e.g. `"-12345"`.
    pub fn from_decimal_str(s: &str) -> Option<Self> {
        s.trim().parse::<BigInt>().ok().map(Int)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    #[must_use]
    pub fn abs(&self) -> Self {
        Int(self.0.abs())
    }

    #[must_use]
    pub fn signum(&self) -> i32 {
        match self.0.sign() {
            Sign::Minus => -1,
            Sign::NoSign => 0,
            Sign::Plus => 1,
        }
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        self.0.to_f64().unwrap_or(f64::NAN)
    }

    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    /// Euclidean GCD; result is always non-negative.
    #[must_use]
    pub fn gcd(&self, other: &Self) -> Self {
        Int(self.0.gcd(&other.0))
    }

    /// Number of set bits in the two's-complement magnitude (i.e. popcount
    /// of `|self|`). Used only on non-negative operands by callers.
    #[must_use]
    pub fn popcount(&self) -> u64 {
        let (_, bytes) = self.0.to_bytes_le();
        bytes.iter().map(|b| u64::from(b.count_ones())).sum()
    }

    /// Number of trailing zero bits of `|self|`, or `None` if `self == 0`.
    #[must_use]
    pub fn trailing_zeros(&self) -> Option<u64> {
        if self.is_zero() {
            return None;
        }
        let (_, bytes) = self.0.to_bytes_le();
        let mut count = 0u64;
        for b in &bytes {
            if *b == 0 {
                count += 8;
            } else {
                count += u64::from(b.trailing_zeros());
                return Some(count);
            }
        }
        Some(count)
    }

    #[must_use]
    pub fn shl(&self, bits: u64) -> Self {
        Int(&self.0 << bits)
    }

    #[must_use]
    pub fn shr(&self, bits: u64) -> Self {
        Int(&self.0 >> bits)
    }

    /// `self^exp` for a small non-negative exponent (unrelated to modular
    /// exponentiation; used for scaling ring elements by powers of two).
    #[must_use]
    pub fn pow_u32(&self, exp: u32) -> Self {
        let mut result = Int::one();
        let mut base = self.clone();
        let mut e = exp;
        while e > 0 {
            if e & 1 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            e >>= 1;
        }
        result
    }

    /// `self^exp mod modulus`, for non-negative `exp` and positive `modulus`.
    #[must_use]
    pub fn modpow(&self, exp: &Self, modulus: &Self) -> Self {
        Int(self.0.modpow(&exp.0, &modulus.0))
    }

    /// Integer floor square root via the underlying arbitrary-precision library.
    ///
    /// # Panics
    /// Panics if `self` is negative.
    #[must_use]
    pub fn floor_sqrt(&self) -> Self {
        assert!(!self.is_negative(), "floor_sqrt of a negative integer");
        Int(self.0.sqrt())
    }

    /// `(n, r)` with `y^n <= self < y^{n+1}` and `r = self / y^n`, for
    /// positive `self` and `y > 1`. Implemented by repeated squaring up
    /// followed by a peel-off down, so no precision is lost to floating
    /// point along the way.
    ///
    /// # Panics
    /// Panics if `self <= 0` or `y <= 1`.
    #[must_use]
    pub fn floor_log(&self, y: &Self) -> (u64, Self) {
        assert!(self.0 > BigInt::zero(), "floor_log requires a positive x");
        assert!(y.0 > BigInt::one(), "floor_log requires y > 1");

        // Square up: powers[i] = y^(2^i), stopping once the next square would
        // exceed x.
        let mut powers = vec![y.clone()];
        loop {
            let squared = Int(powers.last().unwrap().0.clone() * powers.last().unwrap().0.clone());
            if squared.0 <= self.0 {
                powers.push(squared);
            } else {
                break;
            }
        }

        // Peel off from the largest computed power down to y^(2^0), akin to
        // reading off the binary digits of n = floor(log_y(x)).
        let mut n: u64 = 0;
        let mut remaining = self.clone();
        for (i, p) in powers.iter().enumerate().rev() {
            if p.0 <= remaining.0 {
                remaining = Int(&remaining.0 / &p.0);
                n += 1u64 << i;
            }
        }
        (n, remaining)
    }

    /// Single-round (one witness) Miller–Rabin-style probable-primality
    /// test.
    ///
    /// This deliberately performs only one round, mirroring the original
    /// `_is_prime` behaviour documented as an open question in the design
    /// notes: callers that need confidence retry with fresh witnesses (the
    /// Diophantine step does exactly this by trying the next candidate on
    /// failure), so the weaker single-round test is not independently
    /// reliable but is safe in context.
    #[must_use]
    pub fn is_probably_prime(&self, witness: &Self) -> bool {
        if self.0 < BigInt::from(2) {
            return false;
        }
        if self.0 == BigInt::from(2) || self.0 == BigInt::from(3) {
            return true;
        }
        if (&self.0 % BigInt::from(2)).is_zero() {
            return false;
        }

        let n_minus_one = &self.0 - BigInt::one();
        let mut d = n_minus_one.clone();
        let mut r = 0u32;
        while (&d % BigInt::from(2)).is_zero() {
            d /= BigInt::from(2);
            r += 1;
        }

        let a = &witness.0 % &n_minus_one + BigInt::from(2);
        let mut x = a.modpow(&d, &self.0);
        if x == BigInt::one() || x == n_minus_one {
            return true;
        }
        for _ in 0..r.saturating_sub(1) {
            x = (&x * &x) % &self.0;
            if x == n_minus_one {
                return true;
            }
        }
        false
    }
}

impl fmt::Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Int {
    type Output = Int;
    fn add(self, rhs: Int) -> Int {
        Int(self.0 + rhs.0)
    }
}

impl Sub for Int {
    type Output = Int;
    fn sub(self, rhs: Int) -> Int {
        Int(self.0 - rhs.0)
    }
}

impl Mul for Int {
    type Output = Int;
    fn mul(self, rhs: Int) -> Int {
        Int(self.0 * rhs.0)
    }
}

impl Div for Int {
    type Output = Int;
    fn div(self, rhs: Int) -> Int {
        Int(self.0 / rhs.0)
    }
}

impl Rem for Int {
    type Output = Int;
    fn rem(self, rhs: Int) -> Int {
        Int(self.0 % rhs.0)
    }
}

impl Neg for Int {
    type Output = Int;
    fn neg(self) -> Int {
        Int(-self.0)
    }
}

impl From<i64> for Int {
    fn from(n: i64) -> Self {
        Int::from_i64(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gcd_basic() {
        assert_eq!(Int::from_i64(12).gcd(&Int::from_i64(18)), Int::from_i64(6));
        assert_eq!(Int::from_i64(0).gcd(&Int::from_i64(5)), Int::from_i64(5));
    }

    #[test]
    fn popcount_and_trailing_zeros() {
        assert_eq!(Int::from_i64(0b1011).popcount(), 3);
        assert_eq!(Int::from_i64(0b1000).trailing_zeros(), Some(3));
        assert_eq!(Int::from_i64(0).trailing_zeros(), None);
    }

    #[test]
    fn floor_sqrt_exact_and_inexact() {
        assert_eq!(Int::from_i64(16).floor_sqrt(), Int::from_i64(4));
        assert_eq!(Int::from_i64(17).floor_sqrt(), Int::from_i64(4));
        assert_eq!(Int::from_i64(1).floor_sqrt(), Int::from_i64(1));
    }

    #[test]
    fn floor_log_basic() {
        let (n, r) = Int::from_i64(100).floor_log(&Int::from_i64(2));
        assert_eq!(n, 6); // 2^6 = 64 <= 100 < 128 = 2^7
        assert_eq!(r, Int::from_i64(100) / Int::from_i64(64));
    }

    #[test]
    fn modpow_matches_naive() {
        let base = Int::from_i64(4);
        let exp = Int::from_i64(13);
        let modulus = Int::from_i64(497);
        assert_eq!(base.modpow(&exp, &modulus), Int::from_i64(445));
    }

    #[test]
    fn small_primes_detected() {
        let witness = Int::from_i64(2);
        for p in [2i64, 3, 5, 7, 11, 13, 101, 7919] {
            assert!(Int::from_i64(p).is_probably_prime(&witness), "{p} should be prime");
        }
        for c in [4i64, 6, 8, 9, 100] {
            assert!(!Int::from_i64(c).is_probably_prime(&witness), "{c} should be composite");
        }
    }
}
