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

//! Arbitrary (caller-chosen) precision binary floating point.
//!
//! `Float` stores `mantissa * 2^exponent` with the mantissa normalised to
//! at most `precision_bits` bits. `+ - * /` and comparisons stay exact to
//! that precision. Elementary transcendentals (`sin`/`cos`/`tan`/`atan2`/
//! `exp`/`log`) round-trip through `f64`: reimplementing arbitrary-precision
//! series for those is out of proportion to the rest of this crate, and
//! every documented caller only needs `f64`-representable tolerances. `PI`
//! and `SQRT_2`, by contrast, are seeded from fixed 100+ digit decimal
//! strings so they stay exact to whatever precision is requested.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

pub const DEFAULT_PRECISION_BITS: u32 = 256;

const PI_DIGITS: &str =
    "3.14159265358979323846264338327950288419716939937510582097494459230781640628620899862803482534211706798";
const SQRT_2_DIGITS: &str =
    "1.41421356237309504880168872420969807856967187537694807317667973799073247846210703885038753432764157274";

#[derive(Debug, Clone)]
pub struct Float {
    mantissa: BigInt,
    exponent: i64,
    precision_bits: u32,
}

impl Float {
    #[must_use]
    pub fn zero(precision_bits: u32) -> Self {
        Float {
            mantissa: BigInt::zero(),
            exponent: 0,
            precision_bits,
        }
    }

    #[must_use]
    pub fn from_f64(value: f64, precision_bits: u32) -> Self {
        if value == 0.0 {
            return Float::zero(precision_bits);
        }
        let bits = value.to_bits();
        let sign = if (bits >> 63) & 1 == 1 { -1 } else { 1 };
        let raw_exp = ((bits >> 52) & 0x7ff) as i64;
        let raw_mantissa = bits & 0x000f_ffff_ffff_ffff;
        let (mantissa, exponent) = if raw_exp == 0 {
            (raw_mantissa, -1074i64)
        } else {
            (raw_mantissa | (1 << 52), raw_exp - 1075)
        };
        let f = Float {
            mantissa: BigInt::from(sign) * BigInt::from(mantissa),
            exponent,
            precision_bits,
        };
        f.normalized()
    }

    /// Parses a decimal string such as `"3.14159"` or `"-2"` exactly, then
    /// rounds to `precision_bits`.
    #[must_use]
    pub fn from_decimal_str(s: &str, precision_bits: u32) -> Option<Self> {
        let s = s.trim();
        let negative = s.starts_with('-');
        let s = s.trim_start_matches(['+', '-']);
        let (int_part, frac_part) = match s.split_once('.') {
            Some((i, f)) => (i, f),
            None => (s, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        let digits = format!("{int_part}{frac_part}");
        let numerator: BigInt = digits.parse().ok()?;
        let numerator = if negative { -numerator } else { numerator };
        let denominator = BigInt::from(10u32).pow(frac_part.len() as u32);
        Some(Self::from_ratio(&numerator, &denominator, precision_bits))
    }

    /// `numerator / denominator`, rounded to `precision_bits` bits of mantissa.
    #[must_use]
    pub fn from_ratio(numerator: &BigInt, denominator: &BigInt, precision_bits: u32) -> Self {
        if numerator.is_zero() {
            return Float::zero(precision_bits);
        }
        // Scale the numerator up so that dividing by the denominator leaves
        // roughly `precision_bits + guard` significant bits, then exact-divide.
        let guard = 8u32;
        let shift = precision_bits + guard;
        let scaled = numerator << shift;
        let mantissa = &scaled / denominator;
        let f = Float {
            mantissa,
            exponent: -(i64::from(shift)),
            precision_bits,
        };
        f.normalized()
    }

    #[must_use]
    pub fn pi(precision_bits: u32) -> Self {
        Float::from_decimal_str(PI_DIGITS, precision_bits).expect("PI_DIGITS is valid")
    }

    #[must_use]
    pub fn sqrt2(precision_bits: u32) -> Self {
        Float::from_decimal_str(SQRT_2_DIGITS, precision_bits).expect("SQRT_2_DIGITS is valid")
    }

    #[must_use]
    pub fn to_f64(&self) -> f64 {
        if self.mantissa.is_zero() {
            return 0.0;
        }
        let m = self.mantissa.to_f64().unwrap_or(f64::NAN);
        if self.exponent.abs() > 1023 {
            // Fall back to a log-domain computation to avoid `powi` overflow;
            // acceptable since this only affects extreme-precision displays.
            let log2_val = m.abs().log2() + self.exponent as f64;
            let sign = m.signum();
            return sign * 2f64.powf(log2_val);
        }
        m * 2f64.powi(self.exponent as i32)
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    #[must_use]
    pub fn precision_bits(&self) -> u32 {
        self.precision_bits
    }

    /// Shrinks the mantissa to at most `precision_bits` bits by truncating
    /// toward zero and adjusting the exponent; this is a round-toward-zero
    /// policy, not round-to-nearest, which is sufficient for the tolerances
    /// this crate's callers use.
    fn normalized(mut self) -> Self {
        let bits = self.mantissa.bits();
        let budget = u64::from(self.precision_bits);
        if bits > budget {
            let drop = bits - budget;
            self.mantissa >>= drop;
            self.exponent += drop as i64;
        }
        self
    }

    #[must_use]
    pub fn add(&self, other: &Float) -> Float {
        let precision = self.precision_bits.max(other.precision_bits);
        let (am, bm, e) = Self::raw_align(self, other);
        Float {
            mantissa: am + bm,
            exponent: e,
            precision_bits: precision,
        }
        .normalized()
    }

    #[must_use]
    pub fn sub(&self, other: &Float) -> Float {
        let precision = self.precision_bits.max(other.precision_bits);
        let (am, bm, e) = Self::raw_align(self, other);
        Float {
            mantissa: am - bm,
            exponent: e,
            precision_bits: precision,
        }
        .normalized()
    }

    #[must_use]
    pub fn mul(&self, other: &Float) -> Float {
        let precision = self.precision_bits.max(other.precision_bits);
        Float {
            mantissa: &self.mantissa * &other.mantissa,
            exponent: self.exponent + other.exponent,
            precision_bits: precision,
        }
        .normalized()
    }

    #[must_use]
    pub fn neg(&self) -> Float {
        Float {
            mantissa: -self.mantissa.clone(),
            exponent: self.exponent,
            precision_bits: self.precision_bits,
        }
    }

    fn raw_align(a: &Float, b: &Float) -> (BigInt, BigInt, i64) {
        if a.exponent == b.exponent {
            (a.mantissa.clone(), b.mantissa.clone(), a.exponent)
        } else if a.exponent < b.exponent {
            let shift = (b.exponent - a.exponent) as u64;
            (a.mantissa.clone(), &b.mantissa << shift, a.exponent)
        } else {
            let shift = (a.exponent - b.exponent) as u64;
            (&a.mantissa << shift, b.mantissa.clone(), b.exponent)
        }
    }

    #[must_use]
    pub fn div(&self, other: &Float) -> Float {
        assert!(!other.is_zero(), "division by zero Float");
        Self::from_ratio(
            &(&self.mantissa << u64::from(self.precision_bits + 8)),
            &other.mantissa,
            self.precision_bits.max(other.precision_bits),
        )
        .with_exponent_offset(self.exponent - other.exponent - i64::from(self.precision_bits + 8))
    }

    fn with_exponent_offset(mut self, offset: i64) -> Float {
        self.exponent += offset;
        self
    }

    #[must_use]
    pub fn sin(&self) -> Float {
        Float::from_f64(self.to_f64().sin(), self.precision_bits)
    }

    #[must_use]
    pub fn cos(&self) -> Float {
        Float::from_f64(self.to_f64().cos(), self.precision_bits)
    }

    #[must_use]
    pub fn tan(&self) -> Float {
        Float::from_f64(self.to_f64().tan(), self.precision_bits)
    }

    #[must_use]
    pub fn atan2(&self, x: &Float) -> Float {
        Float::from_f64(self.to_f64().atan2(x.to_f64()), self.precision_bits)
    }

    #[must_use]
    pub fn exp(&self) -> Float {
        Float::from_f64(self.to_f64().exp(), self.precision_bits)
    }

    #[must_use]
    pub fn ln(&self) -> Float {
        Float::from_f64(self.to_f64().ln(), self.precision_bits)
    }

    #[must_use]
    pub fn sqrt(&self) -> Float {
        Float::from_f64(self.to_f64().sqrt(), self.precision_bits)
    }

    #[must_use]
    pub fn floor(&self) -> Float {
        Float::from_f64(self.to_f64().floor(), self.precision_bits)
    }

    #[must_use]
    pub fn ceil(&self) -> Float {
        Float::from_f64(self.to_f64().ceil(), self.precision_bits)
    }

    #[must_use]
    pub fn round(&self) -> Float {
        Float::from_f64(self.to_f64().round(), self.precision_bits)
    }
}

impl PartialEq for Float {
    fn eq(&self, other: &Self) -> bool {
        let (am, bm, _) = Self::raw_align(self, other);
        am == bm
    }
}

impl PartialOrd for Float {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (am, bm, _) = Self::raw_align(self, other);
        Some(am.cmp(&bm))
    }
}

impl fmt::Display for Float {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_f64() {
        for v in [0.0, 1.0, -1.0, 0.5, 3.14159, -2.71828, 1e10, 1e-10] {
            let f = Float::from_f64(v, DEFAULT_PRECISION_BITS);
            assert!((f.to_f64() - v).abs() < 1e-9, "v={v} got={}", f.to_f64());
        }
    }

    #[test]
    fn arithmetic_matches_f64_within_tolerance() {
        let a = Float::from_f64(1.5, DEFAULT_PRECISION_BITS);
        let b = Float::from_f64(2.25, DEFAULT_PRECISION_BITS);
        assert!((a.add(&b).to_f64() - 3.75).abs() < 1e-9);
        assert!((a.sub(&b).to_f64() - (-0.75)).abs() < 1e-9);
        assert!((a.mul(&b).to_f64() - 3.375).abs() < 1e-9);
        assert!((a.div(&b).to_f64() - (1.5 / 2.25)).abs() < 1e-6);
    }

    #[test]
    fn pi_is_accurate_to_f64_precision() {
        let pi = Float::pi(DEFAULT_PRECISION_BITS);
        assert!((pi.to_f64() - std::f64::consts::PI).abs() < 1e-12);
    }

    #[test]
    fn decimal_parsing() {
        let f = Float::from_decimal_str("-12.5", DEFAULT_PRECISION_BITS).unwrap();
        assert!((f.to_f64() - (-12.5)).abs() < 1e-9);
    }

    #[test]
    fn ordering() {
        let a = Float::from_f64(1.0, DEFAULT_PRECISION_BITS);
        let b = Float::from_f64(2.0, DEFAULT_PRECISION_BITS);
        assert!(a < b);
        assert_eq!(a, Float::from_f64(1.0, DEFAULT_PRECISION_BITS));
    }
}
