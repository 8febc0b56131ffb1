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

//! A small embedded grammar for "pi expressions": strings of the form
//! `[sign][coeff][*]?pi[/denom]`, e.g. `"pi"`, `"-pi/4"`, `"2*pi"`,
//! `"0.75pi/8"`. Used by the CLI's `gridsynth ANGLE` argument and by the
//! QASM printer's inverse (parsing back printed `pi`-form parameters).

use crate::float::{Float, DEFAULT_PRECISION_BITS};

/// Parses a pi-expression to a high-precision value, returned as `f64`
/// (every caller of this grammar ultimately consumes an `f64` angle).
#[must_use]
pub fn parse_pi_expr(input: &str) -> Option<f64> {
    let s = input.trim();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'+') => (1.0, &s[1..]),
        Some(b'-') => (-1.0, &s[1..]),
        _ => (1.0, s),
    };

    let pi_pos = rest.find("pi")?;
    let (coeff_part, after_pi) = (&rest[..pi_pos], &rest[pi_pos + 2..]);
    let coeff_part = coeff_part.trim_end_matches('*');

    let coeff = if coeff_part.is_empty() {
        1.0
    } else {
        coeff_part.parse::<f64>().ok()?
    };

    let denom = if let Some(slash) = after_pi.strip_prefix('/') {
        slash.parse::<f64>().ok()?
    } else if after_pi.is_empty() {
        1.0
    } else {
        return None;
    };
    if denom == 0.0 {
        return None;
    }

    let pi = Float::pi(DEFAULT_PRECISION_BITS).to_f64();
    Some(sign * coeff * pi / denom)
}

/// Parses an angle given either as a plain decimal (`"1.2345"`) or a
/// pi-expression (`"pi/4"`), per the CLI contract for `gridsynth ANGLE`.
#[must_use]
pub fn parse_angle(input: &str) -> Option<f64> {
    let s = input.trim();
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }
    parse_pi_expr(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn bare_pi() {
        assert!((parse_pi_expr("pi").unwrap() - PI).abs() < 1e-12);
        assert!((parse_pi_expr("-pi").unwrap() + PI).abs() < 1e-12);
    }

    #[test]
    fn pi_over_denom() {
        assert!((parse_pi_expr("pi/4").unwrap() - PI / 4.0).abs() < 1e-12);
        assert!((parse_pi_expr("-pi/4").unwrap() + PI / 4.0).abs() < 1e-12);
        assert!((parse_pi_expr("7pi/4").unwrap() - 7.0 * PI / 4.0).abs() < 1e-11);
    }

    #[test]
    fn coefficient_forms() {
        assert!((parse_pi_expr("2pi").unwrap() - 2.0 * PI).abs() < 1e-11);
        assert!((parse_pi_expr("2*pi").unwrap() - 2.0 * PI).abs() < 1e-11);
        assert!((parse_pi_expr("0.5*pi/3").unwrap() - 0.5 * PI / 3.0).abs() < 1e-11);
    }

    #[test]
    fn decimal_or_pi() {
        assert!((parse_angle("1.2345").unwrap() - 1.2345).abs() < 1e-12);
        assert!((parse_angle("pi/2").unwrap() - PI / 2.0).abs() < 1e-12);
        assert!(parse_angle("not-a-number").is_none());
    }
}
