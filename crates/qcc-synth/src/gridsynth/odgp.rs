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

//! The one-dimensional grid problem: enumerate `beta = a + b*sqrt(2) in
//! Z[sqrt(2)]` with `beta` in a real interval `I` and its Galois conjugate
//! `beta* = a - b*sqrt(2)` in a real interval `J`.

use qcc_core::{Int, ZRootTwo};

const SQRT2: f64 = std::f64::consts::SQRT_2;

/// Every solution of the one-dimensional grid problem for `I x J`.
///
/// `b` ranges over the (necessarily finite) band implied by `I - J`, and
/// for each `b` the admissible `a` values fall out of intersecting the two
/// shifted copies of `I`/`J`; both bounds collapse to an interval of width
/// `< 1` once the caller has scaled `I`/`J` down to `O(1)` width (the
/// standard grid-problem rescale-by-`LAMBDA^n` step, performed by the
/// caller before invoking this function), so in practice at most a
/// handful of `a` values are emitted per `b`.
#[must_use]
pub fn solve_odgp(i: (f64, f64), j: (f64, f64)) -> Vec<ZRootTwo> {
    let (i_lo, i_hi) = i;
    let (j_lo, j_hi) = j;
    if i_hi < i_lo || j_hi < j_lo {
        return Vec::new();
    }
    let b_lo = ((i_lo - j_hi) / (2.0 * SQRT2)).floor() as i64;
    let b_hi = ((i_hi - j_lo) / (2.0 * SQRT2)).ceil() as i64;
    let mut out = Vec::new();
    if b_hi - b_lo > 1_000_000 {
        // Caller failed to narrow the interval; refuse to enumerate an
        // unbounded band rather than hang.
        return out;
    }
    for b in b_lo..=b_hi {
        let bf = b as f64;
        let a_lo = (i_lo - bf * SQRT2).max(j_lo + bf * SQRT2);
        let a_hi = (i_hi - bf * SQRT2).min(j_hi + bf * SQRT2);
        if a_hi < a_lo {
            continue;
        }
        let a_start = a_lo.ceil() as i64;
        let a_end = a_hi.floor() as i64;
        for a in a_start..=a_end {
            out.push(ZRootTwo::new(Int::from_i64(a), Int::from_i64(b)));
        }
    }
    out
}

/// As [`solve_odgp`], restricted to the coset `beta ≡ parity_target (mod
/// sqrt2*Z[sqrt2])` when `parity` is `Some` — i.e. `a mod 2 ==
/// parity_target`. Used when a candidate must align with an already-fixed
/// low-order bit from a previous stage.
#[must_use]
pub fn solve_odgp_with_parity(i: (f64, f64), j: (f64, f64), parity_target: Option<i64>) -> Vec<ZRootTwo> {
    let all = solve_odgp(i, j);
    match parity_target {
        None => all,
        Some(target) => all
            .into_iter()
            .filter(|beta| {
                beta.a.to_i64().map(|a| a.rem_euclid(2) == target.rem_euclid(2)).unwrap_or(false)
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_solution() {
        // beta = 3 + 1*sqrt2 ~= 4.414, beta* = 3 - 1*sqrt2 ~= 1.586.
        let sols = solve_odgp((4.0, 4.5), (1.5, 1.7));
        assert!(sols.contains(&ZRootTwo::new(Int::from_i64(3), Int::from_i64(1))));
    }

    #[test]
    fn empty_when_intervals_are_degenerate() {
        assert!(solve_odgp((2.0, 1.0), (0.0, 1.0)).is_empty());
    }

    #[test]
    fn parity_filter_keeps_only_matching_coset() {
        let sols = solve_odgp_with_parity((0.0, 10.0), (-10.0, 10.0), Some(0));
        assert!(sols.iter().all(|b| b.a.to_i64().unwrap().rem_euclid(2) == 0));
    }
}
