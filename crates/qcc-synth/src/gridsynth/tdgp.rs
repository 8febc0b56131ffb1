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

//! The two-dimensional grid problem: enumerate candidates `z in D[omega]`
//! at a given denominator scale whose real and imaginary parts lie in the
//! axis-aligned bounding box of the target region, via two coupled
//! one-dimensional grid problems (one per coordinate).

use super::odgp::solve_odgp;
use super::region::{EpsilonRegion, UnitDisk};
use qcc_core::{DOmega, ZOmega, ZRootTwo};

const SQRT2: f64 = std::f64::consts::SQRT_2;

/// Combines `x + i*y` for `x, y in Z[sqrt(2)]` into the equivalent exact
/// `Z[omega]` element (`i = omega^2`). This is the point where the
/// real/imaginary coordinatewise search re-assembles into the ring the
/// rest of the solver works in.
fn combine_real_imag(x: &ZRootTwo, y: &ZRootTwo) -> ZOmega {
    let (a0, b0) = (x.a.clone(), x.b.clone());
    let (c0, d0) = (y.a.clone(), y.b.clone());
    ZOmega::new(d0.clone() - b0.clone(), c0, b0 + d0, a0)
}

/// Real and imaginary parts of `u`, evaluated at `omega = e^{i*pi/4}`.
fn zomega_re_im(u: &ZOmega) -> (f64, f64) {
    let frac = std::f64::consts::FRAC_1_SQRT_2;
    let (a, b, c, d) = (u.a.to_f64(), u.b.to_f64(), u.c.to_f64(), u.d.to_f64());
    let re = a * (-frac) + c * frac + d;
    let im = a * frac + b + c * frac;
    (re, im)
}

/// The axis-aligned bounding box of the rotated ellipse `semi_major,
/// semi_minor` at `angle`, centered at `(cx, cy)`.
fn bounding_box(semi_major: f64, semi_minor: f64, angle: f64, cx: f64, cy: f64) -> (f64, f64, f64, f64) {
    let half_w = ((semi_major * angle.cos()).powi(2) + (semi_minor * angle.sin()).powi(2)).sqrt();
    let half_h = ((semi_major * angle.sin()).powi(2) + (semi_minor * angle.cos()).powi(2)).sqrt();
    (cx - half_w, cx + half_w, cy - half_h, cy + half_h)
}

/// Every candidate `z = u / sqrt(2)^scale` (`u in Z[omega]`) whose real and
/// imaginary parts fall in the region's bounding box at the given scale
/// and that passes the exact region-membership check.
#[must_use]
pub fn enumerate_candidates(region: &EpsilonRegion, _disk: &UnitDisk, scale: u32) -> Vec<DOmega> {
    let s = SQRT2.powi(scale as i32);
    let (x_lo, x_hi, y_lo, y_hi) = {
        let (semi_major, semi_minor, angle) = region.ellipse.axes();
        bounding_box(semi_major, semi_minor, angle, region.ellipse.cx, region.ellipse.cy)
    };

    let i_x = (x_lo * s, x_hi * s);
    let i_y = (y_lo * s, y_hi * s);
    // The companion unit disk bounds the Galois-conjugate embedding; its
    // own bounding box is simply [-1,1]^2, scaled the same way.
    let j_x = (-s, s);
    let j_y = (-s, s);

    let xs = solve_odgp(i_x, j_x);
    let ys = solve_odgp(i_y, j_y);
    if xs.len() * ys.len() > 2_000_000 {
        return Vec::new();
    }

    let mut out = Vec::new();
    for x in &xs {
        for y in &ys {
            let u = combine_real_imag(x, y);
            let (re, im) = zomega_re_im(&u);
            let z_approx = (re / s, im / s);
            if region.inside(z_approx) {
                out.push(DOmega::new(u, scale));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn combine_matches_direct_evaluation() {
        let x = ZRootTwo::new(qcc_core::Int::from_i64(1), qcc_core::Int::from_i64(0));
        let y = ZRootTwo::new(qcc_core::Int::from_i64(0), qcc_core::Int::from_i64(1));
        let u = combine_real_imag(&x, &y);
        let (re, im) = zomega_re_im(&u);
        assert!((re - 1.0).abs() < 1e-9);
        assert!((im - std::f64::consts::SQRT_2).abs() < 1e-9);
    }

    #[test]
    fn finds_at_least_one_candidate_at_a_large_enough_scale() {
        let region = EpsilonRegion::new(PI / 4.0, 0.2);
        let disk = UnitDisk;
        let mut found = false;
        for scale in 0..12 {
            if !enumerate_candidates(&region, &disk, scale).is_empty() {
                found = true;
                break;
            }
        }
        assert!(found, "expected some scale to yield a candidate for a moderate epsilon");
    }
}
