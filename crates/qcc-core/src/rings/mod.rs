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

//! Exact rings used by the grid-problem solver: `ZRootTwo = Z[sqrt(2)]`,
//! `DRootTwo = Z[sqrt(2), 1/sqrt(2)]`, `ZOmega = Z[omega]` (omega = e^{i*pi/4}),
//! and `DOmega = Z[omega, 1/sqrt(2)]`.

pub mod d_omega;
pub mod d_root_two;
pub mod z_omega;
pub mod z_root_two;

pub use d_omega::DOmega;
pub use d_root_two::DRootTwo;
pub use z_omega::ZOmega;
pub use z_root_two::ZRootTwo;

/// `1 + sqrt(2)`, the fundamental unit of `Z[sqrt(2)]` used throughout the
/// grid solver to rescale one-dimensional grid problems.
#[must_use]
pub fn lambda() -> ZRootTwo {
    ZRootTwo::new(crate::bignum::Int::one(), crate::bignum::Int::one())
}

/// `OMEGA_POWER[k] = omega^k` for `k in 0..8`, expressed in the `(a,b,c,d)`
/// basis of `ZOmega`.
#[must_use]
pub fn omega_power(k: u32) -> ZOmega {
    let k = k % 8;
    let one = crate::bignum::Int::one();
    let zero = crate::bignum::Int::zero();
    let neg_one = || -crate::bignum::Int::one();
    match k {
        0 => ZOmega::new(zero.clone(), zero.clone(), zero.clone(), one),
        1 => ZOmega::new(zero.clone(), zero.clone(), one, zero.clone()),
        2 => ZOmega::new(zero.clone(), one, zero.clone(), zero.clone()),
        3 => ZOmega::new(one, zero.clone(), zero.clone(), zero.clone()),
        4 => ZOmega::new(zero.clone(), zero.clone(), zero.clone(), neg_one()),
        5 => ZOmega::new(zero.clone(), zero.clone(), neg_one(), zero.clone()),
        6 => ZOmega::new(zero.clone(), neg_one(), zero.clone(), zero.clone()),
        7 => ZOmega::new(neg_one(), zero.clone(), zero.clone(), zero.clone()),
        _ => unreachable!(),
    }
}
