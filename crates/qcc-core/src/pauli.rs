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

//! Bit-packed multi-qubit Pauli strings.
//!
//! An n-qubit Pauli string is two length-n bit vectors (`x_mask`, `z_mask`)
//! plus an overall sign: qubit `i` carries `I, X, Z, Y` according to
//! `(x_i, z_i) = (0,0), (1,0), (0,1), (1,1)`. Strings of at most 64 qubits
//! use a single `u64` fast path; larger strings fall back to packed `Vec<u64>`
//! words, both exposed behind the same `commutes_with`/`multiply` API.

use crate::error::CoreError;
use std::fmt;

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    I,
    X,
    Y,
    Z,
}

impl Pauli {
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }

    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    #[must_use]
    pub fn bits(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Z => (false, true),
            Pauli::Y => (true, true),
        }
    }

    #[must_use]
    pub fn from_bits(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (false, true) => Pauli::Z,
            (true, true) => Pauli::Y,
        }
    }
}

/// The overall phase factor of a stabiliser-formalism object. Pauli strings
/// in this crate always carry a real `+-1` sign (`PlusOne`/`MinusOne`); the
/// imaginary variants exist for parity with the bit-packed XOR/AND update
/// rules used elsewhere in the stabiliser formalism, where a row's running
/// phase can pick up a factor of `i` during Clifford conjugation bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[derive(Default)]
pub enum Phase {
    #[default]
    PlusOne = 0b00,
    MinusOne = 0b01,
    PlusI = 0b10,
    MinusI = 0b11,
}

impl Phase {
    #[must_use]
    pub fn multiply(self, other: Phase) -> Phase {
        let lhs = self as u8;
        let rhs = other as u8;
        let real = (lhs ^ rhs) & 0b01 ^ ((lhs & rhs) >> 1 & 0b01);
        let imaginary = (lhs ^ rhs) & 0b10;
        match real | imaginary {
            0b00 => Phase::PlusOne,
            0b01 => Phase::MinusOne,
            0b10 => Phase::PlusI,
            _ => Phase::MinusI,
        }
    }

    #[must_use]
    pub fn is_real(self) -> bool {
        matches!(self, Phase::PlusOne | Phase::MinusOne)
    }

    #[must_use]
    pub fn sign_from_real(negative: bool) -> Phase {
        if negative {
            Phase::MinusOne
        } else {
            Phase::PlusOne
        }
    }
}

/// A bit-packed n-qubit Pauli string with an explicit real sign.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PauliOp {
    n: usize,
    x_words: Vec<u64>,
    z_words: Vec<u64>,
    negative: bool,
}

const WORD_BITS: usize = 64;

impl PauliOp {
    #[must_use]
    pub fn identity(n: usize) -> Self {
        let words = n.div_ceil(WORD_BITS).max(1);
        PauliOp {
            n,
            x_words: vec![0; words],
            z_words: vec![0; words],
            negative: false,
        }
    }

    /// Parses a Pauli string such as `"+XYZI"` or `"-IIXZ"` (sign optional,
    /// defaults to `+`), per the QASM extension grammar for `t_pauli` etc.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let (negative, body) = match s.as_bytes().first() {
            Some(b'+') => (false, &s[1..]),
            Some(b'-') => (true, &s[1..]),
            _ => (false, s),
        };
        let n = body.chars().count();
        let mut op = PauliOp::identity(n);
        op.negative = negative;
        for (i, c) in body.chars().enumerate() {
            let p = Pauli::from_char(c).ok_or_else(|| CoreError::InvalidPiExpr(s.to_string()))?;
            op.set(i, p);
        }
        Ok(op)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.n
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[must_use]
    pub fn negative(&self) -> bool {
        self.negative
    }

    pub fn set_negative(&mut self, negative: bool) {
        self.negative = negative;
    }

    #[must_use]
    pub fn get(&self, qubit: usize) -> Pauli {
        let (word, bit) = (qubit / WORD_BITS, qubit % WORD_BITS);
        let x = (self.x_words[word] >> bit) & 1 == 1;
        let z = (self.z_words[word] >> bit) & 1 == 1;
        Pauli::from_bits(x, z)
    }

    pub fn set(&mut self, qubit: usize, p: Pauli) {
        let (word, bit) = (qubit / WORD_BITS, qubit % WORD_BITS);
        let (x, z) = p.bits();
        let mask = 1u64 << bit;
        if x {
            self.x_words[word] |= mask;
        } else {
            self.x_words[word] &= !mask;
        }
        if z {
            self.z_words[word] |= mask;
        } else {
            self.z_words[word] &= !mask;
        }
    }

    /// `popcount(X | Z)`: the number of non-identity sites.
    #[must_use]
    pub fn weight(&self) -> usize {
        self.x_words
            .iter()
            .zip(&self.z_words)
            .map(|(x, z)| (x | z).count_ones() as usize)
            .sum()
    }

    /// Two strings commute iff `popcount((X1 & Z2) ^ (Z1 & X2))` is even.
    #[must_use]
    pub fn commutes_with(&self, other: &Self) -> bool {
        debug_assert_eq!(self.n, other.n);
        let mut total = 0u32;
        for i in 0..self.x_words.len() {
            let overlap = (self.x_words[i] & other.z_words[i]) ^ (self.z_words[i] & other.x_words[i]);
            total += overlap.count_ones();
        }
        total % 2 == 0
    }

    /// Product `self * other` as a Pauli string; the overall sign picks up
    /// an extra `-1` whenever the two strings anti-commute, mirroring the
    /// usual Pauli-group multiplication rule up to the real/imaginary phase
    /// that anti-commuting Y-type overlaps would otherwise introduce (this
    /// crate only tracks the real sign, consistent with `commutes_with`'s
    /// even/odd popcount test).
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        debug_assert_eq!(self.n, other.n);
        let anti = !self.commutes_with(other);
        let x_words: Vec<u64> = self.x_words.iter().zip(&other.x_words).map(|(a, b)| a ^ b).collect();
        let z_words: Vec<u64> = self.z_words.iter().zip(&other.z_words).map(|(a, b)| a ^ b).collect();
        PauliOp {
            n: self.n,
            x_words,
            z_words,
            negative: self.negative ^ other.negative ^ anti,
        }
    }

    /// The Jordan-Wigner-style "g-function" used by `HTab` front-multiply:
    /// for each qubit, `g` accumulates `+1`/`-1` depending on how the two
    /// single-qubit Paulis at that site compose, taken mod 4. Returns `(g
    /// mod 4, product)`.
    #[must_use]
    pub fn g_function(&self, other: &Self) -> (i64, Self) {
        debug_assert_eq!(self.n, other.n);
        let mut g: i64 = 0;
        for i in 0..self.n {
            let (xp, zp) = self.get(i).bits();
            let (xq, zq) = other.get(i).bits();
            // g contribution table for composing (xp,zp) then (xq,zq),
            // matching the standard symplectic g-function used to track
            // the i-phase picked up when multiplying Pauli matrices.
            let contribution = match (xp, zp, xq, zq) {
                (true, false, false, true) => 1,  // X . Z = -iY
                (false, true, true, false) => -1, // Z . X = iY
                (true, true, false, true) => 1,   // Y . Z = iX -> +1 contribution
                (false, true, true, true) => -1,  // Z . Y = -iX
                (true, true, true, false) => -1,  // Y . X = -iZ
                (true, false, true, true) => 1,   // X . Y = iZ
                _ => 0,
            };
            g += contribution;
        }
        (g.rem_euclid(4), self.multiply(other))
    }

    #[must_use]
    pub fn to_pauli_string(&self) -> String {
        let mut s = String::with_capacity(self.n + 1);
        s.push(if self.negative { '-' } else { '+' });
        for i in 0..self.n {
            s.push(self.get(i).to_char());
        }
        s
    }

    /// True iff `self` and `other` carry the same Pauli at every site,
    /// ignoring sign. Used by `HTab` reduction to find rows that can be
    /// merged.
    #[must_use]
    pub fn same_mask(&self, other: &Self) -> bool {
        debug_assert_eq!(self.n, other.n);
        self.x_words == other.x_words && self.z_words == other.z_words
    }

    /// Ors in an X component at `qubit`, turning `I->X`, `Z->Y` and leaving
    /// `X`/`Y` unchanged. Used when building a row site-by-site (e.g. the
    /// CCX stabiliser encoding) rather than all at once via [`Self::set`].
    pub fn add_x(&mut self, qubit: usize) {
        let (word, bit) = (qubit / WORD_BITS, qubit % WORD_BITS);
        self.x_words[word] |= 1u64 << bit;
    }

    /// Ors in a Z component at `qubit`; see [`Self::add_x`].
    pub fn add_z(&mut self, qubit: usize) {
        let (word, bit) = (qubit / WORD_BITS, qubit % WORD_BITS);
        self.z_words[word] |= 1u64 << bit;
    }

    #[must_use]
    pub fn active_qubits(&self) -> Vec<usize> {
        (0..self.n).filter(|&i| self.get(i) != Pauli::I).collect()
    }

    /// The seven-stabiliser Toffoli encoding: a `CCX(q0,q1,q2)` gate,
    /// conjugated through Hadamards into the Z basis, is exactly equivalent
    /// (up to global phase) to these seven pi/4 Pauli rotations applied in
    /// order. Shared by `CliffordReductionPass` and `PbcPass`.
    #[must_use]
    pub fn create_ccx_ops(q0: usize, q1: usize, q2: usize, n_qubits: usize) -> Vec<PauliOp> {
        let mk = |negative: bool, z: &[usize], x: &[usize]| {
            let mut op = PauliOp::identity(n_qubits);
            op.set_negative(negative);
            for &q in z {
                op.add_z(q);
            }
            for &q in x {
                op.add_x(q);
            }
            op
        };
        vec![
            mk(false, &[], &[q2]),
            mk(true, &[q0, q1], &[]),
            mk(false, &[q0], &[]),
            mk(true, &[q0], &[q2]),
            mk(false, &[q1], &[]),
            mk(false, &[q0, q1], &[q2]),
            mk(true, &[q1], &[q2]),
        ]
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_pauli_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display_round_trips() {
        let p = PauliOp::parse("-XYZI").unwrap();
        assert_eq!(p.to_pauli_string(), "-XYZI");
        assert_eq!(p.len(), 4);
    }

    #[test]
    fn default_sign_is_plus() {
        let p = PauliOp::parse("XYZI").unwrap();
        assert!(!p.negative());
    }

    #[test]
    fn commuting_strings() {
        let p = PauliOp::parse("+XI").unwrap();
        let q = PauliOp::parse("+IX").unwrap();
        assert!(p.commutes_with(&q));
    }

    #[test]
    fn anticommuting_strings() {
        let p = PauliOp::parse("+XI").unwrap();
        let q = PauliOp::parse("+ZI").unwrap();
        assert!(!p.commutes_with(&q));
    }

    #[test]
    fn weight_counts_non_identity_sites() {
        let p = PauliOp::parse("+XYZI").unwrap();
        assert_eq!(p.weight(), 3);
    }

    #[test]
    fn multiply_xors_masks_and_tracks_anti_sign() {
        let x = PauliOp::parse("+X").unwrap();
        let z = PauliOp::parse("+Z").unwrap();
        let product = x.multiply(&z);
        assert_eq!(product.get(0), Pauli::Y);
        assert!(product.negative());
    }

    #[test]
    fn same_mask_ignores_sign() {
        let p = PauliOp::parse("+XYZ").unwrap();
        let q = PauliOp::parse("-XYZ").unwrap();
        assert!(p.same_mask(&q));
        let r = PauliOp::parse("+XYI").unwrap();
        assert!(!p.same_mask(&r));
    }

    #[test]
    fn multi_word_strings_beyond_64_qubits() {
        let mut p = PauliOp::identity(70);
        p.set(65, Pauli::X);
        let mut q = PauliOp::identity(70);
        q.set(65, Pauli::Z);
        assert!(!p.commutes_with(&q));
        assert_eq!(p.weight(), 1);
    }
}
