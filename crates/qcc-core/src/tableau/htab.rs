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

//! `HTab`: a flat list of Pauli-rotation rows, each tagged with the angle
//! it encodes (`T` = pi/4, `S` = pi/2, `Z` = pi). Used by `TfusePass` to
//! find and merge co-located rotations ("T-fusion"). Invalidated rows are
//! left in place as tombstones so row indices stay stable; every public
//! iterator skips them.

use crate::pauli::PauliOp;

/// The rotation angle a row encodes, in ascending order of "rank": fusing
/// two equal rows promotes one rank (`T+T -> S`, `S+S -> Z`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowType {
    T,
    S,
    Z,
}

struct Row {
    op: PauliOp,
    kind: RowType,
    valid: bool,
}

#[derive(Default)]
pub struct HTab {
    rows: Vec<Row>,
}

impl HTab {
    #[must_use]
    pub fn new() -> Self {
        HTab { rows: Vec::new() }
    }

    pub fn push(&mut self, op: PauliOp, kind: RowType) {
        self.rows.push(Row { op, kind, valid: true });
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.iter().filter(|r| r.valid).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Does `p` commute with every valid row currently stored?
    #[must_use]
    pub fn commutes_with_all(&self, p: &PauliOp) -> bool {
        self.rows.iter().filter(|r| r.valid).all(|r| p.commutes_with(&r.op))
    }

    /// Front-multiplies every valid row by `p`: rows that anti-commute
    /// with `p` are replaced by `p * row`, with the sign rule
    /// `r(Q') = r(Q) ^ r(P) ^ (g/2 mod 2)` from the g-function; rows that
    /// commute are left unchanged.
    pub fn front_multiply(&mut self, p: &PauliOp) {
        for row in self.rows.iter_mut().filter(|r| r.valid) {
            let (g, product) = p.g_function(&row.op);
            if g % 2 != 0 {
                let half_odd = (g.div_euclid(2)).rem_euclid(2) != 0;
                let sign = row.op.negative() ^ p.negative() ^ half_odd;
                let mut updated = product;
                updated.set_negative(sign);
                row.op = updated;
            }
        }
    }

    /// Reduction: repeatedly pairs up valid rows with identical X/Z masks.
    /// Equal sign promotes the rank (`T+T -> S`, `S+S -> Z`) and
    /// invalidates the partner; `Z+Z` with equal sign is a `2*pi` rotation
    /// and both rows cancel. Opposite signs always cancel both rows,
    /// regardless of rank.
    pub fn reduce(&mut self) {
        let n = self.rows.len();
        for i in 0..n {
            if !self.rows[i].valid {
                continue;
            }
            for j in (i + 1)..n {
                if !self.rows[j].valid || self.rows[i].kind != self.rows[j].kind {
                    continue;
                }
                if !self.rows[i].op.same_mask(&self.rows[j].op) {
                    continue;
                }
                if self.rows[i].op.negative() == self.rows[j].op.negative() {
                    match self.rows[i].kind {
                        RowType::T => self.rows[i].kind = RowType::S,
                        RowType::S => self.rows[i].kind = RowType::Z,
                        RowType::Z => self.rows[i].valid = false,
                    }
                } else {
                    self.rows[i].valid = false;
                }
                self.rows[j].valid = false;
                break;
            }
        }
    }

    fn rows_of_kind(&self, kind: RowType) -> impl Iterator<Item = &PauliOp> {
        self.rows.iter().filter(move |r| r.valid && r.kind == kind).map(|r| &r.op)
    }

    #[must_use]
    pub fn t_rows(&self) -> Vec<PauliOp> {
        self.rows_of_kind(RowType::T).cloned().collect()
    }

    #[must_use]
    pub fn s_rows(&self) -> Vec<PauliOp> {
        self.rows_of_kind(RowType::S).cloned().collect()
    }

    #[must_use]
    pub fn z_rows(&self) -> Vec<PauliOp> {
        self.rows_of_kind(RowType::Z).cloned().collect()
    }

    /// All valid rows with their kind, in original insertion order.
    #[must_use]
    pub fn valid_rows(&self) -> Vec<(PauliOp, RowType)> {
        self.rows.iter().filter(|r| r.valid).map(|r| (r.op.clone(), r.kind)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commutes_with_all_over_empty_tableau() {
        let tab = HTab::new();
        let p = PauliOp::parse("+XIZ").unwrap();
        assert!(tab.commutes_with_all(&p));
    }

    #[test]
    fn commutes_with_all_detects_anticommuting_row() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+ZI").unwrap(), RowType::T);
        assert!(!tab.commutes_with_all(&PauliOp::parse("+XI").unwrap()));
        assert!(tab.commutes_with_all(&PauliOp::parse("+ZI").unwrap()));
    }

    #[test]
    fn identical_t_rows_fuse_to_s() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+XIZ").unwrap(), RowType::T);
        tab.push(PauliOp::parse("+XIZ").unwrap(), RowType::T);
        tab.reduce();
        assert_eq!(tab.len(), 1);
        assert_eq!(tab.s_rows().len(), 1);
        assert!(tab.t_rows().is_empty());
    }

    #[test]
    fn opposite_sign_rows_cancel() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+XIZ").unwrap(), RowType::T);
        tab.push(PauliOp::parse("-XIZ").unwrap(), RowType::T);
        tab.reduce();
        assert_eq!(tab.len(), 0);
    }

    #[test]
    fn double_fusion_reaches_z() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+XIZ").unwrap(), RowType::S);
        tab.push(PauliOp::parse("+XIZ").unwrap(), RowType::S);
        tab.reduce();
        assert_eq!(tab.z_rows().len(), 1);
    }

    #[test]
    fn front_multiply_updates_anticommuting_rows_only() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+ZI").unwrap(), RowType::T);
        tab.push(PauliOp::parse("+IX").unwrap(), RowType::T);
        tab.front_multiply(&PauliOp::parse("+XI").unwrap());
        let rows = tab.valid_rows();
        // +XI anti-commutes with +ZI (product Y on qubit 0) but commutes with +IX.
        assert_eq!(rows[0].0.get(0), crate::pauli::Pauli::Y);
        assert_eq!(rows[1].0.to_pauli_string(), "+IX");
    }

    #[test]
    fn distinct_masks_do_not_merge() {
        let mut tab = HTab::new();
        tab.push(PauliOp::parse("+XI").unwrap(), RowType::T);
        tab.push(PauliOp::parse("+IX").unwrap(), RowType::T);
        tab.reduce();
        assert_eq!(tab.len(), 2);
    }
}
