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

//! [`Operation`]: the gate/measurement/Pauli-rotation sum type that a
//! [`crate::Circuit`] is a sequence of.

use qcc_core::PauliOp;
use std::fmt;

/// The concrete gate/meta-op families a [`Operation`] can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpType {
    // Clifford singles
    X,
    Y,
    Z,
    H,
    S,
    Sdg,
    Sx,
    Sxdg,
    Id,
    // T-family; `P4`/`P8`/`P16` carry a denominator of 4/8/16 and are
    // modulated by `Operation::dagger`/`Operation::x_rotation`.
    T,
    Tdg,
    P4,
    P8,
    P16,
    // Parameterised singles
    Rx,
    Ry,
    Rz,
    P,
    U,
    U1,
    U2,
    U3,
    // Two-qubit Cliffords
    Cx,
    Cy,
    Cz,
    Ch,
    Cs,
    Csdg,
    Ct,
    Ctdg,
    Csx,
    Swap,
    Ecr,
    // Parameterised two-qubit
    Crx,
    Cry,
    Crz,
    Cp,
    Cu,
    Cu1,
    Cu3,
    Rxx,
    Ryy,
    Rzz,
    // Three-qubit
    Ccx,
    Cswap,
    Rccx,
    // Meta
    Measure,
    Reset,
    Barrier,
    // Pauli-rotation extensions
    TPauli,
    SPauli,
    ZPauli,
    MPauli,
    SwapBasis,
}

impl OpType {
    /// Canonical lowercase name, as printed by the QASM serializer and used
    /// as a `count_ops()` histogram key. `P4`/`P8`/`P16` fold in the
    /// `dagger`/`x_rotation` flags carried on the owning [`Operation`], so
    /// this takes them as parameters rather than being a plain `&self` method.
    #[must_use]
    pub fn name(self, dagger: bool, x_rotation: bool) -> String {
        match self {
            OpType::X => "x".into(),
            OpType::Y => "y".into(),
            OpType::Z => "z".into(),
            OpType::H => "h".into(),
            OpType::S => "s".into(),
            OpType::Sdg => "sdg".into(),
            OpType::Sx => "sx".into(),
            OpType::Sxdg => "sxdg".into(),
            OpType::Id => "id".into(),
            OpType::T => "t".into(),
            OpType::Tdg => "tdg".into(),
            OpType::P4 | OpType::P8 | OpType::P16 => {
                let denom = match self {
                    OpType::P4 => 4,
                    OpType::P8 => 8,
                    OpType::P16 => 16,
                    _ => unreachable!(),
                };
                if x_rotation {
                    let sign = if dagger { "-" } else { "" };
                    format!("rx({sign}pi/{denom})")
                } else {
                    let base = format!("p{denom}");
                    if dagger { format!("{base}dg") } else { base }
                }
            }
            OpType::Rx => "rx".into(),
            OpType::Ry => "ry".into(),
            OpType::Rz => "rz".into(),
            OpType::P => "p".into(),
            OpType::U => "u".into(),
            OpType::U1 => "u1".into(),
            OpType::U2 => "u2".into(),
            OpType::U3 => "u3".into(),
            OpType::Cx => "cx".into(),
            OpType::Cy => "cy".into(),
            OpType::Cz => "cz".into(),
            OpType::Ch => "ch".into(),
            OpType::Cs => "cs".into(),
            OpType::Csdg => "csdg".into(),
            OpType::Ct => "ct".into(),
            OpType::Ctdg => "ctdg".into(),
            OpType::Csx => "csx".into(),
            OpType::Swap => "swap".into(),
            OpType::Ecr => "ecr".into(),
            OpType::Crx => "crx".into(),
            OpType::Cry => "cry".into(),
            OpType::Crz => "crz".into(),
            OpType::Cp => "cp".into(),
            OpType::Cu => "cu".into(),
            OpType::Cu1 => "cu1".into(),
            OpType::Cu3 => "cu3".into(),
            OpType::Rxx => "rxx".into(),
            OpType::Ryy => "ryy".into(),
            OpType::Rzz => "rzz".into(),
            OpType::Ccx => "ccx".into(),
            OpType::Cswap => "cswap".into(),
            OpType::Rccx => "rccx".into(),
            OpType::Measure => "measure".into(),
            OpType::Reset => "reset".into(),
            OpType::Barrier => "barrier".into(),
            OpType::TPauli => "t_pauli".into(),
            OpType::SPauli => "s_pauli".into(),
            OpType::ZPauli => "z_pauli".into(),
            OpType::MPauli => "m_pauli".into(),
            OpType::SwapBasis => "swap_basis".into(),
        }
    }

    /// True iff this type belongs to the Clifford+T gate set, per the exact
    /// set the circuit-level `is_clifford_t` flag tracks (note `SX`/`SXDG`
    /// are *not* included, matching the original's set despite being
    /// Clifford gates in the abstract).
    #[must_use]
    pub fn is_clifford_t(self) -> bool {
        matches!(
            self,
            OpType::H
                | OpType::S
                | OpType::Sdg
                | OpType::X
                | OpType::Y
                | OpType::Z
                | OpType::Cx
                | OpType::T
                | OpType::Tdg
                | OpType::P4
                | OpType::TPauli
                | OpType::SPauli
                | OpType::Measure
                | OpType::Reset
                | OpType::Barrier
                | OpType::MPauli
        )
    }

    /// Single-qubit, excluding the meta ops that happen to carry exactly
    /// one qubit index (`MEASURE`/`RESET`/`BARRIER`).
    #[must_use]
    pub fn is_single_qubit_gate(self) -> bool {
        matches!(
            self,
            OpType::X
                | OpType::Y
                | OpType::Z
                | OpType::H
                | OpType::S
                | OpType::Sdg
                | OpType::Sx
                | OpType::Sxdg
                | OpType::Id
                | OpType::T
                | OpType::Tdg
                | OpType::P4
                | OpType::P8
                | OpType::P16
                | OpType::Rx
                | OpType::Ry
                | OpType::Rz
                | OpType::P
                | OpType::U
                | OpType::U1
                | OpType::U2
                | OpType::U3
        )
    }
}

/// A single gate, measurement, or Pauli-rotation operation in a [`crate::Circuit`].
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    ty: OpType,
    qubits: Vec<usize>,
    params: Vec<f64>,
    bits: Vec<usize>,
    pauli: Option<PauliOp>,
    dagger: bool,
    x_rotation: bool,
}

impl Operation {
    #[must_use]
    pub fn new(ty: OpType, qubits: Vec<usize>) -> Self {
        Operation { ty, qubits, params: Vec::new(), bits: Vec::new(), pauli: None, dagger: false, x_rotation: false }
    }

    #[must_use]
    pub fn with_params(ty: OpType, qubits: Vec<usize>, params: Vec<f64>) -> Self {
        Operation { ty, qubits, params, bits: Vec::new(), pauli: None, dagger: false, x_rotation: false }
    }

    #[must_use]
    pub fn with_bits(ty: OpType, qubits: Vec<usize>, bits: Vec<usize>) -> Self {
        Operation { ty, qubits, params: Vec::new(), bits, pauli: None, dagger: false, x_rotation: false }
    }

    /// A Pauli-rotation op (`T_PAULI`/`S_PAULI`/`Z_PAULI`/`M_PAULI`) carrying
    /// its own `PauliOp` instead of a qubit list.
    #[must_use]
    pub fn pauli_rotation(ty: OpType, pauli: PauliOp) -> Self {
        Operation { ty, qubits: Vec::new(), params: Vec::new(), bits: Vec::new(), pauli: Some(pauli), dagger: false, x_rotation: false }
    }

    /// A `P4`/`P8`/`P16` op with the dagger/x-rotation flags set, produced
    /// by `CliffordReductionPass` commuting a `T`/`T-dagger` past an `H`.
    #[must_use]
    pub fn p_gate(ty: OpType, qubits: Vec<usize>, dagger: bool, x_rotation: bool) -> Self {
        Operation { ty, qubits, params: Vec::new(), bits: Vec::new(), pauli: None, dagger, x_rotation }
    }

    #[must_use]
    pub fn get_type(&self) -> OpType {
        self.ty
    }

    #[must_use]
    pub fn get_qubits(&self) -> &[usize] {
        &self.qubits
    }

    #[must_use]
    pub fn get_parameters(&self) -> &[f64] {
        &self.params
    }

    #[must_use]
    pub fn get_bits(&self) -> &[usize] {
        &self.bits
    }

    #[must_use]
    pub fn get_pauli(&self) -> Option<&PauliOp> {
        self.pauli.as_ref()
    }

    #[must_use]
    pub fn dagger(&self) -> bool {
        self.dagger
    }

    #[must_use]
    pub fn x_rotation(&self) -> bool {
        self.x_rotation
    }

    #[must_use]
    pub fn get_type_name(&self) -> String {
        self.ty.name(self.dagger, self.x_rotation)
    }

    #[must_use]
    pub fn is_single_qubit_gate(&self) -> bool {
        self.qubits.len() == 1 && self.ty.is_single_qubit_gate()
    }

    /// All qubit indices this op touches, whether carried directly or (for
    /// Pauli-rotation ops) implied by the non-identity sites of its `PauliOp`.
    #[must_use]
    pub fn active_qubits(&self) -> Vec<usize> {
        if let Some(p) = &self.pauli {
            p.active_qubits()
        } else {
            self.qubits.clone()
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get_type_name())?;
        if !self.params.is_empty() {
            write!(f, "({:?})", self.params)?;
        }
        if !self.qubits.is_empty() {
            write!(f, " {:?}", self.qubits)?;
        }
        if let Some(p) = &self.pauli {
            write!(f, " {p}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn p4_name_folds_in_flags() {
        let op = Operation::p_gate(OpType::P4, vec![0], false, true);
        assert_eq!(op.get_type_name(), "rx(pi/4)");
        let op_dg = Operation::p_gate(OpType::P4, vec![0], true, true);
        assert_eq!(op_dg.get_type_name(), "rx(-pi/4)");
    }

    #[test]
    fn clifford_t_set_excludes_sx() {
        assert!(OpType::T.is_clifford_t());
        assert!(!OpType::Sx.is_clifford_t());
        assert!(OpType::Cx.is_clifford_t());
    }

    #[test]
    fn pauli_rotation_active_qubits_from_pauli_string() {
        let p = PauliOp::parse("+XIZ").unwrap();
        let op = Operation::pauli_rotation(OpType::TPauli, p);
        assert_eq!(op.active_qubits(), vec![0, 2]);
    }
}
