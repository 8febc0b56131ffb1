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

//! The low-level instruction stream consumed/produced by the memory-aware
//! scheduler: a distinct, smaller IR than [`crate::Operation`], serialized
//! as length-prefixed binary records so the scheduler can stream
//! arbitrarily long inputs.

use crate::error::CircuitError;
use std::io::{Read, Write};

/// The discriminant of a low-level scheduler instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    Rz,
    Rx,
    Ccx,
    Ccz,
    Cx,
    Cz,
    X,
    Y,
    Z,
    Swap,
    MSwap,
    MSwapD,
    MPrefetch,
    H,
    S,
    Sdg,
    Sx,
    Sxdg,
}

impl InstructionKind {
    fn opcode(self) -> u8 {
        match self {
            InstructionKind::Rz => 0,
            InstructionKind::Rx => 1,
            InstructionKind::Ccx => 2,
            InstructionKind::Ccz => 3,
            InstructionKind::Cx => 4,
            InstructionKind::Cz => 5,
            InstructionKind::X => 6,
            InstructionKind::Y => 7,
            InstructionKind::Z => 8,
            InstructionKind::Swap => 9,
            InstructionKind::MSwap => 10,
            InstructionKind::MSwapD => 11,
            InstructionKind::MPrefetch => 12,
            InstructionKind::H => 13,
            InstructionKind::S => 14,
            InstructionKind::Sdg => 15,
            InstructionKind::Sx => 16,
            InstructionKind::Sxdg => 17,
        }
    }

    fn from_opcode(b: u8) -> Result<Self, CircuitError> {
        Ok(match b {
            0 => InstructionKind::Rz,
            1 => InstructionKind::Rx,
            2 => InstructionKind::Ccx,
            3 => InstructionKind::Ccz,
            4 => InstructionKind::Cx,
            5 => InstructionKind::Cz,
            6 => InstructionKind::X,
            7 => InstructionKind::Y,
            8 => InstructionKind::Z,
            9 => InstructionKind::Swap,
            10 => InstructionKind::MSwap,
            11 => InstructionKind::MSwapD,
            12 => InstructionKind::MPrefetch,
            13 => InstructionKind::H,
            14 => InstructionKind::S,
            15 => InstructionKind::Sdg,
            16 => InstructionKind::Sx,
            17 => InstructionKind::Sxdg,
            other => return Err(CircuitError::UnknownOpcode(other)),
        })
    }

    /// Software ops (per the scheduler's main loop): free to execute
    /// regardless of the current working set.
    #[must_use]
    pub fn is_software(self) -> bool {
        matches!(self, InstructionKind::X | InstructionKind::Y | InstructionKind::Z | InstructionKind::Swap)
    }

    /// Number of unrolled Clifford+T micro-ops this instruction contributes
    /// when counting scheduler progress: rotations contribute their gate
    /// word length (tracked separately on `Instruction`), `CCX`/`CCZ` have
    /// fixed literature counts, everything else is a single uop.
    #[must_use]
    pub fn fixed_uop_count(self) -> Option<usize> {
        match self {
            InstructionKind::Ccx => Some(15),
            InstructionKind::Ccz => Some(13),
            InstructionKind::Rz | InstructionKind::Rx => None,
            _ => Some(1),
        }
    }
}

/// A single low-level instruction: a discriminant, the qubits it touches,
/// and (for rotation kinds) the unrolled Clifford+T gate word that
/// `SynthesizeRzPass` produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<usize>,
    pub gate_word: Vec<char>,
    /// Stamped by the reader at read time; not part of the wire format.
    pub seq: u64,
}

impl Instruction {
    #[must_use]
    pub fn new(kind: InstructionKind, qubits: Vec<usize>) -> Self {
        Instruction { kind, qubits, gate_word: Vec::new(), seq: 0 }
    }

    #[must_use]
    pub fn rotation(kind: InstructionKind, qubits: Vec<usize>, gate_word: Vec<char>) -> Self {
        Instruction { kind, qubits, gate_word, seq: 0 }
    }

    /// How many unrolled Clifford+T micro-ops this instruction represents.
    #[must_use]
    pub fn uop_count(&self) -> usize {
        self.kind.fixed_uop_count().unwrap_or_else(|| self.gate_word.len().max(1))
    }
}

/// Writes the 4-byte qubit-count header that precedes the instruction stream.
pub fn write_header<W: Write>(w: &mut W, num_qubits: u32) -> Result<(), CircuitError> {
    w.write_all(&num_qubits.to_le_bytes())?;
    Ok(())
}

/// Reads the 4-byte qubit-count header.
pub fn read_header<R: Read>(r: &mut R) -> Result<u32, CircuitError> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf)?;
    Ok(u32::from_le_bytes(buf))
}

/// Serializes one instruction as a length-prefixed record:
/// `[u32 record_len][u8 opcode][u8 n_qubits][u32 qubit]*[u16 gate_word_len][gate_word bytes]`.
pub fn write_record<W: Write>(w: &mut W, inst: &Instruction) -> Result<(), CircuitError> {
    let mut body = Vec::new();
    body.push(inst.kind.opcode());
    body.push(u8::try_from(inst.qubits.len()).unwrap_or(u8::MAX));
    for &q in &inst.qubits {
        body.extend_from_slice(&(q as u32).to_le_bytes());
    }
    let word_len = u16::try_from(inst.gate_word.len()).unwrap_or(u16::MAX);
    body.extend_from_slice(&word_len.to_le_bytes());
    for &c in &inst.gate_word {
        body.push(c as u8);
    }
    w.write_all(&(body.len() as u32).to_le_bytes())?;
    w.write_all(&body)?;
    Ok(())
}

/// Reads one length-prefixed record. Returns `Ok(None)` on a clean EOF
/// (zero bytes read at the record-length boundary) without consuming
/// anything destructively; a partial read at any point is a
/// [`CircuitError::TruncatedRecord`].
pub fn read_record<R: Read>(r: &mut R) -> Result<Option<Instruction>, CircuitError> {
    let mut len_buf = [0u8; 4];
    let mut read_so_far = 0;
    while read_so_far < 4 {
        let n = r.read(&mut len_buf[read_so_far..])?;
        if n == 0 {
            if read_so_far == 0 {
                return Ok(None);
            }
            return Err(CircuitError::TruncatedRecord);
        }
        read_so_far += n;
    }
    let len = u32::from_le_bytes(len_buf) as usize;
    let mut body = vec![0u8; len];
    r.read_exact(&mut body).map_err(|_| CircuitError::TruncatedRecord)?;

    let mut pos = 0;
    let opcode = *body.get(pos).ok_or(CircuitError::TruncatedRecord)?;
    pos += 1;
    let kind = InstructionKind::from_opcode(opcode)?;
    let n_qubits = *body.get(pos).ok_or(CircuitError::TruncatedRecord)? as usize;
    pos += 1;
    let mut qubits = Vec::with_capacity(n_qubits);
    for _ in 0..n_qubits {
        let bytes: [u8; 4] = body.get(pos..pos + 4).ok_or(CircuitError::TruncatedRecord)?.try_into().unwrap();
        qubits.push(u32::from_le_bytes(bytes) as usize);
        pos += 4;
    }
    let word_len_bytes: [u8; 2] = body.get(pos..pos + 2).ok_or(CircuitError::TruncatedRecord)?.try_into().unwrap();
    let word_len = u16::from_le_bytes(word_len_bytes) as usize;
    pos += 2;
    let gate_word: Vec<char> =
        body.get(pos..pos + word_len).ok_or(CircuitError::TruncatedRecord)?.iter().map(|&b| b as char).collect();

    Ok(Some(Instruction { kind, qubits, gate_word, seq: 0 }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn round_trips_a_simple_instruction() {
        let inst = Instruction::new(InstructionKind::Cx, vec![0, 1]);
        let mut buf = Vec::new();
        write_record(&mut buf, &inst).unwrap();
        let mut cursor = Cursor::new(buf);
        let read_back = read_record(&mut cursor).unwrap().unwrap();
        assert_eq!(read_back.kind, InstructionKind::Cx);
        assert_eq!(read_back.qubits, vec![0, 1]);
    }

    #[test]
    fn round_trips_a_rotation_with_gate_word() {
        let inst = Instruction::rotation(InstructionKind::Rz, vec![3], vec!['H', 'T', 'S']);
        let mut buf = Vec::new();
        write_record(&mut buf, &inst).unwrap();
        let mut cursor = Cursor::new(buf);
        let read_back = read_record(&mut cursor).unwrap().unwrap();
        assert_eq!(read_back.gate_word, vec!['H', 'T', 'S']);
        assert_eq!(read_back.uop_count(), 3);
    }

    #[test]
    fn clean_eof_is_non_destructive() {
        let mut cursor = Cursor::new(Vec::<u8>::new());
        assert!(read_record(&mut cursor).unwrap().is_none());
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut cursor = Cursor::new(vec![5u8, 0, 0, 0, 1]);
        assert!(read_record(&mut cursor).is_err());
    }

    #[test]
    fn header_round_trips() {
        let mut buf = Vec::new();
        write_header(&mut buf, 7).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_header(&mut cursor).unwrap(), 7);
    }

    #[test]
    fn ccx_fixed_uop_count() {
        let inst = Instruction::new(InstructionKind::Ccx, vec![0, 1, 2]);
        assert_eq!(inst.uop_count(), 15);
    }
}
