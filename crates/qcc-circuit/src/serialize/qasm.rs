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

//! Deterministic OpenQASM-2.0-compatible textual printer.

use crate::circuit::Circuit;
use crate::operation::{OpType, Operation};
use std::fmt::Write as _;

const PI: f64 = std::f64::consts::PI;
const BEST_RATIONAL_TOLERANCE: f64 = 1e-10;
const MAX_DENOMINATOR: i64 = 100;

fn gcd(a: i64, b: i64) -> i64 {
    if b == 0 { a.abs() } else { gcd(b, a % b) }
}

/// Formats `theta` as `[coeff]pi[/denom]` when a denominator `<= 100`
/// approximates `theta/pi` to within `1e-10`; otherwise falls back to a
/// fixed-precision decimal with trailing zeros trimmed.
#[must_use]
pub fn format_param(theta: f64) -> String {
    if theta == 0.0 {
        return "0".to_string();
    }
    let ratio = theta / PI;
    for denom in 1..=MAX_DENOMINATOR {
        let numer = (ratio * denom as f64).round();
        if (numer / denom as f64 - ratio).abs() < BEST_RATIONAL_TOLERANCE {
            let n = numer as i64;
            if n == 0 {
                continue;
            }
            let g = gcd(n, denom).max(1);
            let (n, d) = (n / g, denom / g);
            return format_pi_fraction(n, d);
        }
    }
    let mut s = format!("{theta:.10}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    s
}

fn format_pi_fraction(n: i64, d: i64) -> String {
    let coeff = match n {
        1 => String::new(),
        -1 => "-".to_string(),
        _ => format!("{n}*"),
    };
    if d == 1 {
        format!("{coeff}pi")
    } else {
        format!("{coeff}pi/{d}")
    }
}

fn print_operation(op: &Operation, circuit: &Circuit) -> String {
    match op.get_type() {
        OpType::TPauli | OpType::SPauli | OpType::ZPauli | OpType::MPauli => {
            let name = op.get_type_name();
            let p = op.get_pauli().expect("pauli-rotation op without a PauliOp");
            format!("{name} {};", p.to_pauli_string())
        }
        OpType::Measure => {
            let (qreg, qi) = circuit.qubit_ref(op.get_qubits()[0]);
            let (creg, ci) = circuit.bit_ref(op.get_bits().first().copied().unwrap_or(0));
            format!("measure {qreg}[{qi}] -> {creg}[{ci}];")
        }
        OpType::Reset => {
            let (qreg, qi) = circuit.qubit_ref(op.get_qubits()[0]);
            format!("reset {qreg}[{qi}];")
        }
        OpType::Barrier => {
            let refs: Vec<String> = op
                .get_qubits()
                .iter()
                .map(|&q| {
                    let (r, i) = circuit.qubit_ref(q);
                    format!("{r}[{i}]")
                })
                .collect();
            format!("barrier {};", refs.join(","))
        }
        _ => {
            let name = op.get_type_name();
            let params = op.get_parameters();
            let param_str =
                if params.is_empty() { String::new() } else { format!("({})", params.iter().map(|&p| format_param(p)).collect::<Vec<_>>().join(",")) };
            let refs: Vec<String> = op
                .get_qubits()
                .iter()
                .map(|&q| {
                    let (r, i) = circuit.qubit_ref(q);
                    format!("{r}[{i}]")
                })
                .collect();
            format!("{name}{param_str} {};", refs.join(","))
        }
    }
}

/// Renders `circuit` as OpenQASM-2.0-compatible text, including the
/// Pauli-rotation extension statements this toolchain defines.
#[must_use]
pub fn print_circuit(circuit: &Circuit) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "OPENQASM 2.0;");
    let _ = writeln!(out, "include \"qelib1.inc\";");

    let mut qregs = circuit.qregs();
    qregs.sort_by(|a, b| a.0.cmp(&b.0));
    if qregs.is_empty() && circuit.num_qubits() > 0 {
        qregs.push(("q".to_string(), circuit.num_qubits()));
    }
    for (name, size) in &qregs {
        let _ = writeln!(out, "qreg {name}[{size}];");
    }

    let mut cregs = circuit.cregs();
    cregs.sort_by(|a, b| a.0.cmp(&b.0));
    for (name, size) in &cregs {
        let _ = writeln!(out, "creg {name}[{size}];");
    }

    for op in circuit.get_operations() {
        let _ = writeln!(out, "{}", print_operation(op, circuit));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpType;

    #[test]
    fn formats_pi_exactly() {
        assert_eq!(format_param(PI), "pi");
        assert_eq!(format_param(PI / 4.0), "pi/4");
        assert_eq!(format_param(-PI / 4.0), "-pi/4");
        assert_eq!(format_param(0.0), "0");
    }

    #[test]
    fn formats_multiple_of_pi() {
        assert_eq!(format_param(3.0 * PI / 4.0), "3*pi/4");
    }

    #[test]
    fn falls_back_to_decimal_for_non_rational_angle() {
        let s = format_param(1.2345);
        assert!(s.starts_with("1.2345"));
    }

    #[test]
    fn prints_trivial_bell_circuit() {
        let mut c = Circuit::new();
        c.add_qreg("q", 2);
        c.add_operation(Operation::new(OpType::H, vec![0]));
        c.add_operation(Operation::new(OpType::Cx, vec![0, 1]));
        let text = print_circuit(&c);
        assert!(text.contains("qreg q[2];"));
        assert!(text.contains("h q[0];"));
        assert!(text.contains("cx q[0],q[1];"));
    }

    #[test]
    fn prints_t_pauli_with_pauli_string() {
        let mut c = Circuit::new();
        c.add_operation(Operation::pauli_rotation(OpType::TPauli, qcc_core::PauliOp::parse("+XIZ").unwrap()));
        let text = print_circuit(&c);
        assert!(text.contains("t_pauli +XIZ;"));
    }
}
