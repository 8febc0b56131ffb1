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

//! Standard textbook test circuits for the `--qft`/`--shor` transpiler
//! flags. Generating these is mechanical and bounded in scope, unlike
//! the synthesis pipeline itself.

use qcc_circuit::{Circuit, OpType, Operation};
use std::f64::consts::PI;

/// Appends an `n`-qubit quantum Fourier transform (or its inverse) over
/// `qubits` to `circuit`: Hadamard and controlled-phase rotations in the
/// textbook order, followed by (or, inverted, preceded by) the
/// bit-reversal swap pass.
fn append_qft(circuit: &mut Circuit, qubits: &[usize], inverse: bool) {
    let n = qubits.len();
    if inverse {
        for i in (0..n / 2).rev() {
            circuit.add_operation(Operation::new(OpType::Swap, vec![qubits[i], qubits[n - 1 - i]]));
        }
        for i in (0..n).rev() {
            for j in (i + 1..n).rev() {
                let angle = -PI / f64::from(1u32 << (j - i));
                circuit.add_operation(Operation::with_params(OpType::Cp, vec![qubits[j], qubits[i]], vec![angle]));
            }
            circuit.add_operation(Operation::new(OpType::H, vec![qubits[i]]));
        }
    } else {
        for i in 0..n {
            circuit.add_operation(Operation::new(OpType::H, vec![qubits[i]]));
            for j in i + 1..n {
                let angle = PI / f64::from(1u32 << (j - i));
                circuit.add_operation(Operation::with_params(OpType::Cp, vec![qubits[j], qubits[i]], vec![angle]));
            }
        }
        for i in 0..n / 2 {
            circuit.add_operation(Operation::new(OpType::Swap, vec![qubits[i], qubits[n - 1 - i]]));
        }
    }
}

/// Builds the standard `n`-qubit quantum Fourier transform circuit.
#[must_use]
pub fn build_qft(n: usize) -> Circuit {
    let mut circuit = Circuit::new();
    circuit.add_qreg("q", n.max(1));
    let qubits: Vec<usize> = (0..n.max(1)).collect();
    append_qft(&mut circuit, &qubits, false);
    circuit
}

/// Builds a period-finding demonstration circuit in the shape of Shor's
/// algorithm: a `2n`-qubit counting register put into uniform
/// superposition, a controlled cyclic-shift ladder over an `n`-qubit
/// target register standing in for controlled modular multiplication
/// (the actual base/modulus are runtime parameters outside a circuit
/// generator's scope), an inverse QFT on the counting register, and a
/// final measurement of every counting qubit.
#[must_use]
pub fn build_shor(n: usize) -> Circuit {
    let n = n.max(1);
    let counting_size = 2 * n;
    let mut circuit = Circuit::new();
    circuit.add_qreg("q", counting_size);
    circuit.add_qreg("anc", n);
    circuit.add_creg("c", counting_size);

    for i in 0..counting_size {
        circuit.add_operation(Operation::new(OpType::H, vec![i]));
    }
    circuit.add_operation(Operation::new(OpType::X, vec![counting_size]));

    for i in 0..counting_size {
        let shift = 1 + (i % n);
        for k in 0..n {
            let target = counting_size + k;
            let source = counting_size + (k + shift) % n;
            if target != source {
                circuit.add_operation(Operation::new(OpType::Cswap, vec![i, target, source]));
            }
        }
    }

    let counting_qubits: Vec<usize> = (0..counting_size).collect();
    append_qft(&mut circuit, &counting_qubits, true);

    for i in 0..counting_size {
        circuit.add_operation(Operation::with_bits(OpType::Measure, vec![i], vec![i]));
    }
    circuit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qft_has_one_hadamard_per_qubit_and_the_triangular_phase_count() {
        let circuit = build_qft(4);
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 4);
        assert_eq!(counts["cp"], 3 + 2 + 1);
        assert_eq!(counts["swap"], 2);
    }

    #[test]
    fn qft_of_a_single_qubit_is_just_a_hadamard() {
        let circuit = build_qft(1);
        let counts = circuit.count_ops();
        assert_eq!(counts["h"], 1);
        assert!(!counts.contains_key("cp"));
        assert!(!counts.contains_key("swap"));
    }

    #[test]
    fn shor_measures_every_counting_qubit() {
        let circuit = build_shor(3);
        let counts = circuit.count_ops();
        assert_eq!(counts["measure"], 6);
        assert_eq!(circuit.num_qubits(), 9);
        assert_eq!(circuit.num_bits(), 6);
    }
}
