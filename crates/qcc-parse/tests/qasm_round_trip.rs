use qcc_circuit::serialize::qasm::print_circuit;
use qcc_parse::compile;

#[test]
fn compiled_circuit_prints_back_as_valid_qasm_statements() {
    let source = "OPENQASM 2.0;\ninclude \"qelib1.inc\";\nqreg q[3];\ncreg c[3];\nh q[0];\ncx q[0],q[1];\nccx q[0],q[1],q[2];\nmeasure q[0] -> c[0];\n";
    let circuit = compile(source).unwrap();
    assert_eq!(circuit.num_qubits(), 3);

    let printed = print_circuit(&circuit);
    assert!(printed.contains("h q[0];"));
    assert!(printed.contains("cx q[0],q[1];"));
    assert!(printed.contains("ccx q[0],q[1],q[2];"));
    assert!(printed.contains("measure q[0] -> c[0];"));
}

#[test]
fn pauli_rotation_extension_round_trips_through_the_printer() {
    let circuit = compile("t_pauli -XYZI;\n").unwrap();
    let printed = print_circuit(&circuit);
    assert!(printed.contains("t_pauli -XYZI;"));
}

#[test]
fn unsupported_if_construct_halts_compilation_with_a_clear_message() {
    let err = compile("creg c[1];\nif (c==1) x q[0];\n").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("not semantically supported"));
}
