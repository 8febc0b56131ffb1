use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn qft_generates_and_prints_without_saving() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("transpiler").arg("--qft").arg("3").arg("--no-save");
    cmd.assert().success().stdout(predicate::str::contains("OPENQASM 2.0")).stdout(predicate::str::contains("qreg q[3];"));
    Ok(())
}

#[test]
fn shor_generates_and_prints_without_saving() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("transpiler").arg("--shor").arg("2").arg("--no-save");
    cmd.assert().success().stdout(predicate::str::contains("OPENQASM 2.0"));
    Ok(())
}

#[test]
fn pbc_and_cr_together_are_rejected_by_clap() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("transpiler").arg("--qft").arg("2").arg("--pbc").arg("--cr").arg("--no-save");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn t_opt_without_pbc_is_rejected_by_the_pass_manager() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("transpiler").arg("--qft").arg("2").arg("--t-opt").arg("--no-save");
    cmd.assert().failure().stderr(predicate::str::contains("TPauliOptRequiresPbc"));
    Ok(())
}

#[test]
fn neither_input_nor_generator_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("transpiler").arg("--no-save");
    cmd.assert().failure();
    Ok(())
}

#[test]
fn default_output_path_is_derived_from_the_input_file_stem() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let input_path = dir.path().join("bell.qasm");
    std::fs::write(&input_path, "qreg q[2];\ncreg c[2];\nh q[0];\ncx q[0],q[1];\nmeasure q[0] -> c[0];\nmeasure q[1] -> c[1];\n")?;

    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.current_dir(dir.path()).arg("transpiler").arg(&input_path);
    cmd.assert().success();

    let output_path = dir.path().join("bell_transpiled.qasm");
    assert!(output_path.exists());
    let contents = std::fs::read_to_string(output_path)?;
    assert!(contents.contains("OPENQASM 2.0"));
    Ok(())
}

#[test]
fn gridsynth_prints_a_nonempty_clifford_t_word() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("gridsynth").arg("pi/4").arg("0.01");
    let output = cmd.assert().success().get_output().stdout.clone();
    let word = String::from_utf8(output)?;
    assert!(!word.trim().is_empty());
    Ok(())
}

#[test]
fn gridsynth_rejects_a_malformed_angle() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("qcc")?;
    cmd.arg("gridsynth").arg("not-an-angle");
    cmd.assert().failure();
    Ok(())
}
