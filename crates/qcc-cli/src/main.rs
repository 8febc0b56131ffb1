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

mod circuits;

use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use log::{debug, info};
use qcc::prelude::*;
use std::error::Error;
use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "qcc",
    version = env!("CARGO_PKG_VERSION"),
    about = "A quantum-circuit compilation toolchain targeting fault-tolerant architectures",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse, synthesize, and optionally reduce a circuit
    Transpiler(TranspilerArgs),
    /// Synthesize a single RZ(angle) as an exact Clifford+T gate word
    Gridsynth(GridsynthArgs),
}

#[derive(Args)]
struct TranspilerArgs {
    /// Path to an OpenQASM 2.0 source file
    input: Option<String>,

    /// Generate an n-qubit quantum Fourier transform instead of reading a file
    #[arg(long, conflicts_with = "shor")]
    qft: Option<usize>,

    /// Generate an n-qubit period-finding demonstration circuit instead of reading a file
    #[arg(long)]
    shor: Option<usize>,

    /// Convert to Pauli-based computation (tableau form)
    #[arg(long, conflicts_with_all = ["cr", "red_pbc"])]
    pbc: bool,

    /// Run the Clifford-reduction single-qubit optimizer
    #[arg(long, conflicts_with_all = ["pbc", "red_pbc"])]
    cr: bool,

    /// Convert to PBC with CCX gates forced to stay expanded (reduced/portable PBC form)
    #[arg(long = "red-pbc", conflicts_with_all = ["pbc", "cr"])]
    red_pbc: bool,

    /// Run T-fusion over the tableau (requires --pbc or --red-pbc)
    #[arg(long = "t-opt")]
    t_opt: bool,

    /// Keep CCX/Toffoli gates intact instead of decomposing them
    #[arg(long = "keep-ccx")]
    keep_ccx: bool,

    /// Strip Pauli-rotation operators after T-fusion
    #[arg(long = "remove-pauli")]
    remove_pauli: bool,

    /// Output path (default: `<input-stem>_transpiled.qasm`)
    #[arg(short, long)]
    output: Option<String>,

    /// Don't write the transpiled circuit to disk
    #[arg(long = "no-save")]
    no_save: bool,
}

#[derive(Args)]
struct GridsynthArgs {
    /// Target rotation angle, as a decimal or `[-]pi[/N]`
    angle: String,

    /// Synthesis precision (default: `|angle| * 1e-2`)
    epsilon: Option<f64>,
}

/// Parses a CLI angle argument: a bare decimal, or `pi`/`-pi`/`pi/N`/`-pi/N`.
fn parse_angle(s: &str) -> Result<f64, Box<dyn Error>> {
    let trimmed = s.trim();
    if let Ok(v) = trimmed.parse::<f64>() {
        return Ok(v);
    }
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(r) => (-1.0, r),
        None => (1.0, trimmed),
    };
    if rest == "pi" {
        return Ok(sign * PI);
    }
    if let Some(denom) = rest.strip_prefix("pi/") {
        let d: f64 = denom.parse().map_err(|_| format!("invalid angle '{s}': expected a decimal or pi[/N]"))?;
        return Ok(sign * PI / d);
    }
    Err(format!("invalid angle '{s}': expected a decimal or pi[/N]").into())
}

/// Loads the circuit named by `args`: a QASM file, or a generated `--qft`/`--shor` circuit.
fn load_circuit(args: &TranspilerArgs) -> Result<(Circuit, String), Box<dyn Error>> {
    match (&args.input, args.qft, args.shor) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) | (None, Some(_), Some(_)) => {
            Err("at most one of INPUT, --qft, --shor may be given".into())
        }
        (Some(path), None, None) => {
            debug!("reading source from {path}");
            let source = fs::read_to_string(path)?;
            let circuit = compile(&source)?;
            let stem = Path::new(path).file_stem().and_then(|s| s.to_str()).unwrap_or("circuit").to_string();
            Ok((circuit, stem))
        }
        (None, Some(n), None) => Ok((circuits::build_qft(n), "qft".to_string())),
        (None, None, Some(n)) => Ok((circuits::build_shor(n), "shor".to_string())),
        (None, None, None) => Err("one of INPUT, --qft, --shor is required".into()),
    }
}

fn recipe_from_args(args: &TranspilerArgs) -> PassRecipe {
    PassRecipe {
        to_pbc: args.pbc || args.red_pbc,
        to_clifford_reduction: args.cr,
        keep_cx: false,
        t_pauli_opt: args.t_opt,
        remove_pauli: args.remove_pauli,
        keep_ccx: args.keep_ccx || args.red_pbc,
        epsilon_override: None,
    }
}

fn output_path(args: &TranspilerArgs, stem: &str) -> PathBuf {
    match &args.output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(format!("{stem}_transpiled.qasm")),
    }
}

fn run_transpiler(args: &TranspilerArgs) -> Result<(), Box<dyn Error>> {
    let (mut circuit, stem) = load_circuit(args)?;
    info!("loaded circuit: {} qubits, {} operations", circuit.num_qubits(), circuit.get_operations().len());

    let recipe = recipe_from_args(args);
    let manager = PassManager::new(recipe)?;
    let reports = manager.run(&mut circuit);
    for report in &reports {
        debug!("pass {}: modified={}", report.name, report.modified);
    }

    println!("{}", circuit.print_stats());
    let qasm = print_circuit(&circuit);

    if args.no_save {
        print!("{qasm}");
    } else {
        let path = output_path(args, &stem);
        fs::write(&path, &qasm)?;
        info!("wrote transpiled circuit to {}", path.display());
    }

    Ok(())
}

fn run_gridsynth(args: &GridsynthArgs) -> Result<(), Box<dyn Error>> {
    let theta = parse_angle(&args.angle)?;
    let epsilon = args.epsilon.unwrap_or_else(|| default_epsilon(theta));
    debug!("synthesizing RZ({theta}) to precision {epsilon}");
    let word = gridsynth_gates(theta, epsilon)?;
    println!("{}", word_to_string(&word));
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match &cli.command {
        Commands::Transpiler(args) => run_transpiler(args),
        Commands::Gridsynth(args) => run_gridsynth(args),
    }
}
