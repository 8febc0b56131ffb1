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

//! Assembles an ordered recipe of passes from user-facing flags, validates
//! the flags' mutual constraints, and runs the recipe end to end.

use crate::{
    CliffordReductionPass, DecomposePass, GateFusionPass, LayeringStrategy, Pass, PbcPass, RemovePauliPass, RemoveTrivialRzPass,
    SynthesizeRzPass, TfusePass,
};
use log::info;
use qcc_circuit::Circuit;
use std::fmt;

/// User-facing flags selecting which passes run and how.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassRecipe {
    pub to_pbc: bool,
    pub to_clifford_reduction: bool,
    pub keep_cx: bool,
    pub t_pauli_opt: bool,
    pub remove_pauli: bool,
    pub keep_ccx: bool,
    pub epsilon_override: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassManagerError {
    /// `to_pbc` and `to_clifford_reduction` were both requested.
    ConflictingOutputForm,
    /// `t_pauli_opt` was requested without `to_pbc`.
    TPauliOptRequiresPbc,
}

impl fmt::Display for PassManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PassManagerError::ConflictingOutputForm => write!(f, "at most one of to_pbc/to_clifford_reduction may be selected"),
            PassManagerError::TPauliOptRequiresPbc => write!(f, "t_pauli_opt requires to_pbc (T-fusion operates on Pauli-rotation form)"),
        }
    }
}

impl std::error::Error for PassManagerError {}

/// One pass's contribution to a run: its name and whether it changed the circuit.
#[derive(Debug, Clone)]
pub struct PassReport {
    pub name: &'static str,
    pub modified: bool,
}

pub struct PassManager {
    recipe: PassRecipe,
    passes: Vec<Box<dyn Pass>>,
}

impl PassManager {
    /// Builds the ordered recipe, or rejects flag combinations that
    /// violate the pipeline's constraints.
    pub fn new(recipe: PassRecipe) -> Result<Self, PassManagerError> {
        if recipe.to_pbc && recipe.to_clifford_reduction {
            return Err(PassManagerError::ConflictingOutputForm);
        }
        if recipe.t_pauli_opt && !recipe.to_pbc {
            return Err(PassManagerError::TPauliOptRequiresPbc);
        }

        let mut passes: Vec<Box<dyn Pass>> = vec![
            Box::new(DecomposePass::new(recipe.keep_ccx)),
            Box::new(RemoveTrivialRzPass::new()),
            Box::new(GateFusionPass::new()),
            Box::new(SynthesizeRzPass::new(recipe.epsilon_override)),
        ];
        if recipe.to_clifford_reduction {
            passes.push(Box::new(CliffordReductionPass::new()));
        }
        if recipe.to_pbc {
            passes.push(Box::new(PbcPass::new(recipe.keep_cx)));
        }
        if recipe.t_pauli_opt {
            passes.push(Box::new(TfusePass::new(LayeringStrategy::EarliestFit)));
        }
        if recipe.remove_pauli {
            passes.push(Box::new(RemovePauliPass::new()));
        }

        Ok(PassManager { recipe, passes })
    }

    #[must_use]
    pub fn recipe(&self) -> &PassRecipe {
        &self.recipe
    }

    /// Runs every pass in order, logging pre/post statistics and
    /// returning each pass's `(name, modified)` report.
    pub fn run(&self, circuit: &mut Circuit) -> Vec<PassReport> {
        info!("pass manager: starting pipeline\n{}", circuit.print_stats());
        let mut reports = Vec::with_capacity(self.passes.len());
        for pass in &self.passes {
            let modified = pass.run(circuit);
            info!("{}: modified={modified}\n{}", pass.name(), circuit.print_stats());
            reports.push(PassReport { name: pass.name(), modified });
        }
        reports
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicting_output_forms_are_rejected() {
        let recipe = PassRecipe { to_pbc: true, to_clifford_reduction: true, ..Default::default() };
        assert_eq!(PassManager::new(recipe).unwrap_err(), PassManagerError::ConflictingOutputForm);
    }

    #[test]
    fn t_pauli_opt_without_pbc_is_rejected() {
        let recipe = PassRecipe { t_pauli_opt: true, ..Default::default() };
        assert_eq!(PassManager::new(recipe).unwrap_err(), PassManagerError::TPauliOptRequiresPbc);
    }

    #[test]
    fn default_recipe_builds_the_base_pipeline() {
        let manager = PassManager::new(PassRecipe::default()).unwrap();
        assert_eq!(manager.passes.len(), 4);
    }

    #[test]
    fn pbc_plus_t_pauli_opt_is_accepted() {
        let recipe = PassRecipe { to_pbc: true, t_pauli_opt: true, ..Default::default() };
        let manager = PassManager::new(recipe).unwrap();
        assert_eq!(manager.passes.len(), 6);
    }

    #[test]
    fn run_reports_every_pass() {
        let mut c = Circuit::new();
        c.add_qreg("q", 1);
        c.add_operation(qcc_circuit::Operation::new(qcc_circuit::OpType::H, vec![0]));
        let manager = PassManager::new(PassRecipe::default()).unwrap();
        let reports = manager.run(&mut c);
        assert_eq!(reports.len(), 4);
        assert_eq!(reports[0].name, "DecomposePass");
    }
}
