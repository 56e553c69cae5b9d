//! Per-session state.

use bateman_core::error::{BatemanError, ScenarioError};
use bateman_core::scenario::{Scenario, Selection};
use bateman_core::traits::ChainEvaluator;
use bateman_core::types::ActivityTimeSeries;

/// State that outlives a single evaluation.
///
/// Custom chains stay locked until the user confirms they want to enter
/// parameters; the confirmation then holds for the rest of the session.
#[derive(Debug, Default, Clone)]
pub struct Session {
    custom_confirmed: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_custom(&mut self) {
        self.custom_confirmed = true;
    }

    pub fn custom_confirmed(&self) -> bool {
        self.custom_confirmed
    }

    /// Resolve `selection`, refusing custom chains until confirmed.
    pub fn resolve(
        &self,
        selection: &Selection,
        evaluator: &dyn ChainEvaluator,
    ) -> Result<Scenario, ScenarioError> {
        if selection.is_custom() && !self.custom_confirmed {
            return Err(ScenarioError::CustomNotConfirmed);
        }
        Scenario::resolve(selection, evaluator)
    }

    /// Resolve `selection` and evaluate it on `evaluator`'s grid.
    pub fn evaluate(
        &self,
        selection: &Selection,
        evaluator: &dyn ChainEvaluator,
    ) -> Result<(Scenario, ActivityTimeSeries), BatemanError> {
        let scenario = self.resolve(selection, evaluator)?;
        let series = evaluator.evaluate(scenario.parameters())?;
        Ok((scenario, series))
    }
}
