//! Resolution of a user selection into evaluation inputs and display text.
//!
//! A [`Scenario`] bundles everything a renderer needs besides the series
//! itself: the chart title, the three legend labels, the equilibrium class
//! and the stable end-product caption.

use serde::Serialize;

use crate::constants::{
    CUSTOM_SERIES_NAME, CUSTOM_STABLE_LABEL, MAX_CUSTOM_ACTIVITY, MIN_CUSTOM_ACTIVITY,
    MIN_CUSTOM_HALF_LIFE,
};
use crate::error::{ParameterError, ScenarioError};
use crate::presets::{find_preset, DecaySeries};
use crate::traits::ChainEvaluator;
use crate::types::{ChainMember, DecayParameters, EquilibriumClass, HalfLife};
use crate::units::TimeUnit;

/// Custom chain input as entered by a user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CustomInput {
    pub initial_activity: f64,
    pub half_lives: [HalfLife; 3],
}

impl Default for CustomInput {
    fn default() -> Self {
        Self {
            initial_activity: 1.0,
            half_lives: [
                HalfLife::new(1.0, TimeUnit::Minutes),
                HalfLife::new(0.1, TimeUnit::Minutes),
                HalfLife::new(0.01, TimeUnit::Minutes),
            ],
        }
    }
}

impl CustomInput {
    /// Check the entry bounds and convert the half-lives to days.
    pub fn parameters(&self) -> Result<DecayParameters, ParameterError> {
        let a0 = self.initial_activity;
        if !(MIN_CUSTOM_ACTIVITY..=MAX_CUSTOM_ACTIVITY).contains(&a0) {
            return Err(ParameterError::ActivityOutOfRange {
                value: a0,
                min: MIN_CUSTOM_ACTIVITY,
                max: MAX_CUSTOM_ACTIVITY,
            });
        }
        for member in ChainMember::ALL {
            let value = self.half_lives[member.index()].value;
            // NaN fails this comparison too.
            if !(value >= MIN_CUSTOM_HALF_LIFE) {
                return Err(ParameterError::HalfLifeTooShort {
                    member,
                    value,
                    min: MIN_CUSTOM_HALF_LIFE,
                });
            }
        }
        let [t1, t2, t3] = self.half_lives.map(|h| h.to_days());
        DecayParameters::new(a0, t1, t2, t3)
    }
}

/// What the user picked from the series menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Preset(&'static DecaySeries),
    Custom(CustomInput),
}

impl Selection {
    /// Parse a menu entry: a preset name or key, or `custom`.
    pub fn preset(query: &str) -> Result<Self, ScenarioError> {
        find_preset(query)
            .map(Selection::Preset)
            .ok_or_else(|| ScenarioError::UnknownPreset(query.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Selection::Custom(_))
    }
}

/// A fully resolved chain, ready to evaluate and render.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenario {
    title: String,
    parameters: DecayParameters,
    labels: [String; 3],
    equilibrium: EquilibriumClass,
    stable: String,
}

impl Scenario {
    /// Resolve a preset: unit initial activity and the preset's own class.
    pub fn from_preset(series: &DecaySeries) -> Result<Self, ScenarioError> {
        Ok(Self {
            title: series.name.to_string(),
            parameters: series.parameters()?,
            labels: ChainMember::ALL.map(|m| series.nuclide(m).label()),
            equilibrium: series.equilibrium,
            stable: series.stable.to_string(),
        })
    }

    /// Resolve custom input; the equilibrium class comes from `evaluator`.
    pub fn custom(input: &CustomInput, evaluator: &dyn ChainEvaluator) -> Result<Self, ScenarioError> {
        let parameters = input.parameters()?;
        Ok(Self {
            title: CUSTOM_SERIES_NAME.to_string(),
            parameters,
            labels: ChainMember::ALL.map(|m| format!("{} (custom)", m.title())),
            equilibrium: evaluator.classify(&parameters),
            stable: CUSTOM_STABLE_LABEL.to_string(),
        })
    }

    pub fn resolve(selection: &Selection, evaluator: &dyn ChainEvaluator) -> Result<Self, ScenarioError> {
        match selection {
            Selection::Preset(series) => Self::from_preset(series),
            Selection::Custom(input) => Self::custom(input, evaluator),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn parameters(&self) -> &DecayParameters {
        &self.parameters
    }

    pub fn label(&self, member: ChainMember) -> &str {
        &self.labels[member.index()]
    }

    pub fn equilibrium(&self) -> EquilibriumClass {
        self.equilibrium
    }

    /// Stable end-product symbol, or `—` for custom chains.
    pub fn stable(&self) -> &str {
        &self.stable
    }

    /// `"{title} — {class} Equilibrium"`.
    pub fn chart_title(&self) -> String {
        format!("{} — {} Equilibrium", self.title, self.equilibrium)
    }

    pub fn caption(&self) -> String {
        format!("Stable end product: {}", self.stable)
    }
}
