//! Simulation configuration for the decay engine.
//!
//! Provides [`SimulationConfig`] with defaults matching the reference grid
//! (3000 points from 10^-4 days to five times the longest half-life).
//! The CLI layers file and environment overrides on top via serde.

use std::fmt;
use std::str::FromStr;

use bateman_core::constants::{
    DEFAULT_DEGENERATE_TOLERANCE, DEFAULT_GRID_POINTS, DEFAULT_GRID_START_EXPONENT,
    DEFAULT_HORIZON_FACTOR,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the engine does when two decay constants coincide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DegeneratePolicy {
    /// Evaluate the limiting (polynomial-in-t) form of the solution.
    #[default]
    LimitingForm,
    /// Fail with `DecayError::DegenerateDecayConstants`.
    Reject,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown degenerate policy: {0:?} (expected limiting-form or reject)")]
pub struct ParsePolicyError(String);

impl FromStr for DegeneratePolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "limiting-form" | "limiting" => Ok(Self::LimitingForm),
            "reject" => Ok(Self::Reject),
            _ => Err(ParsePolicyError(s.to_string())),
        }
    }
}

impl fmt::Display for DegeneratePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LimitingForm => f.write_str("limiting-form"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Grid and degeneracy settings for one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of samples in the time grid.
    pub grid_points: usize,
    /// Base-10 exponent of the first sample time, in days.
    pub grid_start_exponent: f64,
    /// The last sample is at `horizon_factor * max(T½)`.
    pub horizon_factor: f64,
    /// Relative gap under which two decay constants count as coincident.
    pub degenerate_tolerance: f64,
    pub degenerate_policy: DegeneratePolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_points: DEFAULT_GRID_POINTS,
            grid_start_exponent: DEFAULT_GRID_START_EXPONENT,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
            degenerate_tolerance: DEFAULT_DEGENERATE_TOLERANCE,
            degenerate_policy: DegeneratePolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Last sample time for a chain whose longest half-life is `max_half_life` days.
    pub fn horizon(&self, max_half_life: f64) -> f64 {
        self.horizon_factor * max_half_life
    }
}
