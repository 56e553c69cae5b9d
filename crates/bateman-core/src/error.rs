//! Error types for the Bateman simulator.
use thiserror::Error;

use crate::types::ChainMember;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitError {
    #[error("unrecognized time unit: {0:?} (expected minutes, hours, days or years)")] UnrecognizedUnit(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("initial activity must be positive and finite, got {0}")] NonPositiveActivity(f64),
    #[error("{member} half-life must be positive and finite, got {value}")] NonPositiveHalfLife { member: ChainMember, value: f64 },
    #[error("initial activity {value} outside [{min}, {max}]")] ActivityOutOfRange { value: f64, min: f64, max: f64 },
    #[error("{member} half-life {value} below minimum {min}")] HalfLifeTooShort { member: ChainMember, value: f64, min: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecayError {
    #[error("{first} and {second} decay constants coincide")] DegenerateDecayConstants { first: ChainMember, second: ChainMember },
    #[error("invalid time grid: {0}")] InvalidGrid(String),
    #[error("parent activity at the first grid point is {0}, cannot normalize")] NonFiniteNormalization(f64),
    #[error("series length mismatch: expected {expected}, got {got}")] SeriesLengthMismatch { expected: usize, got: usize },
    #[error(transparent)] Parameter(#[from] ParameterError),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    #[error("unknown decay series: {0}")] UnknownPreset(String),
    #[error("custom decay parameters have not been confirmed")] CustomNotConfirmed,
    #[error(transparent)] Unit(#[from] UnitError),
    #[error(transparent)] Parameter(#[from] ParameterError),
}

#[derive(Error, Debug)]
pub enum BatemanError {
    #[error(transparent)] Unit(#[from] UnitError),
    #[error(transparent)] Parameter(#[from] ParameterError),
    #[error(transparent)] Decay(#[from] DecayError),
    #[error(transparent)] Scenario(#[from] ScenarioError),
}
