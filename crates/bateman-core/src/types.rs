//! Core data types: half-lives, decay parameters and evaluated series.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DecayError, ParameterError};
use crate::units::TimeUnit;

/// Position of a nuclide in the three-member chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainMember {
    Parent,
    Daughter,
    Granddaughter,
}

impl ChainMember {
    /// Members in decay order.
    pub const ALL: [ChainMember; 3] = [Self::Parent, Self::Daughter, Self::Granddaughter];

    /// Index into per-member arrays.
    pub fn index(&self) -> usize {
        match self {
            Self::Parent => 0,
            Self::Daughter => 1,
            Self::Granddaughter => 2,
        }
    }

    /// Capitalized name used in display labels.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Parent => "Parent",
            Self::Daughter => "Daughter",
            Self::Granddaughter => "Granddaughter",
        }
    }
}

impl fmt::Display for ChainMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Daughter => f.write_str("daughter"),
            Self::Granddaughter => f.write_str("granddaughter"),
        }
    }
}

/// A half-life as entered: a value and the unit it is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HalfLife {
    pub value: f64,
    pub unit: TimeUnit,
}

impl HalfLife {
    pub const fn new(value: f64, unit: TimeUnit) -> Self {
        Self { value, unit }
    }

    /// The half-life in days.
    pub fn to_days(&self) -> f64 {
        self.unit.to_days(self.value)
    }
}

impl fmt::Display for HalfLife {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// A named radionuclide with its half-life.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nuclide {
    pub symbol: &'static str,
    pub half_life: HalfLife,
    /// Half-life value as printed in legends, when it differs from the
    /// shortest rendering of the number (e.g. `14000000000.0`).
    pub written: Option<&'static str>,
}

impl Nuclide {
    pub const fn new(symbol: &'static str, value: f64, unit: TimeUnit) -> Self {
        Self {
            symbol,
            half_life: HalfLife::new(value, unit),
            written: None,
        }
    }

    /// Override the legend text of the half-life value.
    pub const fn written(mut self, text: &'static str) -> Self {
        self.written = Some(text);
        self
    }

    /// Legend label, e.g. `Ra-226 (T½=1600 years)`.
    pub fn label(&self) -> String {
        match self.written {
            Some(text) => format!("{} (T½={} {})", self.symbol, text, self.half_life.unit),
            None => format!("{} (T½={})", self.symbol, self.half_life),
        }
    }
}

/// Heuristic classification of the equilibrium a chain settles into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquilibriumClass {
    Secular,
    Transient,
    #[serde(rename = "User-defined")]
    UserDefined,
}

impl EquilibriumClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Secular => "Secular",
            Self::Transient => "Transient",
            Self::UserDefined => "User-defined",
        }
    }
}

impl fmt::Display for EquilibriumClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated inputs of one chain evaluation.
///
/// Half-lives are in days. Both the initial activity and all three
/// half-lives are strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayParameters {
    initial_activity: f64,
    half_lives: [f64; 3],
}

impl DecayParameters {
    /// Build parameters from an initial parent activity and three half-lives in days.
    pub fn new(
        initial_activity: f64,
        parent: f64,
        daughter: f64,
        granddaughter: f64,
    ) -> Result<Self, ParameterError> {
        if !(initial_activity.is_finite() && initial_activity > 0.0) {
            return Err(ParameterError::NonPositiveActivity(initial_activity));
        }
        let half_lives = [parent, daughter, granddaughter];
        for member in ChainMember::ALL {
            let value = half_lives[member.index()];
            if !(value.is_finite() && value > 0.0) {
                return Err(ParameterError::NonPositiveHalfLife { member, value });
            }
        }
        Ok(Self {
            initial_activity,
            half_lives,
        })
    }

    /// Initial parent activity `A0` in relative units.
    pub fn initial_activity(&self) -> f64 {
        self.initial_activity
    }

    /// Half-lives in days, in decay order.
    pub fn half_lives(&self) -> [f64; 3] {
        self.half_lives
    }

    pub fn half_life(&self, member: ChainMember) -> f64 {
        self.half_lives[member.index()]
    }

    /// Decay constants `λ = ln 2 / T½` in 1/day.
    pub fn decay_constants(&self) -> [f64; 3] {
        self.half_lives.map(|t| std::f64::consts::LN_2 / t)
    }

    /// Longest half-life in the chain.
    pub fn max_half_life(&self) -> f64 {
        self.half_lives.iter().copied().fold(f64::MIN, f64::max)
    }
}

/// Relative activities of the three chain members on a shared time axis.
///
/// Every activity is divided by the parent activity at the first sample,
/// so `parent()[0] == 1.0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityTimeSeries {
    times: Vec<f64>,
    parent: Vec<f64>,
    daughter: Vec<f64>,
    granddaughter: Vec<f64>,
}

impl ActivityTimeSeries {
    /// Assemble a series. All four sequences must have the same length.
    pub fn new(
        times: Vec<f64>,
        parent: Vec<f64>,
        daughter: Vec<f64>,
        granddaughter: Vec<f64>,
    ) -> Result<Self, DecayError> {
        check_lengths(
            times.len(),
            [parent.as_slice(), daughter.as_slice(), granddaughter.as_slice()],
        )?;
        Ok(Self {
            times,
            parent,
            daughter,
            granddaughter,
        })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Sample times in days, strictly increasing.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn parent(&self) -> &[f64] {
        &self.parent
    }

    pub fn daughter(&self) -> &[f64] {
        &self.daughter
    }

    pub fn granddaughter(&self) -> &[f64] {
        &self.granddaughter
    }

    pub fn activity(&self, member: ChainMember) -> &[f64] {
        match member {
            ChainMember::Parent => &self.parent,
            ChainMember::Daughter => &self.daughter,
            ChainMember::Granddaughter => &self.granddaughter,
        }
    }

    /// Index and value of the largest finite activity of `member`.
    pub fn peak(&self, member: ChainMember) -> Option<(usize, f64)> {
        self.activity(member)
            .iter()
            .copied()
            .enumerate()
            .filter(|(_, a)| a.is_finite())
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Whether every sample of every member is finite.
    pub fn is_finite(&self) -> bool {
        ChainMember::ALL
            .iter()
            .all(|m| self.activity(*m).iter().all(|a| a.is_finite()))
    }

    /// Decompose into `(times, parent, daughter, granddaughter)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>, Vec<f64>, Vec<f64>) {
        (self.times, self.parent, self.daughter, self.granddaughter)
    }
}

/// Unnormalized nuclide populations on the evaluation grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PopulationSeries {
    initial_parent: f64,
    times: Vec<f64>,
    populations: [Vec<f64>; 3],
}

impl PopulationSeries {
    pub fn new(
        initial_parent: f64,
        times: Vec<f64>,
        populations: [Vec<f64>; 3],
    ) -> Result<Self, DecayError> {
        let [n1, n2, n3] = &populations;
        check_lengths(times.len(), [n1.as_slice(), n2.as_slice(), n3.as_slice()])?;
        Ok(Self {
            initial_parent,
            times,
            populations,
        })
    }

    /// Parent population at `t = 0`, `N1(0) = A0 / λ1`.
    pub fn initial_parent(&self) -> f64 {
        self.initial_parent
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn population(&self, member: ChainMember) -> &[f64] {
        &self.populations[member.index()]
    }

    /// `N1 + N2 + N3` at sample `i`.
    pub fn total_at(&self, i: usize) -> f64 {
        self.populations.iter().map(|n| n[i]).sum()
    }

    /// Decompose into `(times, [N1, N2, N3])`.
    pub fn into_parts(self) -> (Vec<f64>, [Vec<f64>; 3]) {
        (self.times, self.populations)
    }
}

fn check_lengths(expected: usize, series: [&[f64]; 3]) -> Result<(), DecayError> {
    for s in series {
        if s.len() != expected {
            return Err(DecayError::SeriesLengthMismatch {
                expected,
                got: s.len(),
            });
        }
    }
    Ok(())
}
