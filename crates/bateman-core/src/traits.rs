//! Trait interface between the presentation layer and the decay engine.
//!
//! [`ChainEvaluator`] is implemented by the engine in `bateman-decay`.
//! Callers such as scenario resolution and the CLI only depend on this trait.

use crate::error::DecayError;
use crate::types::{ActivityTimeSeries, DecayParameters, EquilibriumClass, PopulationSeries};

/// Pure evaluation of a three-member decay chain.
///
/// Implementations hold no mutable state, so one evaluator can serve
/// concurrent callers with different parameters.
pub trait ChainEvaluator: Send + Sync {
    /// Unnormalized populations `N1, N2, N3` on the evaluation grid.
    fn populations(&self, params: &DecayParameters) -> Result<PopulationSeries, DecayError>;

    /// Relative activities normalized to the parent activity at the first grid point.
    fn evaluate(&self, params: &DecayParameters) -> Result<ActivityTimeSeries, DecayError>;

    /// Equilibrium class derived from the half-lives.
    fn classify(&self, params: &DecayParameters) -> EquilibriumClass;
}
