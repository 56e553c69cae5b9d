//! Decay engine implementing the [`ChainEvaluator`] trait.
//!
//! Evaluates the three-member Bateman solution on a logarithmic time grid.
//! Distinct decay constants use the closed-form three-term sum; coincident
//! constants either fall back to the confluent limiting form or are rejected,
//! depending on [`DegeneratePolicy`].

use bateman_core::error::DecayError;
use bateman_core::traits::ChainEvaluator;
use bateman_core::types::{
    ActivityTimeSeries, ChainMember, DecayParameters, EquilibriumClass, PopulationSeries,
};
use tracing::{debug, warn};

use crate::config::{DegeneratePolicy, SimulationConfig};
use crate::confluent::{chain_populations, coincident};
use crate::equilibrium::equilibrium_type;
use crate::grid::time_grid;

/// The production chain evaluator.
///
/// Holds only immutable configuration; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct BatemanEngine {
    config: SimulationConfig,
}

impl BatemanEngine {
    /// Create an engine with the default grid and degeneracy settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// First pair of members whose decay constants coincide, if any.
    fn coincident_pair(&self, lambdas: &[f64; 3]) -> Option<(ChainMember, ChainMember)> {
        let tol = self.config.degenerate_tolerance;
        [
            (ChainMember::Parent, ChainMember::Daughter),
            (ChainMember::Parent, ChainMember::Granddaughter),
            (ChainMember::Daughter, ChainMember::Granddaughter),
        ]
        .into_iter()
        .find(|(a, b)| coincident(lambdas[a.index()], lambdas[b.index()], tol))
    }
}

/// Three-term Bateman populations at time `t` for distinct decay constants.
fn closed_form(n10: f64, [l1, l2, l3]: [f64; 3], t: f64) -> [f64; 3] {
    let e1 = (-l1 * t).exp();
    let e2 = (-l2 * t).exp();
    let e3 = (-l3 * t).exp();

    let n1 = n10 * e1;
    let n2 = (l1 * n10 / (l2 - l1)) * (e1 - e2);
    let n3 = n10
        * l1
        * l2
        * (e1 / ((l2 - l1) * (l3 - l1))
            + e2 / ((l1 - l2) * (l3 - l2))
            + e3 / ((l1 - l3) * (l2 - l3)));
    [n1, n2, n3]
}

impl ChainEvaluator for BatemanEngine {
    fn populations(&self, params: &DecayParameters) -> Result<PopulationSeries, DecayError> {
        let lambdas = params.decay_constants();
        let n10 = params.initial_activity() / lambdas[0];
        let times = time_grid(&self.config, params.max_half_life())?;

        debug!(
            "decay constants (1/day): {:e}, {:e}, {:e}; N1(0) = {:e}",
            lambdas[0], lambdas[1], lambdas[2], n10
        );
        debug!(
            "time grid: {} points from {:e} to {:e} days",
            times.len(),
            times[0],
            times[times.len() - 1]
        );

        let limiting = match self.coincident_pair(&lambdas) {
            None => false,
            Some((first, second)) => match self.config.degenerate_policy {
                DegeneratePolicy::Reject => {
                    return Err(DecayError::DegenerateDecayConstants { first, second });
                }
                DegeneratePolicy::LimitingForm => {
                    warn!("{first} and {second} decay constants coincide; using limiting form");
                    true
                }
            },
        };

        let tol = self.config.degenerate_tolerance;
        let mut populations: [Vec<f64>; 3] = Default::default();
        for series in populations.iter_mut() {
            series.reserve_exact(times.len());
        }
        for &t in &times {
            let n = if limiting {
                let v = chain_populations(n10, &lambdas, t, tol);
                [v[0], v[1], v[2]]
            } else {
                closed_form(n10, lambdas, t)
            };
            for (series, value) in populations.iter_mut().zip(n) {
                series.push(value);
            }
        }

        PopulationSeries::new(n10, times, populations)
    }

    fn evaluate(&self, params: &DecayParameters) -> Result<ActivityTimeSeries, DecayError> {
        let lambdas = params.decay_constants();
        let (times, populations) = self.populations(params)?.into_parts();

        // A_i = λ_i · N_i
        let [a1, a2, a3] = ChainMember::ALL.map(|m| {
            let lambda = lambdas[m.index()];
            populations[m.index()]
                .iter()
                .map(|n| lambda * n)
                .collect::<Vec<f64>>()
        });

        // Normalize by the first sampled parent activity, not by A0 at t = 0.
        let reference = a1[0];
        if !(reference.is_finite() && reference > 0.0) {
            return Err(DecayError::NonFiniteNormalization(reference));
        }
        let [a1, a2, a3] =
            [a1, a2, a3].map(|a| a.into_iter().map(|v| v / reference).collect::<Vec<f64>>());

        ActivityTimeSeries::new(times, a1, a2, a3)
    }

    fn classify(&self, params: &DecayParameters) -> EquilibriumClass {
        let [t1, t2, t3] = params.half_lives();
        equilibrium_type(t1, t2, t3)
    }
}

/// Evaluate a chain with the default engine.
///
/// `a0` is the initial parent activity; `t1`, `t2`, `t3` are the parent,
/// daughter and granddaughter half-lives in days.
///
/// # Examples
///
/// ```
/// use bateman_decay::bateman_chain;
/// let series = bateman_chain(1.0, 584_000.0, 3.8, 3.1 / 1440.0).unwrap();
/// assert_eq!(series.len(), 3000);
/// assert_eq!(series.parent()[0], 1.0);
/// ```
pub fn bateman_chain(a0: f64, t1: f64, t2: f64, t3: f64) -> Result<ActivityTimeSeries, DecayError> {
    let params = DecayParameters::new(a0, t1, t2, t3)?;
    BatemanEngine::new().evaluate(&params)
}
