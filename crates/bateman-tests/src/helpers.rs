//! Shared test helpers for integration and property tests.

use bateman_core::traits::ChainEvaluator;
use bateman_core::types::{ActivityTimeSeries, DecayParameters, PopulationSeries};
use bateman_decay::{BatemanEngine, SimulationConfig};

/// Engine with a coarse grid for fast property runs.
pub fn coarse_engine(grid_points: usize) -> BatemanEngine {
    BatemanEngine::with_config(SimulationConfig {
        grid_points,
        ..SimulationConfig::default()
    })
}

/// Parameters with unit initial activity; half-lives in days.
pub fn params(t1: f64, t2: f64, t3: f64) -> DecayParameters {
    DecayParameters::new(1.0, t1, t2, t3).unwrap()
}

/// Evaluate with the default engine.
pub fn evaluate(t1: f64, t2: f64, t3: f64) -> ActivityTimeSeries {
    BatemanEngine::new().evaluate(&params(t1, t2, t3)).unwrap()
}

/// Largest `(N1 + N2 + N3) / N1(0)` over the grid.
///
/// Atoms only leave the chain through the stable end product, so this never
/// exceeds one beyond rounding.
pub fn max_total_fraction(series: &PopulationSeries) -> f64 {
    let n0 = series.initial_parent();
    (0..series.len())
        .map(|i| series.total_at(i) / n0)
        .fold(0.0, f64::max)
}

/// Relative closeness with a floor for values near zero.
pub fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * a.abs().max(b.abs()).max(f64::MIN_POSITIVE)
}
