//! Logarithmically spaced evaluation grid.
//!
//! Samples are dense near `t = 0`, where activities change fastest on a log
//! scale, and still cover several half-lives of the slowest chain member.

use bateman_core::error::DecayError;

use crate::config::SimulationConfig;

/// `n` points `10^e` with exponents evenly spaced over `[start, stop]`, both inclusive.
///
/// The last exponent is `stop` exactly rather than `start + (n-1)·step`.
pub fn logspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![10f64.powf(start)];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let exponent = if i == n - 1 { stop } else { start + step * i as f64 };
            10f64.powf(exponent)
        })
        .collect()
}

/// Evaluation grid in days for a chain whose longest half-life is `max_half_life`.
pub fn time_grid(config: &SimulationConfig, max_half_life: f64) -> Result<Vec<f64>, DecayError> {
    if config.grid_points < 2 {
        return Err(DecayError::InvalidGrid(format!(
            "need at least 2 points, got {}",
            config.grid_points
        )));
    }
    let horizon = config.horizon(max_half_life);
    if !(horizon.is_finite() && horizon > 0.0) {
        return Err(DecayError::InvalidGrid(format!("horizon {horizon} is not a positive finite time")));
    }
    let start = config.grid_start_exponent;
    let stop = horizon.log10();
    if !start.is_finite() || stop <= start {
        return Err(DecayError::InvalidGrid(format!(
            "horizon {horizon} days does not extend past the first sample 1e{start} days"
        )));
    }
    Ok(logspace(start, stop, config.grid_points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rel_close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol * b.abs()
    }

    #[test]
    fn logspace_endpoints() {
        let g = logspace(-4.0, 2.0, 7);
        assert_eq!(g.len(), 7);
        assert!(rel_close(g[0], 1e-4, 1e-12));
        assert!(rel_close(g[6], 100.0, 1e-12));
        assert!(rel_close(g[4], 1.0, 1e-12));
    }

    #[test]
    fn logspace_constant_ratio() {
        let g = logspace(0.0, 3.0, 4);
        for w in g.windows(2) {
            assert!(rel_close(w[1] / w[0], 10.0, 1e-12));
        }
    }

    #[test]
    fn logspace_single_point() {
        assert_eq!(logspace(0.0, 5.0, 1), vec![1.0]);
    }

    #[test]
    fn default_grid_for_ra226() {
        let cfg = SimulationConfig::default();
        let g = time_grid(&cfg, 584_000.0).unwrap();
        assert_eq!(g.len(), 3000);
        assert!(rel_close(g[0], 1e-4, 1e-12));
        assert!(rel_close(g[2999], 2_920_000.0, 1e-12));
    }

    #[test]
    fn rejects_too_few_points() {
        let cfg = SimulationConfig {
            grid_points: 1,
            ..SimulationConfig::default()
        };
        assert!(matches!(time_grid(&cfg, 10.0), Err(DecayError::InvalidGrid(_))));
    }

    #[test]
    fn rejects_horizon_before_first_sample() {
        // 5 * 1e-6 days is earlier than 1e-4 days.
        let cfg = SimulationConfig::default();
        assert!(matches!(time_grid(&cfg, 1e-6), Err(DecayError::InvalidGrid(_))));
    }

    #[test]
    fn rejects_infinite_horizon() {
        let cfg = SimulationConfig::default();
        assert!(time_grid(&cfg, f64::MAX).is_err());
    }

    proptest! {
        #[test]
        fn grid_strictly_increasing(max_half_life in 1e-3f64..1e13, n in 2usize..2000) {
            let cfg = SimulationConfig { grid_points: n, ..SimulationConfig::default() };
            let g = time_grid(&cfg, max_half_life).unwrap();
            prop_assert_eq!(g.len(), n);
            for w in g.windows(2) {
                prop_assert!(w[1] > w[0], "grid not increasing: {} then {}", w[0], w[1]);
            }
        }
    }
}
