//! Bateman populations through divided differences of `exp(-λt)`.
//!
//! For a linear chain with decay constants `λ1..λn` the n-th population is
//!
//! ```text
//! Nn(t) = N1(0) · λ1⋯λ(n-1) · (-1)^(n-1) · e[λ1, …, λn](t)
//! ```
//!
//! where `e[…]` is the divided difference of `λ ↦ exp(-λt)`. With distinct
//! nodes this expands to the usual Bateman sum. Coincident nodes take the
//! confluent limit `e[λ, …, λ] = (-t)^k · exp(-λt) / k!` for `k + 1` equal
//! nodes, which yields the polynomial-in-t solution.

/// Whether `a` and `b` are equal within `tolerance` relative to the larger one.
pub fn coincident(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance * a.abs().max(b.abs())
}

/// Divided difference `e[nodes](t)` of `λ ↦ exp(-λt)`.
///
/// Nodes are sorted and near-coincident neighbours snapped together before
/// building the table, so repeated nodes use the derivative form.
pub fn exp_divided_difference(nodes: &[f64], t: f64, tolerance: f64) -> f64 {
    let mut x = nodes.to_vec();
    x.sort_by(f64::total_cmp);
    for i in 1..x.len() {
        if coincident(x[i - 1], x[i], tolerance) {
            x[i] = x[i - 1];
        }
    }

    let n = x.len();
    let mut table: Vec<f64> = x.iter().map(|&xi| (-xi * t).exp()).collect();
    let mut factorial = 1.0;
    for order in 1..n {
        factorial *= order as f64;
        // table[i] becomes e[x_i .. x_{i+order}]; table[i + 1] still holds the previous order.
        for i in 0..n - order {
            let span = x[i + order] - x[i];
            table[i] = if span == 0.0 {
                (-t).powi(order as i32) * (-x[i] * t).exp() / factorial
            } else {
                (table[i + 1] - table[i]) / span
            };
        }
    }
    table[0]
}

/// Populations of every chain member at time `t`, starting from `initial_parent`.
pub fn chain_populations(initial_parent: f64, lambdas: &[f64], t: f64, tolerance: f64) -> Vec<f64> {
    let mut populations = Vec::with_capacity(lambdas.len());
    let mut feed = initial_parent;
    let mut sign = 1.0;
    for n in 1..=lambdas.len() {
        populations.push(feed * sign * exp_divided_difference(&lambdas[..n], t, tolerance));
        feed *= lambdas[n - 1];
        sign = -sign;
    }
    populations
}
