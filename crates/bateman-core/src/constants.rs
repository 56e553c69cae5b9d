//! Simulator constants. All times are in days unless stated otherwise.

/// Minutes in one day.
pub const MINUTES_PER_DAY: f64 = 60.0 * 24.0;

/// Hours in one day.
pub const HOURS_PER_DAY: f64 = 24.0;

/// Days in one year.
///
/// Fixed 365-day year, not a leap-aware calendar year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Number of samples in the evaluation time grid.
pub const DEFAULT_GRID_POINTS: usize = 3000;

/// Base-10 exponent of the first grid time (10^-4 days).
pub const DEFAULT_GRID_START_EXPONENT: f64 = -4.0;

/// The grid ends at this multiple of the longest half-life in the chain.
pub const DEFAULT_HORIZON_FACTOR: f64 = 5.0;

/// Relative gap below which two decay constants are treated as coincident.
///
/// `|λi - λj| <= DEFAULT_DEGENERATE_TOLERANCE * max(λi, λj)`
pub const DEFAULT_DEGENERATE_TOLERANCE: f64 = 1e-8;

/// A parent must outlive both descendants by this factor for secular equilibrium.
pub const SECULAR_HALF_LIFE_RATIO: f64 = 100.0;

/// Initial parent activity used for every preset series.
pub const PRESET_INITIAL_ACTIVITY: f64 = 1.0;

/// Lower bound for a custom initial parent activity (relative units).
pub const MIN_CUSTOM_ACTIVITY: f64 = 0.01;

/// Upper bound for a custom initial parent activity (relative units).
pub const MAX_CUSTOM_ACTIVITY: f64 = 1000.0;

/// Smallest accepted custom half-life value, in the unit it was entered in.
pub const MIN_CUSTOM_HALF_LIFE: f64 = 1e-6;

/// Stable end-product label shown for custom chains.
pub const CUSTOM_STABLE_LABEL: &str = "—";

/// Title used for custom chains.
pub const CUSTOM_SERIES_NAME: &str = "Custom";
