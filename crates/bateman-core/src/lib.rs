//! # bateman-core
//! Foundation types, units and preset decay series for the Bateman simulator.

pub mod constants;
pub mod error;
pub mod presets;
pub mod scenario;
pub mod traits;
pub mod types;
pub mod units;

pub use presets::{find_preset, DecaySeries, PRESETS};
pub use types::{ActivityTimeSeries, ChainMember, DecayParameters, EquilibriumClass, PopulationSeries};
pub use units::{to_days, TimeUnit};
