//! # bateman-decay: Bateman decay chain evaluator.
//!
//! Evaluates parent → daughter → granddaughter activities for a linear
//! three-member chain:
//! - **Closed form**: the standard three-term Bateman solution when all
//!   decay constants are distinct.
//! - **Limiting form**: confluent divided differences of `exp(-λt)` when two
//!   or more decay constants coincide, giving the polynomial-in-t limit.
//! - **Logarithmic grid**: samples concentrated near `t = 0`, reaching a
//!   multiple of the longest half-life.
//! - **Equilibrium classifier**: secular / transient / user-defined label
//!   from the half-lives alone.

pub mod config;
pub mod confluent;
pub mod engine;
pub mod equilibrium;
pub mod grid;

pub use config::{DegeneratePolicy, SimulationConfig};
pub use engine::{bateman_chain, BatemanEngine};
pub use equilibrium::equilibrium_type;
