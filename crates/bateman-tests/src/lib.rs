//! Integration test suite for the Bateman simulator.
//!
//! Exercises the public surface of `bateman-core` and `bateman-decay`
//! together: every preset end to end, degenerate chains, custom input
//! bounds, and conservation properties over randomized chains.

pub mod helpers;
