//! Shared test fixtures and utilities for Marionette crates.
//!
//! Provides a scriptable [`MockModel`] with query counters, ready-made
//! [`ModelState`] fixtures, and deterministic RNG setup.

pub mod mocks;
pub mod rng;

// ---------------------------------------------------------------------------
// Re-exports for convenience
// ---------------------------------------------------------------------------

pub use mocks::{MockModel, MockProbe, state_with_mock};
pub use rng::{deterministic_matrix, random_configuration, seeded_rng};
