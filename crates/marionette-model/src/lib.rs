//! marionette-model: whole-body model interface and shared model state.
//!
//! Defines the [`WholeBodyModel`] query trait the dispatch layer consumes,
//! the process-wide [`ModelState`] that holds the single active model
//! handle, and a reference [`ChainModel`] implementation built from a
//! [`ModelConfig`](marionette_core::ModelConfig) joint table.

pub mod chain;
pub mod error;
pub mod model;
pub mod state;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use chain::ChainModel;
pub use error::ModelError;
pub use model::{BASE_DOF, POSE_DIM, WholeBodyModel};
pub use state::ModelState;
