//! marionette-core: layout conversion, host value/slot types, config, errors.

pub mod config;
pub mod error;
pub mod layout;
pub mod types;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use config::{JointConfig, ModelConfig};
pub use error::ConfigError;
pub use layout::{MatrixLayout, reindex};
pub use types::{OutputSlot, SlotShape, Value};
