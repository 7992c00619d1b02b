//! Error types for whole-body model queries.

use thiserror::Error;

/// Errors surfaced by a [`WholeBodyModel`](crate::WholeBodyModel) or by the
/// shared [`ModelState`](crate::ModelState).
#[derive(Debug, Error)]
pub enum ModelError {
    /// No model has been loaded into the shared state. Fatal for the
    /// current session: no component can proceed without a model.
    #[error("no whole-body model loaded")]
    NotInitialised,

    /// A referenced link/frame name is unknown to the model.
    #[error("unknown frame: {0}")]
    UnknownFrame(String),

    /// A buffer or configuration vector has the wrong number of elements.
    #[error("{what}: expected {expected} elements, got {got}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    /// The model rejected its initialisation parameters.
    #[error("model initialisation failed: {0}")]
    InitialisationFailed(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            ModelError::NotInitialised.to_string(),
            "no whole-body model loaded"
        );
        assert_eq!(
            ModelError::UnknownFrame("l_sole".into()).to_string(),
            "unknown frame: l_sole"
        );
        assert_eq!(
            ModelError::ShapeMismatch {
                what: "joint configuration",
                expected: 7,
                got: 3
            }
            .to_string(),
            "joint configuration: expected 7 elements, got 3"
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn error_is_send_sync() {
        assert_send_sync::<ModelError>();
    }
}
