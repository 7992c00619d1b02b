//! Error taxonomy for the dispatch layer.
//!
//! Every failure is detected locally and propagated to the host boundary;
//! there is no internal retry. These are usage errors, not transient I/O
//! failures.

use thiserror::Error;

use marionette_core::ConfigError;
use marionette_model::ModelError;

// ---------------------------------------------------------------------------
// ArityError
// ---------------------------------------------------------------------------

/// `allocate_return_space` was called with an output count that does not
/// match the component's fixed arity. Nothing is allocated.
#[derive(Debug, Error)]
#[error("{component}: {expected} output arguments required, got {got}")]
pub struct ArityError {
    pub component: &'static str,
    pub expected: usize,
    pub got: usize,
}

// ---------------------------------------------------------------------------
// ShapeError
// ---------------------------------------------------------------------------

/// An input argument is missing, malformed, or out of range. Detected
/// before any model query is made; previously allocated outputs remain
/// untouched (stale from allocation time, not zero-filled).
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("{what}: expected length {expected}, got {got}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("missing argument {index}: {what}")]
    MissingArgument { index: usize, what: &'static str },

    #[error("argument {index}: expected a {expected}, got a {got}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        got: &'static str,
    },

    #[error("unknown frame: {0}")]
    UnknownFrame(String),
}

// ---------------------------------------------------------------------------
// DispatchError
// ---------------------------------------------------------------------------

/// Top-level error type for component dispatch.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Arity error: {0}")]
    Arity(#[from] ArityError),

    #[error("Argument shape error: {0}")]
    Shape(#[from] ShapeError),

    #[error("unknown component: {0}")]
    UnknownComponent(String),

    /// `compute_fast` was called before any successful `compute` primed the
    /// component's parsed-argument scratch.
    #[error("fast path for {0} not primed; call compute first")]
    FastPathUnprimed(&'static str),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
