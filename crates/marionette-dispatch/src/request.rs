//! Host-facing request/response message types.
//!
//! Defines the serialisable envelope a numerical host uses to drive the
//! dispatcher: a component wire name, the number of outputs the caller
//! expects, and an ordered argument list. Errors cross the boundary as an
//! error response, never as a panic.

use serde::{Deserialize, Serialize};

use marionette_core::{OutputSlot, Value};

use crate::dispatcher::Dispatcher;
use crate::error::DispatchError;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// One call-by-name request from the host.
///
/// # Example
///
/// ```
/// use marionette_dispatch::Request;
///
/// let json = r#"{"component":"joint-limits","nargout":2}"#;
/// let req: Request = serde_json::from_str(json).unwrap();
/// assert_eq!(req.component, "joint-limits");
/// assert_eq!(req.nargout, 2);
/// assert!(req.args.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Request {
    /// Component wire name (e.g. `"jacobian"`).
    pub component: String,
    /// Number of outputs the caller expects.
    #[serde(default)]
    pub nargout: usize,
    /// Ordered argument list.
    #[serde(default)]
    pub args: Vec<Value>,
    /// Opt into the trust-the-previous-validation fast path.
    #[serde(default)]
    pub fast: bool,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Outcome of a dispatched request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Filled output slots, in declaration order.
    Outputs { slots: Vec<OutputSlot> },
    /// The request failed; no outputs were produced.
    Error { message: String },
}

impl Response {
    /// Wrap filled slots.
    #[must_use]
    pub fn from_outputs(slots: Vec<OutputSlot>) -> Self {
        Self::Outputs { slots }
    }

    /// Create an error response.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }
}

/// Drive one request against `dispatcher`, converting any dispatch error
/// into an error response at the host boundary.
pub fn handle_request(dispatcher: &mut Dispatcher, request: &Request) -> Response {
    let result: Result<Vec<OutputSlot>, DispatchError> = if request.fast {
        dispatcher.dispatch_fast(&request.component, request.nargout)
    } else {
        dispatcher.dispatch(&request.component, request.nargout, &request.args)
    };
    match result {
        Ok(slots) => Response::from_outputs(slots),
        Err(err) => Response::error(err.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
