//! marionette-dispatch: call-by-name components over a whole-body model.
//!
//! The host hands the [`Dispatcher`] a component wire name, a requested
//! output count, and an ordered argument list; the dispatcher looks up (or
//! lazily builds) the single live handler for that kind and drives the
//! allocate / compute contract against the shared
//! [`ModelState`](marionette_model::ModelState). One request at a time,
//! synchronous, no internal recovery: failures surface as typed
//! [`DispatchError`]s, converted to error responses at the protocol
//! boundary.

mod args;

pub mod bias_forces;
pub mod component;
pub mod dispatcher;
pub mod error;
pub mod forward_kinematics;
pub mod initialise;
pub mod jacobian;
pub mod joint_limits;
pub mod mass_matrix;
pub mod registry;
pub mod request;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use component::{Component, ComponentKind};
pub use dispatcher::Dispatcher;
pub use error::{ArityError, DispatchError, ShapeError};
pub use registry::ComponentRegistry;
pub use request::{Request, Response, handle_request};
