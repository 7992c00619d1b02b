//! The component contract: a closed set of call-by-name request handlers.
//!
//! Every handler satisfies the same three-step contract:
//!
//! 1. `allocate_return_space` — check the caller's requested output count
//!    against the component's fixed arity, then allocate correctly-shaped
//!    slots from the model's current DOF. Nothing is allocated on an arity
//!    mismatch.
//! 2. `compute` — parse and validate typed inputs into instance-owned
//!    scratch, query the shared model, write the slots.
//! 3. `compute_fast` — same result path but trusting the scratch parsed by
//!    the last successful `compute`; callers opt in when inputs are stable
//!    across repeated calls (e.g. a tight simulation loop).
//!
//! Dispatch is a single `match` over [`Component`] rather than dynamic
//! method resolution; slot containers are borrowed for the duration of one
//! call and never stored past return.

use marionette_core::{OutputSlot, Value};
use marionette_model::ModelState;

use crate::bias_forces::BiasForcesComponent;
use crate::error::{ArityError, DispatchError};
use crate::forward_kinematics::ForwardKinematicsComponent;
use crate::initialise::ModelInitialiseComponent;
use crate::jacobian::JacobianComponent;
use crate::joint_limits::JointLimitsComponent;
use crate::mass_matrix::MassMatrixComponent;

// ---------------------------------------------------------------------------
// ComponentKind
// ---------------------------------------------------------------------------

/// Identifier of a request handler, 1:1 with the wire names the host uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    JointLimits,
    Jacobian,
    MassMatrix,
    ForwardKinematics,
    BiasForces,
    ModelInitialise,
}

impl ComponentKind {
    /// All known kinds, in wire-name order.
    pub const ALL: [Self; 6] = [
        Self::JointLimits,
        Self::Jacobian,
        Self::MassMatrix,
        Self::ForwardKinematics,
        Self::BiasForces,
        Self::ModelInitialise,
    ];

    /// Resolve a wire name to a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "joint-limits" => Some(Self::JointLimits),
            "jacobian" => Some(Self::Jacobian),
            "mass-matrix" => Some(Self::MassMatrix),
            "forward-kinematics" => Some(Self::ForwardKinematics),
            "bias-forces" => Some(Self::BiasForces),
            "model-initialise" => Some(Self::ModelInitialise),
            _ => None,
        }
    }

    /// The wire name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            Self::JointLimits => "joint-limits",
            Self::Jacobian => "jacobian",
            Self::MassMatrix => "mass-matrix",
            Self::ForwardKinematics => "forward-kinematics",
            Self::BiasForces => "bias-forces",
            Self::ModelInitialise => "model-initialise",
        }
    }

    /// Fixed number of outputs this kind produces.
    pub const fn output_arity(self) -> usize {
        match self {
            Self::JointLimits => 2,
            Self::Jacobian | Self::MassMatrix | Self::ForwardKinematics | Self::BiasForces => 1,
            Self::ModelInitialise => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// A live request handler carrying its per-kind scratch state.
#[derive(Debug)]
pub enum Component {
    JointLimits(JointLimitsComponent),
    Jacobian(JacobianComponent),
    MassMatrix(MassMatrixComponent),
    ForwardKinematics(ForwardKinematicsComponent),
    BiasForces(BiasForcesComponent),
    ModelInitialise(ModelInitialiseComponent),
}

impl Component {
    /// Fresh handler for the given kind.
    pub fn new(kind: ComponentKind) -> Self {
        match kind {
            ComponentKind::JointLimits => Self::JointLimits(JointLimitsComponent),
            ComponentKind::Jacobian => Self::Jacobian(JacobianComponent::default()),
            ComponentKind::MassMatrix => Self::MassMatrix(MassMatrixComponent::default()),
            ComponentKind::ForwardKinematics => {
                Self::ForwardKinematics(ForwardKinematicsComponent::default())
            }
            ComponentKind::BiasForces => Self::BiasForces(BiasForcesComponent::default()),
            ComponentKind::ModelInitialise => {
                Self::ModelInitialise(ModelInitialiseComponent::default())
            }
        }
    }

    /// This handler's kind.
    pub const fn kind(&self) -> ComponentKind {
        match self {
            Self::JointLimits(_) => ComponentKind::JointLimits,
            Self::Jacobian(_) => ComponentKind::Jacobian,
            Self::MassMatrix(_) => ComponentKind::MassMatrix,
            Self::ForwardKinematics(_) => ComponentKind::ForwardKinematics,
            Self::BiasForces(_) => ComponentKind::BiasForces,
            Self::ModelInitialise(_) => ComponentKind::ModelInitialise,
        }
    }

    /// Size and allocate output slots for `requested` outputs.
    ///
    /// Fails with [`ArityError`] — allocating nothing — when `requested`
    /// differs from the kind's fixed arity. The caller must not proceed to
    /// `compute` after a failure.
    pub fn allocate_return_space(
        &mut self,
        state: &ModelState,
        requested: usize,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        let expected = self.kind().output_arity();
        if requested != expected {
            return Err(ArityError {
                component: self.kind().name(),
                expected,
                got: requested,
            }
            .into());
        }
        match self {
            Self::JointLimits(c) => c.allocate_return_space(state, slots),
            Self::Jacobian(c) => c.allocate_return_space(state, slots),
            Self::MassMatrix(c) => c.allocate_return_space(state, slots),
            Self::ForwardKinematics(c) => c.allocate_return_space(state, slots),
            Self::BiasForces(c) => c.allocate_return_space(state, slots),
            Self::ModelInitialise(c) => c.allocate_return_space(state, slots),
        }
    }

    /// Parse `args`, query the model, fill the previously allocated slots.
    pub fn compute(
        &mut self,
        state: &mut ModelState,
        args: &[Value],
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        match self {
            Self::JointLimits(c) => c.compute(state, args, slots),
            Self::Jacobian(c) => c.compute(state, args, slots),
            Self::MassMatrix(c) => c.compute(state, args, slots),
            Self::ForwardKinematics(c) => c.compute(state, args, slots),
            Self::BiasForces(c) => c.compute(state, args, slots),
            Self::ModelInitialise(c) => c.compute(state, args, slots),
        }
    }

    /// Re-run the query with the inputs parsed by the last successful
    /// `compute`, skipping validation.
    pub fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        match self {
            Self::JointLimits(c) => c.compute_fast(state, slots),
            Self::Jacobian(c) => c.compute_fast(state, slots),
            Self::MassMatrix(c) => c.compute_fast(state, slots),
            Self::ForwardKinematics(c) => c.compute_fast(state, slots),
            Self::BiasForces(c) => c.compute_fast(state, slots),
            Self::ModelInitialise(c) => c.compute_fast(state, slots),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
