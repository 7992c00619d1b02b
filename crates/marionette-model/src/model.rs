//! The whole-body model query interface consumed by the dispatch layer.

use marionette_core::ModelConfig;

use crate::error::ModelError;

/// Degrees of freedom of the unactuated floating base. The base occupies
/// the leading 6 rows/columns of every Jacobian and mass matrix.
pub const BASE_DOF: usize = 6;

/// Elements of a frame pose: position `[x, y, z]` followed by a unit
/// quaternion `[w, x, y, z]`.
pub const POSE_DIM: usize = 7;

/// Query interface of a whole-body dynamics/kinematics model.
///
/// All queries are synchronous and write into caller-provided buffers;
/// matrix results are produced in the model's native row-major convention.
/// The numerical content (symmetry and positive semi-definiteness of the
/// mass matrix, well-formed joint bounds) is the model's responsibility,
/// not re-verified by callers.
pub trait WholeBodyModel: Send + Sync {
    /// Number of actuated joints.
    fn dof(&self) -> usize;

    /// Whether `name` refers to a known link/frame.
    fn has_frame(&self, name: &str) -> bool;

    /// Per-joint position bounds, written into two `dof()`-length buffers.
    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> Result<(), ModelError>;

    /// Jacobian relating floating-base + joint velocities to the spatial
    /// velocity of `frame`, written row-major into a `6 * (6 + dof())`
    /// buffer. The leading 6 columns are the floating base.
    fn jacobian(&self, frame: &str, q: &[f64], out: &mut [f64]) -> Result<(), ModelError>;

    /// Joint-space mass matrix including the floating base, written
    /// row-major into a `(6 + dof())^2` buffer.
    fn mass_matrix(&self, q: &[f64], out: &mut [f64]) -> Result<(), ModelError>;

    /// Pose of `frame` in the base frame, written into a
    /// [`POSE_DIM`]-element buffer.
    fn forward_kinematics(&self, frame: &str, q: &[f64], out: &mut [f64])
    -> Result<(), ModelError>;

    /// Generalised bias forces (gravity and velocity-dependent terms),
    /// written into a `6 + dof()` buffer.
    fn bias_forces(&self, q: &[f64], dq: &[f64], out: &mut [f64]) -> Result<(), ModelError>;

    /// (Re)initialise the model. `None` refreshes from the parameters the
    /// model already holds; `Some` replaces them. Idempotent: repeated
    /// calls with the same parameters leave the model in the same state.
    fn initialise(&mut self, config: Option<&ModelConfig>) -> Result<(), ModelError>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify the trait is object-safe (can be used as `dyn WholeBodyModel`).
    #[test]
    fn trait_is_object_safe() {
        fn _accepts_boxed(_: Box<dyn WholeBodyModel>) {}
    }

    #[test]
    fn trait_is_send_sync() {
        fn _assert_send_sync<T: Send + Sync>() {}
        _assert_send_sync::<Box<dyn WholeBodyModel>>();
    }
}
