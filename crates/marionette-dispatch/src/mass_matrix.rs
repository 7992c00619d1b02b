//! Mass-matrix component: joint-space inertia including the floating base.

use marionette_core::{OutputSlot, Value};
use marionette_model::{BASE_DOF, ModelState, POSE_DIM};

use crate::args::sized_vector_arg;
use crate::error::DispatchError;

/// Fixed arity: inputs are the joint configuration, optionally preceded by
/// a 7-element floating-base pose; 1 output, the `(6+DOF)^2` square matrix.
///
/// Symmetry and positive semi-definiteness come from the underlying
/// dynamics and are not re-verified here. Because the matrix is symmetric,
/// the model's row-major result and the host's column-major slot coincide
/// and no layout conversion is needed.
#[derive(Debug, Default)]
pub struct MassMatrixComponent {
    /// Parsed joint configuration, overwritten on each `compute`.
    q: Vec<f64>,
    primed: bool,
}

impl MassMatrixComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        state: &ModelState,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        let n = BASE_DOF + state.dof()?;
        slots.push(OutputSlot::matrix(n, n));
        Ok(())
    }

    pub(crate) fn compute(
        &mut self,
        state: &mut ModelState,
        args: &[Value],
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        let model = state.model()?;
        let dof = model.dof();

        // Floating-base hosts pass [base_pose, q]; fixed-base hosts just [q].
        // The pose is validated but the model query is base-frame relative.
        let q = if args.len() >= 2 {
            sized_vector_arg(args, 0, "base pose", POSE_DIM)?;
            sized_vector_arg(args, 1, "joint configuration", dof)?
        } else {
            sized_vector_arg(args, 0, "joint configuration", dof)?
        };

        self.q.clear();
        self.q.extend_from_slice(q);
        self.primed = true;

        model.mass_matrix(&self.q, slots[0].as_mut_slice())?;
        Ok(())
    }

    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        if !self.primed {
            return Err(DispatchError::FastPathUnprimed("mass-matrix"));
        }
        let model = state.model()?;
        model.mass_matrix(&self.q, slots[0].as_mut_slice())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
