//! Joint-limits component: per-joint lower/upper position bounds.

use marionette_core::{OutputSlot, Value};
use marionette_model::ModelState;

use crate::error::DispatchError;

/// Fixed arity: 0 inputs, 2 outputs (lower, upper), each DOF-length.
///
/// Cannot fail at the model layer once outputs are allocated; the fast
/// path is identical to `compute` since there are no inputs to re-validate.
#[derive(Debug, Default)]
pub struct JointLimitsComponent;

impl JointLimitsComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        state: &ModelState,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        let dof = state.dof()?;
        slots.push(OutputSlot::vector(dof));
        slots.push(OutputSlot::vector(dof));
        Ok(())
    }

    pub(crate) fn compute(
        &mut self,
        state: &mut ModelState,
        _args: &[Value],
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        self.query(state, slots)
    }

    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        self.query(state, slots)
    }

    fn query(&self, state: &ModelState, slots: &mut [OutputSlot]) -> Result<(), DispatchError> {
        let model = state.model()?;
        let (lower, upper) = slots.split_at_mut(1);
        model.joint_limits(lower[0].as_mut_slice(), upper[0].as_mut_slice())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
