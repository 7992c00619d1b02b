//! Bias-forces component: generalised gravity/Coriolis vector.

use marionette_core::{OutputSlot, Value};
use marionette_model::{BASE_DOF, ModelState};

use crate::args::sized_vector_arg;
use crate::error::DispatchError;

/// Fixed arity: 2 inputs (joint configuration, joint velocity), 1 output
/// (`6+DOF` generalised force vector, floating-base rows first).
#[derive(Debug, Default)]
pub struct BiasForcesComponent {
    q: Vec<f64>,
    dq: Vec<f64>,
    primed: bool,
}

impl BiasForcesComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        state: &ModelState,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        let dof = state.dof()?;
        slots.push(OutputSlot::vector(BASE_DOF + dof));
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

        let q = sized_vector_arg(args, 0, "joint configuration", dof)?;
        let dq = sized_vector_arg(args, 1, "joint velocity", dof)?;

        self.q.clear();
        self.q.extend_from_slice(q);
        self.dq.clear();
        self.dq.extend_from_slice(dq);
        self.primed = true;

        model.bias_forces(&self.q, &self.dq, slots[0].as_mut_slice())?;
        Ok(())
    }

    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        if !self.primed {
            return Err(DispatchError::FastPathUnprimed("bias-forces"));
        }
        let model = state.model()?;
        model.bias_forces(&self.q, &self.dq, slots[0].as_mut_slice())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
