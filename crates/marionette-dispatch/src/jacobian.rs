//! Jacobian component: reference-frame Jacobian with layout conversion.
//!
//! The model produces the `6 x (6+DOF)` Jacobian row-major into an
//! instance-owned scratch buffer; the host slot is column-major. The two
//! buffers have independent lifetimes, so the conversion is a full
//! [`reindex`] pass, never an in-place transpose. The leading 6 columns
//! (floating base) and the trailing DOF joint columns keep their partition
//! across the conversion.

use marionette_core::{MatrixLayout, OutputSlot, Value, reindex};
use marionette_model::{BASE_DOF, ModelState, WholeBodyModel};

use crate::args::{name_arg, sized_vector_arg};
use crate::error::{DispatchError, ShapeError};

/// Fixed arity: 2 inputs (joint configuration, reference frame name),
/// 1 output (`6 x (6+DOF)` column-major matrix).
#[derive(Debug, Default)]
pub struct JacobianComponent {
    /// Parsed joint configuration, overwritten on each `compute`.
    q: Vec<f64>,
    /// Parsed reference frame; `Some` once a `compute` has succeeded.
    frame: Option<String>,
    /// Row-major scratch the model writes into, discarded after conversion.
    scratch: Vec<f64>,
}

impl JacobianComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        state: &ModelState,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        let dof = state.dof()?;
        slots.push(OutputSlot::matrix(BASE_DOF, BASE_DOF + dof));
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
        let frame = name_arg(args, 1, "reference frame")?;
        if !model.has_frame(frame) {
            return Err(ShapeError::UnknownFrame(frame.to_owned()).into());
        }

        self.q.clear();
        self.q.extend_from_slice(q);
        self.frame = Some(frame.to_owned());

        query_and_convert(model, frame, &self.q, &mut self.scratch, &mut slots[0])
    }

    /// Trust-the-previous-validation fast path: reuses the frame and joint
    /// configuration parsed by the last successful `compute`.
    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        let model = state.model()?;
        let Some(frame) = &self.frame else {
            return Err(DispatchError::FastPathUnprimed("jacobian"));
        };
        query_and_convert(model, frame, &self.q, &mut self.scratch, &mut slots[0])
    }
}

/// Query the model row-major, then reindex into the column-major slot.
fn query_and_convert(
    model: &dyn WholeBodyModel,
    frame: &str,
    q: &[f64],
    scratch: &mut Vec<f64>,
    slot: &mut OutputSlot,
) -> Result<(), DispatchError> {
    let rows = BASE_DOF;
    let cols = BASE_DOF + model.dof();
    scratch.resize(rows * cols, 0.0);
    model.jacobian(frame, q, scratch)?;
    reindex(
        rows,
        cols,
        MatrixLayout::RowMajor,
        MatrixLayout::ColMajor,
        scratch,
        slot.as_mut_slice(),
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
