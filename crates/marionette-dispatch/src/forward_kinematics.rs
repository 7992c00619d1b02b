//! Forward-kinematics component: pose of a reference frame.

use marionette_core::{OutputSlot, Value};
use marionette_model::{ModelState, POSE_DIM};

use crate::args::{name_arg, sized_vector_arg};
use crate::error::{DispatchError, ShapeError};

/// Fixed arity: 2 inputs (joint configuration, reference frame name),
/// 1 output (7-element pose: position xyz + unit quaternion wxyz).
#[derive(Debug, Default)]
pub struct ForwardKinematicsComponent {
    q: Vec<f64>,
    frame: Option<String>,
}

impl ForwardKinematicsComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        state: &ModelState,
        slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        // The pose shape is DOF-independent, but a missing model must still
        // fail here rather than during compute.
        state.dof()?;
        slots.push(OutputSlot::vector(POSE_DIM));
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

        model.forward_kinematics(frame, &self.q, slots[0].as_mut_slice())?;
        Ok(())
    }

    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        let model = state.model()?;
        let Some(frame) = &self.frame else {
            return Err(DispatchError::FastPathUnprimed("forward-kinematics"));
        };
        model.forward_kinematics(frame, &self.q, slots[0].as_mut_slice())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use marionette_core::SlotShape;
    use marionette_test_utils::state_with_mock;

    #[test]
    fn pose_slot_is_seven_elements() {
        let state = state_with_mock(2);
        let mut component = ForwardKinematicsComponent::default();
        let mut slots = Vec::new();
        component.allocate_return_space(&state, &mut slots).unwrap();
        assert_eq!(slots[0].shape(), SlotShape::Vector { len: 7 });
    }

    #[test]
    fn compute_writes_pose() {
        let mut state = state_with_mock(2);
        let mut component = ForwardKinematicsComponent::default();
        let mut slots = Vec::new();
        component.allocate_return_space(&state, &mut slots).unwrap();
        let args = vec![Value::vector(vec![0.0, 0.0]), Value::name("l_sole")];
        component.compute(&mut state, &args, &mut slots).unwrap();
        assert_eq!(slots[0].as_slice(), [0.1, 0.2, 0.3, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn unknown_frame_rejected() {
        let mut state = state_with_mock(2);
        let mut component = ForwardKinematicsComponent::default();
        let mut slots = Vec::new();
        component.allocate_return_space(&state, &mut slots).unwrap();
        let args = vec![Value::vector(vec![0.0, 0.0]), Value::name("tail")];
        let err = component.compute(&mut state, &args, &mut slots).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Shape(ShapeError::UnknownFrame(_))
        ));
    }

    #[test]
    fn fast_path_reuses_scratch() {
        let mut state = state_with_mock(2);
        let mut component = ForwardKinematicsComponent::default();
        let mut slots = Vec::new();
        component.allocate_return_space(&state, &mut slots).unwrap();

        assert!(matches!(
            component.compute_fast(&mut state, &mut slots),
            Err(DispatchError::FastPathUnprimed(_))
        ));

        let args = vec![Value::vector(vec![0.1, 0.2]), Value::name("rightFoot")];
        component.compute(&mut state, &args, &mut slots).unwrap();
        component.compute_fast(&mut state, &mut slots).unwrap();
        assert_eq!(slots[0].as_slice()[3], 1.0);
    }
}
