//! Model-initialise component: one-time model setup/reconfiguration.

use marionette_core::{ModelConfig, OutputSlot, Value};
use marionette_model::ModelState;

use crate::args::name_arg;
use crate::error::DispatchError;

/// Fixed arity: 0 outputs (pure side effect). Optional single input: the
/// path of a TOML model configuration to (re)initialise from; with no
/// arguments the model refreshes from the parameters it already holds.
///
/// Idempotent: repeated invocations leave the model in the same valid
/// state as a single one, so callers may re-invoke defensively. Fails only
/// when no model handle is loaded, which is fatal for the session.
#[derive(Debug, Default)]
pub struct ModelInitialiseComponent {
    /// Configuration parsed by the last successful `compute`.
    config: Option<ModelConfig>,
}

impl ModelInitialiseComponent {
    pub(crate) fn allocate_return_space(
        &mut self,
        _state: &ModelState,
        _slots: &mut Vec<OutputSlot>,
    ) -> Result<(), DispatchError> {
        Ok(())
    }

    pub(crate) fn compute(
        &mut self,
        state: &mut ModelState,
        args: &[Value],
        _slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        if args.is_empty() {
            self.config = None;
        } else {
            let path = name_arg(args, 0, "config path")?;
            self.config = Some(ModelConfig::from_file(path)?);
        }
        state.initialise(self.config.as_ref())?;
        Ok(())
    }

    pub(crate) fn compute_fast(
        &mut self,
        state: &mut ModelState,
        _slots: &mut [OutputSlot],
    ) -> Result<(), DispatchError> {
        // Re-runs the last initialisation; idempotence makes this safe.
        state.initialise(self.config.as_ref())?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use marionette_model::{ModelError, ModelState};
    use marionette_test_utils::{MockModel, state_with_mock};

    #[test]
    fn initialise_without_model_is_fatal() {
        let mut state = ModelState::new();
        let mut component = ModelInitialiseComponent::default();
        let mut slots = Vec::new();
        let err = component.compute(&mut state, &[], &mut slots).unwrap_err();
        assert!(matches!(
            err,
            DispatchError::Model(ModelError::NotInitialised)
        ));
    }

    #[test]
    fn initialise_is_idempotent() {
        let model = MockModel::new(3);
        let probe = model.probe();
        let mut state = ModelState::new();
        state.load(Box::new(model));

        let mut component = ModelInitialiseComponent::default();
        let mut slots = Vec::new();
        component.compute(&mut state, &[], &mut slots).unwrap();
        let dof_once = state.dof().unwrap();
        component.compute(&mut state, &[], &mut slots).unwrap();

        assert_eq!(probe.initialise_calls(), 2);
        assert_eq!(state.dof().unwrap(), dof_once);
    }

    #[test]
    fn bad_config_path_reports_config_error() {
        let mut state = state_with_mock(1);
        let mut component = ModelInitialiseComponent::default();
        let mut slots = Vec::new();
        let args = vec![Value::name("/nonexistent/model.toml")];
        let err = component
            .compute(&mut state, &args, &mut slots)
            .unwrap_err();
        assert!(matches!(err, DispatchError::Config(_)));
    }
}
