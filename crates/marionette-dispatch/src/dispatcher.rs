//! Host-facing entry point driving the three-step component contract.

use marionette_core::{OutputSlot, Value};
use marionette_model::{ModelState, WholeBodyModel};

use crate::component::ComponentKind;
use crate::error::DispatchError;
use crate::registry::ComponentRegistry;

/// Maps an incoming request name to the live handler for that kind and
/// drives allocate / compute (or the fast path) against the shared model.
///
/// The host issues one request at a time and blocks until it returns;
/// there is no internal parallelism. Output slots are freshly allocated
/// per request and handed to the caller — the dispatcher never retains a
/// previous call's outputs.
#[derive(Debug, Default)]
pub struct Dispatcher {
    state: ModelState,
    registry: ComponentRegistry,
}

impl Dispatcher {
    /// Dispatcher with no model loaded. Requests fail with a model error
    /// until one is installed via [`state_mut`](Self::state_mut).
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher with `model` installed as the active handle.
    pub fn with_model(model: Box<dyn WholeBodyModel>) -> Self {
        let mut state = ModelState::new();
        state.load(model);
        Self {
            state,
            registry: ComponentRegistry::new(),
        }
    }

    /// Shared model state.
    pub const fn state(&self) -> &ModelState {
        &self.state
    }

    /// Mutable model state, for session setup/teardown.
    pub const fn state_mut(&mut self) -> &mut ModelState {
        &mut self.state
    }

    /// Drop the live handler for `kind` so the next request rebuilds it.
    pub fn reset_component(&mut self, kind: ComponentKind) -> bool {
        self.registry.reset(kind)
    }

    /// Drop every live handler.
    pub fn reset_components(&mut self) {
        self.registry.reset_all();
    }

    /// Full request: resolve the component by name, allocate
    /// `requested_outputs` slots, validate `args`, compute, and return the
    /// filled slots. A failed allocation never proceeds to compute.
    pub fn dispatch(
        &mut self,
        name: &str,
        requested_outputs: usize,
        args: &[Value],
    ) -> Result<Vec<OutputSlot>, DispatchError> {
        let kind = Self::resolve(name)?;
        let component = self.registry.lookup(kind);

        let mut slots = Vec::new();
        component.allocate_return_space(&self.state, requested_outputs, &mut slots)?;
        component.compute(&mut self.state, args, &mut slots)?;
        Ok(slots)
    }

    /// Fast-path request: fresh slots, but inputs are the ones parsed by
    /// the component's last successful `dispatch`. Callers opt in when
    /// they can guarantee input stability across repeated calls.
    pub fn dispatch_fast(
        &mut self,
        name: &str,
        requested_outputs: usize,
    ) -> Result<Vec<OutputSlot>, DispatchError> {
        let kind = Self::resolve(name)?;
        let component = self.registry.lookup(kind);

        let mut slots = Vec::new();
        component.allocate_return_space(&self.state, requested_outputs, &mut slots)?;
        component.compute_fast(&mut self.state, &mut slots)?;
        Ok(slots)
    }

    fn resolve(name: &str) -> Result<ComponentKind, DispatchError> {
        ComponentKind::from_name(name).ok_or_else(|| DispatchError::UnknownComponent(name.to_owned()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use marionette_test_utils::MockModel;

    fn dispatcher(dof: usize) -> Dispatcher {
        Dispatcher::with_model(Box::new(MockModel::new(dof)))
    }

    #[test]
    fn unknown_component_name() {
        let mut d = dispatcher(2);
        let err = d.dispatch("visualise-trajectory", 1, &[]).unwrap_err();
        assert!(matches!(err, DispatchError::UnknownComponent(name) if name == "visualise-trajectory"));
    }

    #[test]
    fn joint_limits_end_to_end() {
        let mut d = dispatcher(3);
        let slots = d.dispatch("joint-limits", 2, &[]).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].len(), 3);
        for i in 0..3 {
            assert!(slots[0].as_slice()[i] <= slots[1].as_slice()[i]);
        }
    }

    #[test]
    fn failed_allocation_never_computes() {
        let model = MockModel::new(3);
        let probe = model.probe();
        let mut d = Dispatcher::with_model(Box::new(model));

        let err = d
            .dispatch("jacobian", 2, &[Value::vector(vec![0.0; 3]), Value::name("base")])
            .unwrap_err();
        assert!(matches!(err, DispatchError::Arity(_)));
        assert_eq!(probe.jacobian_calls(), 0);
    }

    #[test]
    fn fast_path_needs_prior_dispatch() {
        let mut d = dispatcher(2);
        let err = d.dispatch_fast("jacobian", 1).unwrap_err();
        assert!(matches!(err, DispatchError::FastPathUnprimed(_)));

        let args = vec![Value::vector(vec![0.0, 0.0]), Value::name("rightFoot")];
        d.dispatch("jacobian", 1, &args).unwrap();
        let slots = d.dispatch_fast("jacobian", 1).unwrap();
        assert_eq!(slots[0].element(2, 5), 205.0);
    }

    #[test]
    fn reset_component_clears_fast_path_scratch() {
        let mut d = dispatcher(2);
        let args = vec![Value::vector(vec![0.0, 0.0]), Value::name("rightFoot")];
        d.dispatch("jacobian", 1, &args).unwrap();
        d.dispatch_fast("jacobian", 1).unwrap();

        assert!(d.reset_component(ComponentKind::Jacobian));
        let err = d.dispatch_fast("jacobian", 1).unwrap_err();
        assert!(matches!(err, DispatchError::FastPathUnprimed(_)));
    }

    #[test]
    fn no_model_fails_before_allocation_returns_slots() {
        let mut d = Dispatcher::new();
        let err = d.dispatch("mass-matrix", 1, &[]).unwrap_err();
        assert!(matches!(err, DispatchError::Model(_)));
    }
}
