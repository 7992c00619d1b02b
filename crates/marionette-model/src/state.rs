//! Process-wide shared model state.

use marionette_core::ModelConfig;

use crate::error::ModelError;
use crate::model::WholeBodyModel;

/// Holds the single active whole-body model handle and its cached DOF.
///
/// Created once at session start and shared by every component; exactly one
/// model is active at a time. Access is single-threaded request/response —
/// the no-concurrent-requests discipline is a documented precondition of
/// the dispatch layer, not enforced here with locks.
#[derive(Default)]
pub struct ModelState {
    model: Option<Box<dyn WholeBodyModel>>,
    dof: usize,
}

impl ModelState {
    /// Empty state with no model loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `model` as the active handle, replacing any previous one.
    pub fn load(&mut self, model: Box<dyn WholeBodyModel>) {
        self.dof = model.dof();
        self.model = Some(model);
    }

    /// Tear down the active model at session end.
    pub fn clear(&mut self) {
        self.model = None;
        self.dof = 0;
    }

    /// Whether a model is currently loaded.
    pub const fn is_loaded(&self) -> bool {
        self.model.is_some()
    }

    /// Degrees of freedom of the active model.
    pub fn dof(&self) -> Result<usize, ModelError> {
        if self.model.is_some() {
            Ok(self.dof)
        } else {
            Err(ModelError::NotInitialised)
        }
    }

    /// Borrow the active model for queries.
    pub fn model(&self) -> Result<&dyn WholeBodyModel, ModelError> {
        self.model
            .as_deref()
            .ok_or(ModelError::NotInitialised)
    }

    /// (Re)initialise the active model and refresh the cached DOF.
    pub fn initialise(&mut self, config: Option<&ModelConfig>) -> Result<(), ModelError> {
        let model = self.model.as_deref_mut().ok_or(ModelError::NotInitialised)?;
        model.initialise(config)?;
        self.dof = model.dof();
        Ok(())
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelState")
            .field("loaded", &self.is_loaded())
            .field("dof", &self.dof)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
