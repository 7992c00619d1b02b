//! Mock whole-body model for testing the dispatch layer.
//!
//! [`MockModel`] fills query buffers with deterministic patterns and counts
//! every model query, so tests can assert both output content and that
//! failed validation never reaches the model.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use marionette_core::ModelConfig;
use marionette_model::{ModelError, ModelState, WholeBodyModel};

// ---------------------------------------------------------------------------
// MockProbe
// ---------------------------------------------------------------------------

/// Shared view of a [`MockModel`]'s query counters.
///
/// Clone a probe before boxing the mock into a `ModelState`; the counters
/// keep ticking behind the trait object.
#[derive(Clone, Default)]
pub struct MockProbe {
    jacobian: Arc<AtomicUsize>,
    mass_matrix: Arc<AtomicUsize>,
    fk: Arc<AtomicUsize>,
    bias: Arc<AtomicUsize>,
    limits: Arc<AtomicUsize>,
    initialise: Arc<AtomicUsize>,
}

impl MockProbe {
    pub fn jacobian_calls(&self) -> usize {
        self.jacobian.load(Ordering::Relaxed)
    }

    pub fn mass_matrix_calls(&self) -> usize {
        self.mass_matrix.load(Ordering::Relaxed)
    }

    pub fn fk_calls(&self) -> usize {
        self.fk.load(Ordering::Relaxed)
    }

    pub fn bias_calls(&self) -> usize {
        self.bias.load(Ordering::Relaxed)
    }

    pub fn limits_calls(&self) -> usize {
        self.limits.load(Ordering::Relaxed)
    }

    pub fn initialise_calls(&self) -> usize {
        self.initialise.load(Ordering::Relaxed)
    }
}

// ---------------------------------------------------------------------------
// MockModel
// ---------------------------------------------------------------------------

/// A scriptable stand-in for a real whole-body model.
///
/// Fill patterns:
/// - joint limits: `lower[i] = -1 - i`, `upper[i] = 1 + i`
/// - jacobian (row-major): element `(r, c) = 100 r + c`
/// - mass matrix (row-major): element `(r, c) = 1 / (1 + |r - c|)`
/// - forward kinematics: `[0.1, 0.2, 0.3, 1, 0, 0, 0]`
/// - bias forces: `element i = i`
pub struct MockModel {
    dof: usize,
    frames: Vec<String>,
    name: String,
    counters: MockProbe,
}

impl MockModel {
    /// Mock with the given DOF and the default frame set
    /// (`base`, `rightFoot`, `l_sole`).
    pub fn new(dof: usize) -> Self {
        Self::with_frames(dof, ["base", "rightFoot", "l_sole"])
    }

    /// Mock with an explicit frame whitelist.
    pub fn with_frames<I, S>(dof: usize, frames: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dof,
            frames: frames.into_iter().map(Into::into).collect(),
            name: "mock".into(),
            counters: MockProbe::default(),
        }
    }

    /// A counter handle that outlives boxing the mock into a model state.
    pub fn probe(&self) -> MockProbe {
        self.counters.clone()
    }
}

impl WholeBodyModel for MockModel {
    fn dof(&self) -> usize {
        self.dof
    }

    fn has_frame(&self, name: &str) -> bool {
        self.frames.iter().any(|f| f == name)
    }

    fn joint_limits(&self, lower: &mut [f64], upper: &mut [f64]) -> Result<(), ModelError> {
        self.counters.limits.fetch_add(1, Ordering::Relaxed);
        for i in 0..self.dof {
            lower[i] = -1.0 - i as f64;
            upper[i] = 1.0 + i as f64;
        }
        Ok(())
    }

    fn jacobian(&self, _frame: &str, _q: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        self.counters.jacobian.fetch_add(1, Ordering::Relaxed);
        let cols = 6 + self.dof;
        for r in 0..6 {
            for c in 0..cols {
                out[r * cols + c] = (100 * r + c) as f64;
            }
        }
        Ok(())
    }

    fn mass_matrix(&self, _q: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        self.counters.mass_matrix.fetch_add(1, Ordering::Relaxed);
        let n = 6 + self.dof;
        for r in 0..n {
            for c in 0..n {
                out[r * n + c] = 1.0 / (1.0 + r.abs_diff(c) as f64);
            }
        }
        Ok(())
    }

    fn forward_kinematics(
        &self,
        _frame: &str,
        _q: &[f64],
        out: &mut [f64],
    ) -> Result<(), ModelError> {
        self.counters.fk.fetch_add(1, Ordering::Relaxed);
        out.copy_from_slice(&[0.1, 0.2, 0.3, 1.0, 0.0, 0.0, 0.0]);
        Ok(())
    }

    fn bias_forces(&self, _q: &[f64], _dq: &[f64], out: &mut [f64]) -> Result<(), ModelError> {
        self.counters.bias.fetch_add(1, Ordering::Relaxed);
        for (i, v) in out.iter_mut().enumerate() {
            *v = i as f64;
        }
        Ok(())
    }

    fn initialise(&mut self, config: Option<&ModelConfig>) -> Result<(), ModelError> {
        self.counters.initialise.fetch_add(1, Ordering::Relaxed);
        if let Some(config) = config {
            self.name.clone_from(&config.name);
            self.dof = config.dof();
        }
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A [`ModelState`] preloaded with a [`MockModel`] of the given DOF.
pub fn state_with_mock(dof: usize) -> ModelState {
    let mut state = ModelState::new();
    state.load(Box::new(MockModel::new(dof)));
    state
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
