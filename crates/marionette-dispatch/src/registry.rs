//! Component registry: at most one live handler per kind.
//!
//! Replaces a singleton-per-kind pattern with an explicit mapping owned by
//! the dispatcher. Handlers are constructed lazily on first lookup, stay
//! live across requests (so their parsed-argument scratch can serve the
//! fast path), and are dropped by an explicit reset, after which the next
//! lookup rebuilds a fresh one.

use std::collections::HashMap;

use crate::component::{Component, ComponentKind};

/// Lazily populated mapping from kind to the single live handler instance.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: HashMap<ComponentKind, Component>,
}

impl ComponentRegistry {
    /// Empty registry with no live handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The live handler for `kind`, constructing it on first use. Repeated
    /// lookups without an intervening reset return the same instance.
    pub fn lookup(&mut self, kind: ComponentKind) -> &mut Component {
        self.components
            .entry(kind)
            .or_insert_with(|| Component::new(kind))
    }

    /// Whether a handler for `kind` is currently live.
    pub fn is_live(&self, kind: ComponentKind) -> bool {
        self.components.contains_key(&kind)
    }

    /// Drop the handler for `kind`. Returns whether one was live. The next
    /// `lookup` constructs a fresh instance.
    pub fn reset(&mut self, kind: ComponentKind) -> bool {
        self.components.remove(&kind).is_some()
    }

    /// Drop every live handler.
    pub fn reset_all(&mut self) {
        self.components.clear();
    }

    /// Number of live handlers.
    pub fn live_count(&self) -> usize {
        self.components.len()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_constructs_lazily() {
        let mut registry = ComponentRegistry::new();
        assert!(!registry.is_live(ComponentKind::Jacobian));
        let component = registry.lookup(ComponentKind::Jacobian);
        assert_eq!(component.kind(), ComponentKind::Jacobian);
        assert!(registry.is_live(ComponentKind::Jacobian));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn repeated_lookup_returns_same_instance() {
        let mut registry = ComponentRegistry::new();
        let first: *const Component = registry.lookup(ComponentKind::MassMatrix);
        let second: *const Component = registry.lookup(ComponentKind::MassMatrix);
        assert_eq!(first, second);
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn reset_drops_and_rebuilds() {
        let mut registry = ComponentRegistry::new();
        registry.lookup(ComponentKind::JointLimits);
        assert!(registry.reset(ComponentKind::JointLimits));
        assert!(!registry.is_live(ComponentKind::JointLimits));
        assert!(!registry.reset(ComponentKind::JointLimits));

        let rebuilt = registry.lookup(ComponentKind::JointLimits);
        assert_eq!(rebuilt.kind(), ComponentKind::JointLimits);
    }

    #[test]
    fn reset_all_clears_every_kind() {
        let mut registry = ComponentRegistry::new();
        for kind in ComponentKind::ALL {
            registry.lookup(kind);
        }
        assert_eq!(registry.live_count(), ComponentKind::ALL.len());
        registry.reset_all();
        assert_eq!(registry.live_count(), 0);
    }
}
