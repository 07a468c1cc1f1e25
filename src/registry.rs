//! Registry mapping node kinds to their capability specs.
//!
//! The kind set is closed (see [`NodeKind`]); the registry exists so the
//! shell and the external surface can dispatch over `dyn NodeSpec` without
//! matching on the enum themselves, and so the palette can be enumerated
//! in one place.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::kinds::{NodeSpec, PaletteEntry, TextMessage};
use crate::types::NodeKind;

/// Maps each [`NodeKind`] to its [`NodeSpec`] implementation.
///
/// # Examples
///
/// ```rust
/// use flowloom::registry::KindRegistry;
/// use flowloom::types::NodeKind;
///
/// let registry = KindRegistry::with_defaults();
/// assert!(registry.get(NodeKind::TextMessage).is_some());
///
/// let palette = registry.palette();
/// assert_eq!(palette.len(), 1);
/// assert_eq!(palette[0].drag_tag, "TextMessage");
/// ```
#[derive(Clone)]
pub struct KindRegistry {
    specs: FxHashMap<NodeKind, Arc<dyn NodeSpec>>,
}

impl KindRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            specs: FxHashMap::default(),
        }
    }

    /// Creates a registry with every built-in kind registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TextMessage));
        registry
    }

    /// Registers a spec under its own kind, replacing any previous one.
    pub fn register(&mut self, spec: Arc<dyn NodeSpec>) {
        self.specs.insert(spec.kind(), spec);
    }

    /// Looks up the spec for a kind. `None` means the kind is unregistered
    /// and requests for it are no-ops.
    #[must_use]
    pub fn get(&self, kind: NodeKind) -> Option<Arc<dyn NodeSpec>> {
        self.specs.get(&kind).cloned()
    }

    #[must_use]
    pub fn contains(&self, kind: NodeKind) -> bool {
        self.specs.contains_key(&kind)
    }

    /// Palette entries for every registered kind, ordered by drag tag so
    /// enumeration is stable.
    #[must_use]
    pub fn palette(&self) -> Vec<PaletteEntry> {
        let mut entries: Vec<PaletteEntry> =
            self.specs.values().map(|spec| spec.palette_entry()).collect();
        entries.sort_by_key(|entry| entry.drag_tag);
        entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

impl Default for KindRegistry {
    /// The default registry knows the built-in kinds.
    fn default() -> Self {
        Self::with_defaults()
    }
}
