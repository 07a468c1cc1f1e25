//! The app shell: glue between the canvas surface, the store, the kind
//! registry, the settings panel, and the persistence collaborator.
//!
//! The external surface owns rendering, hit-testing, and drag physics; it
//! reports discrete user actions as [`SurfaceEvent`]s and the shell applies
//! them to its state synchronously, in dispatch order. Save is the only
//! operation with an observable side effect outside the store: a notice to
//! the user and, on success, a snapshot handed to the [`FlowStore`].
//!
//! # Examples
//!
//! ```rust
//! use flowloom::shell::{FlowShell, SurfaceEvent};
//! use flowloom::graph::Connection;
//! use flowloom::types::Position;
//!
//! let mut shell = FlowShell::with_defaults();
//! let notices = shell.notices();
//!
//! let first = shell.on_drop("TextMessage", Position::new(80.0, 40.0)).unwrap();
//! let second = shell.on_drop("TextMessage", Position::new(320.0, 40.0)).unwrap();
//!
//! // Saving before wiring fails the target-handle rule.
//! assert!(shell.save().is_err());
//! assert_eq!(notices.try_recv().unwrap().message, "All nodes must have a target handle");
//!
//! shell.handle(SurfaceEvent::Connected(Connection::new(first, second)));
//! let saved = shell.save().unwrap();
//! assert_eq!(saved.node_count, 2);
//! assert_eq!(notices.try_recv().unwrap().message, "Flow has been saved successfully");
//! ```

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::{Connection, FlowGraph, ValidationError};
use crate::kinds::{NodeVisual, PaletteEntry, SettingsForm, SpawnOrigin};
use crate::notify::{Notice, Notifier};
use crate::panel::PanelState;
use crate::persist::{FlowSnapshot, FlowStore, MemoryStore, PersistenceError};
use crate::registry::KindRegistry;
use crate::types::{NodeId, NodeKind, Position};

/// Notice emitted when a save lands.
pub const SAVE_SUCCESS_NOTICE: &str = "Flow has been saved successfully";

/// A discrete user action reported by the canvas surface.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// A palette entry was dropped on the canvas. `tag` is whatever the
    /// surface read back from the drag payload channel.
    Dropped { tag: String, position: Position },
    /// The user drew a connection between two handles.
    Connected(Connection),
    /// A node was clicked.
    NodeClicked(NodeId),
}

/// Summary of a completed save.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedFlow {
    pub snapshot_id: String,
    pub node_count: usize,
    pub edge_count: usize,
}

/// Why a save did not land.
#[derive(Debug, Error, Diagnostic)]
pub enum SaveError {
    /// The graph failed the target-handle rule; state is unchanged and the
    /// user has been notified.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    /// The persistence collaborator rejected the snapshot.
    #[error("flow store rejected the snapshot")]
    #[diagnostic(code(flowloom::shell::store))]
    Store(#[from] PersistenceError),
}

/// Owns one editing session: graph, registry, panel, notifier, store.
pub struct FlowShell {
    graph: FlowGraph,
    registry: KindRegistry,
    panel: PanelState,
    notifier: Notifier,
    store: Box<dyn FlowStore>,
}

impl FlowShell {
    /// Creates a shell around an explicit registry and store.
    #[must_use]
    pub fn new(registry: KindRegistry, store: Box<dyn FlowStore>) -> Self {
        Self {
            graph: FlowGraph::new(),
            registry,
            panel: PanelState::default(),
            notifier: Notifier::new(),
            store,
        }
    }

    /// Default registry, in-memory store. The usual test and demo setup.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(KindRegistry::with_defaults(), Box::new(MemoryStore::new()))
    }

    /// Applies one surface event.
    pub fn handle(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Dropped { tag, position } => {
                self.on_drop(&tag, position);
            }
            SurfaceEvent::Connected(connection) => self.on_connect(connection),
            SurfaceEvent::NodeClicked(id) => self.on_node_click(id),
        }
    }

    /// Palette drop: decode the drag tag and create the node at the drop
    /// position. Unknown or unregistered tags are a no-op.
    pub fn on_drop(&mut self, tag: &str, position: Position) -> Option<NodeId> {
        let Some(kind) = NodeKind::parse_tag(tag) else {
            tracing::warn!(tag, "ignoring drop with unrecognized kind tag");
            return None;
        };
        let Some(spec) = self.registry.get(kind) else {
            tracing::warn!(%kind, "ignoring drop for unregistered kind");
            return None;
        };
        let data = spec.default_data(SpawnOrigin::Drop);
        Some(self.graph.add_node(kind, position, data))
    }

    /// Palette click-to-add: create the node at the next stacked offset.
    /// Unregistered kinds are a no-op.
    pub fn add_from_palette(&mut self, kind: NodeKind) -> Option<NodeId> {
        let Some(spec) = self.registry.get(kind) else {
            tracing::warn!(%kind, "ignoring palette add for unregistered kind");
            return None;
        };
        let position = Position::stacked(self.graph.node_count());
        let data = spec.default_data(SpawnOrigin::PaletteClick);
        Some(self.graph.add_node(kind, position, data))
    }

    /// User-drawn connection: append the edge.
    pub fn on_connect(&mut self, connection: Connection) {
        self.graph.add_edge(connection);
    }

    /// Node click: the panel enters `Editing` with the clicked id.
    pub fn on_node_click(&mut self, id: NodeId) {
        self.panel.select(id);
    }

    /// The settings form for the node being edited, when the panel is open
    /// and the node's kind is registered.
    #[must_use]
    pub fn open_form(&self) -> Option<SettingsForm> {
        let id = self.panel.editing()?;
        let node = self.graph.node(id)?;
        let spec = self.registry.get(node.kind)?;
        Some(spec.settings_form(node))
    }

    /// Commits a settings form back into the store. The panel stays open
    /// on the same node, matching the surface's edit flow.
    pub fn submit_form(&mut self, form: &SettingsForm) -> bool {
        self.graph.update_node_data(&form.node_id, form.patch())
    }

    /// Dismisses the settings form without committing.
    pub fn close_form(&mut self) {
        self.panel.close();
    }

    /// The on-canvas visual for one node, via its kind's spec.
    #[must_use]
    pub fn render_node(&self, id: &NodeId) -> Option<NodeVisual> {
        let node = self.graph.node(id)?;
        self.registry.get(node.kind).map(|spec| spec.render(node))
    }

    /// Palette entries for every registered kind.
    #[must_use]
    pub fn palette(&self) -> Vec<PaletteEntry> {
        self.registry.palette()
    }

    /// Validates, then hands a snapshot to the persistence collaborator.
    ///
    /// On validation failure the fixed reason is surfaced as an error
    /// notice and the graph is left unchanged. On success the user gets
    /// the success notice. A store failure is returned to the caller and
    /// logged, without a notice.
    pub fn save(&self) -> Result<SavedFlow, SaveError> {
        if let Err(err) = self.graph.validate() {
            self.notifier.error(err.to_string());
            return Err(SaveError::Validation(err));
        }
        let snapshot = FlowSnapshot::capture(&self.graph);
        if let Err(err) = self.store.save(&snapshot) {
            tracing::error!(error = %err, "flow store rejected the snapshot");
            return Err(SaveError::Store(err));
        }
        self.notifier.success(SAVE_SUCCESS_NOTICE);
        Ok(SavedFlow {
            snapshot_id: snapshot.snapshot_id,
            node_count: snapshot.nodes.len(),
            edge_count: snapshot.edges.len(),
        })
    }

    /// Replaces the session's graph with the store's latest snapshot.
    ///
    /// Returns `false` when the store holds nothing. Applying a snapshot
    /// resets the panel.
    pub fn load(&mut self) -> Result<bool, PersistenceError> {
        match self.store.load()? {
            Some(snapshot) => {
                self.graph = snapshot.into();
                self.panel.close();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// A receiver over the user-visible notices.
    #[must_use]
    pub fn notices(&self) -> flume::Receiver<Notice> {
        self.notifier.subscribe()
    }

    #[must_use]
    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    #[must_use]
    pub fn panel(&self) -> &PanelState {
        &self.panel
    }

    #[must_use]
    pub fn registry(&self) -> &KindRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_drop_tag_creates_nothing() {
        let mut shell = FlowShell::with_defaults();
        assert!(shell.on_drop("Carousel", Position::new(0.0, 0.0)).is_none());
        assert!(shell.on_drop("", Position::new(0.0, 0.0)).is_none());
        assert!(shell.graph().is_empty());
    }

    #[test]
    fn unregistered_kind_palette_add_is_a_no_op() {
        let mut shell = FlowShell::new(KindRegistry::new(), Box::new(MemoryStore::new()));
        assert!(shell.add_from_palette(NodeKind::TextMessage).is_none());
        assert!(shell.graph().is_empty());
    }

    #[test]
    fn palette_adds_stack_diagonally() {
        let mut shell = FlowShell::with_defaults();
        let first = shell.add_from_palette(NodeKind::TextMessage).unwrap();
        let second = shell.add_from_palette(NodeKind::TextMessage).unwrap();
        assert_eq!(
            shell.graph().node(&first).unwrap().position,
            Position::stacked(0)
        );
        assert_eq!(
            shell.graph().node(&second).unwrap().position,
            Position::stacked(1)
        );
    }
}
