/*!
Persistence primitives for flow snapshots.

A save hands the persistence collaborator a [`FlowSnapshot`]: an explicit
serde-friendly shape decoupled from the in-memory [`FlowGraph`], with the
creation time kept as an RFC3339 string so `chrono::DateTime` stays out of
the serialized form.

[`FlowStore`] is the collaborator seam. Two backends ship here: an
in-memory history for sessions and tests, and a JSON file store. The
snapshot type itself performs no I/O; it is pure data transformation and
(de)serialization glue.
*/

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use miette::Diagnostic;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::graph::{FlowEdge, FlowGraph};
use crate::node::FlowNode;

/// Version of the persisted snapshot shape.
pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

/// Validated, persisted form of one flow graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub format_version: u32,
    /// Fresh v4 uuid assigned at capture time.
    pub snapshot_id: String,
    /// RFC3339 capture time.
    pub saved_at: String,
    #[serde(default)]
    pub nodes: Vec<FlowNode>,
    #[serde(default)]
    pub edges: Vec<FlowEdge>,
}

impl FlowSnapshot {
    /// Captures the current state of a graph.
    ///
    /// Validation is the caller's concern; capture itself copies whatever
    /// the graph holds.
    #[must_use]
    pub fn capture(graph: &FlowGraph) -> Self {
        Self {
            format_version: SNAPSHOT_FORMAT_VERSION,
            snapshot_id: Uuid::new_v4().to_string(),
            saved_at: Utc::now().to_rfc3339(),
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
        }
    }
}

impl From<FlowSnapshot> for FlowGraph {
    /// Re-hydrates the persisted shape into a live graph.
    fn from(snapshot: FlowSnapshot) -> Self {
        FlowGraph::from_parts(snapshot.nodes, snapshot.edges)
    }
}

/// Errors from snapshot (de)serialization and backend I/O.
#[derive(Debug, Error, Diagnostic)]
pub enum PersistenceError {
    #[error("snapshot serialization failed")]
    #[diagnostic(code(flowloom::persist::serde))]
    Serde {
        #[source]
        source: serde_json::Error,
    },

    #[error("snapshot I/O failed at {}", path.display())]
    #[diagnostic(code(flowloom::persist::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The persistence collaborator the shell saves through.
///
/// Implementations decide where snapshots go; the shell only cares that a
/// save either lands or reports why not.
pub trait FlowStore: Send + Sync {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError>;

    /// The most recent snapshot, when one exists.
    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError>;
}

impl<S: FlowStore + ?Sized> FlowStore for std::sync::Arc<S> {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        (**self).save(snapshot)
    }

    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError> {
        (**self).load()
    }
}

/// In-memory snapshot history.
#[derive(Default)]
pub struct MemoryStore {
    history: Mutex<Vec<FlowSnapshot>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent saved snapshot.
    #[must_use]
    pub fn latest(&self) -> Option<FlowSnapshot> {
        self.history.lock().last().cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.history.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.history.lock().is_empty()
    }
}

impl FlowStore for MemoryStore {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        self.history.lock().push(snapshot.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError> {
        Ok(self.latest())
    }
}

/// Snapshot store backed by one JSON file; each save overwrites the file.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FlowStore for JsonFileStore {
    fn save(&self, snapshot: &FlowSnapshot) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|source| PersistenceError::Serde { source })?;
        fs::write(&self.path, json).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn load(&self) -> Result<Option<FlowSnapshot>, PersistenceError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(|source| PersistenceError::Io {
            path: self.path.clone(),
            source,
        })?;
        let snapshot =
            serde_json::from_str(&json).map_err(|source| PersistenceError::Serde { source })?;
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeData;
    use crate::types::{NodeKind, Position};

    fn two_node_graph() -> FlowGraph {
        let mut graph = FlowGraph::new();
        let a = graph.add_node(
            NodeKind::TextMessage,
            Position::new(0.0, 0.0),
            NodeData::default(),
        );
        let b = graph.add_node(
            NodeKind::TextMessage,
            Position::new(200.0, 0.0),
            NodeData::default(),
        );
        graph.add_edge(crate::graph::Connection::new(a, b));
        graph
    }

    #[test]
    fn capture_copies_nodes_and_edges() {
        let graph = two_node_graph();
        let snapshot = FlowSnapshot::capture(&graph);
        assert_eq!(snapshot.format_version, SNAPSHOT_FORMAT_VERSION);
        assert_eq!(snapshot.nodes.len(), 2);
        assert_eq!(snapshot.edges.len(), 1);
    }

    #[test]
    fn snapshot_ids_are_unique() {
        let graph = two_node_graph();
        let first = FlowSnapshot::capture(&graph);
        let second = FlowSnapshot::capture(&graph);
        assert_ne!(first.snapshot_id, second.snapshot_id);
    }

    #[test]
    fn hydration_rebuilds_the_same_graph() {
        let graph = two_node_graph();
        let restored: FlowGraph = FlowSnapshot::capture(&graph).into();
        assert_eq!(restored.nodes(), graph.nodes());
        assert_eq!(restored.edges(), graph.edges());
        assert!(restored.validate().is_ok());
    }

    #[test]
    fn memory_store_keeps_history() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        let snapshot = FlowSnapshot::capture(&two_node_graph());
        store.save(&snapshot).unwrap();
        store.save(&snapshot).unwrap();
        assert_eq!(store.len(), 2);
        assert_eq!(store.load().unwrap(), Some(snapshot));
    }
}
