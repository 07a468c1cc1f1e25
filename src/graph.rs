//! The flow graph store: single source of truth for nodes and edges.
//!
//! [`FlowGraph`] owns the node and edge collections, hands out fresh node
//! ids, merges settings-form patches, and enforces the one save-time
//! invariant of the builder: with more than one node, every node except the
//! first-created must be the target of at least one edge.
//!
//! Mutations happen synchronously in the order the external surface
//! dispatches them; nothing here blocks, suspends, or shares state across
//! threads.
//!
//! # Examples
//!
//! ```rust
//! use flowloom::graph::{Connection, FlowGraph};
//! use flowloom::node::NodeData;
//! use flowloom::types::{NodeKind, Position};
//!
//! let mut graph = FlowGraph::new();
//! let a = graph.add_node(NodeKind::TextMessage, Position::new(0.0, 0.0), NodeData::default());
//! let b = graph.add_node(NodeKind::TextMessage, Position::new(200.0, 0.0), NodeData::default());
//!
//! // Two nodes, no wiring: the second one has no incoming edge.
//! assert!(graph.validate().is_err());
//!
//! graph.add_edge(Connection::new(a, b));
//! assert!(graph.validate().is_ok());
//! ```

use miette::Diagnostic;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::{FlowNode, NodeData};
use crate::types::{NodeId, NodeKind, Position};

/// A user-drawn connection reported by the canvas surface.
///
/// The handle fields are optional; they are present when a node exposes
/// more than one connection point per role.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl Connection {
    #[must_use]
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    #[must_use]
    pub fn with_handles(
        mut self,
        source_handle: impl Into<String>,
        target_handle: impl Into<String>,
    ) -> Self {
        self.source_handle = Some(source_handle.into());
        self.target_handle = Some(target_handle.into());
        self
    }
}

/// A directed edge stored in the graph.
///
/// Edges are never deleted or mutated; duplicates between the same pair
/// are permitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl From<Connection> for FlowEdge {
    fn from(connection: Connection) -> Self {
        Self {
            source: connection.source,
            target: connection.target,
            source_handle: connection.source_handle,
            target_handle: connection.target_handle,
        }
    }
}

/// Save-time validation failure.
///
/// The display form is the exact reason string surfaced to the user; the
/// diagnostic help names the nodes that still need an incoming connection.
#[derive(Clone, Debug, PartialEq, Eq, Error, Diagnostic)]
#[error("All nodes must have a target handle")]
#[diagnostic(
    code(flowloom::graph::missing_target),
    help("every node after the first needs an incoming connection; unconnected: {unconnected:?}")
)]
pub struct ValidationError {
    /// Nodes (in creation order) with no incoming edge.
    pub unconnected: Vec<NodeId>,
}

/// Single source of truth for the nodes and edges of one flow.
///
/// Nodes are kept in creation order; the first-created node is the entry
/// node exempt from the incoming-edge rule. A side index maps ids to slots
/// for field updates and lookups.
#[derive(Clone, Debug, Default)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    index: FxHashMap<NodeId, usize>,
    edges: Vec<FlowEdge>,
}

impl FlowGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a graph from previously persisted parts.
    ///
    /// Node order is taken as creation order; the id index is rebuilt so
    /// later ids keep counting from the restored node count.
    #[must_use]
    pub fn from_parts(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| (node.id.clone(), slot))
            .collect();
        Self {
            nodes,
            index,
            edges,
        }
    }

    /// Adds a node and returns its freshly assigned id.
    ///
    /// Ids are derived from the current node count and are unique within a
    /// session because deletion is unsupported. This operation never fails;
    /// kind validity is the shell's concern.
    pub fn add_node(&mut self, kind: NodeKind, position: Position, initial_data: NodeData) -> NodeId {
        let id = NodeId::new((self.nodes.len() + 1).to_string());
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes
            .push(FlowNode::new(id.clone(), kind, position, initial_data));
        id
    }

    /// Merges a patch into the identified node's payload.
    ///
    /// An unknown id is a no-op: the update is dropped, a warning is
    /// logged, and `false` is returned. No other node's data is touched.
    pub fn update_node_data(&mut self, id: &NodeId, patch: NodeData) -> bool {
        match self.index.get(id).copied() {
            Some(slot) => {
                self.nodes[slot].merge_data(patch);
                true
            }
            None => {
                tracing::warn!(%id, "ignoring data update for unknown node");
                false
            }
        }
    }

    /// Appends the edge described by a connection.
    ///
    /// Purely additive: no dedup, no self-loop or cycle checks. The node
    /// set is unchanged.
    pub fn add_edge(&mut self, connection: Connection) {
        self.edges.push(connection.into());
    }

    /// Checks the save invariant.
    ///
    /// Graphs with zero or one node are always valid regardless of edges.
    /// Otherwise every node except the first-created must appear as the
    /// target of at least one edge.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.nodes.len() <= 1 {
            return Ok(());
        }
        let targets: FxHashSet<&NodeId> = self.edges.iter().map(|edge| &edge.target).collect();
        let unconnected: Vec<NodeId> = self
            .nodes
            .iter()
            .skip(1)
            .filter(|node| !targets.contains(&node.id))
            .map(|node| node.id.clone())
            .collect();
        if unconnected.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { unconnected })
        }
    }

    /// Looks up a node by id.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&FlowNode> {
        self.index.get(id).map(|slot| &self.nodes[*slot])
    }

    /// All nodes in creation order.
    #[must_use]
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    /// All edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    /// The entry node, when any node exists.
    #[must_use]
    pub fn first_node(&self) -> Option<&FlowNode> {
        self.nodes.first()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
