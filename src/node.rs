//! Node records held by the flow graph store.
//!
//! A [`FlowNode`] is plain data: identity, kind, canvas position, and a
//! kind-specific payload. The payload is a JSON map rather than a typed
//! struct so the settings form can commit field-level patches and so
//! snapshots round-trip without per-kind serialization glue.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::{NodeId, NodeKind, Position};

/// Kind-specific payload of a node, keyed by field name.
///
/// For [`NodeKind::TextMessage`] the payload carries a single `"message"`
/// string field.
pub type NodeData = FxHashMap<String, Value>;

/// One node of a flow graph.
///
/// Nodes are created by a palette drop or an explicit add action, mutated
/// in place by their settings form, and never deleted.
///
/// # Examples
///
/// ```rust
/// use flowloom::node::{FlowNode, NodeData};
/// use flowloom::types::{NodeId, NodeKind, Position};
/// use serde_json::json;
///
/// let mut data = NodeData::default();
/// data.insert("message".into(), json!("hi there"));
///
/// let node = FlowNode::new(NodeId::new("1"), NodeKind::TextMessage, Position::new(0.0, 0.0), data);
/// assert_eq!(node.field("message").and_then(|v| v.as_str()), Some("hi there"));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Position,
    #[serde(default)]
    pub data: NodeData,
}

impl FlowNode {
    #[must_use]
    pub fn new(id: NodeId, kind: NodeKind, position: Position, data: NodeData) -> Self {
        Self {
            id,
            kind,
            position,
            data,
        }
    }

    /// Merges a patch into this node's payload, insert-or-replace per key.
    ///
    /// Keys absent from the patch keep their current value.
    pub fn merge_data(&mut self, patch: NodeData) {
        self.data.extend(patch);
    }

    /// Reads one payload field.
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }
}
