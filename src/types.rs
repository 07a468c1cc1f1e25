//! Core types for the flowloom builder core.
//!
//! This module defines the fundamental types used throughout the crate for
//! identifying nodes, classifying node kinds, and describing the connection
//! points a kind exposes on the canvas. These are the domain concepts the
//! external graph-editing surface and the store agree on.
//!
//! # Key Types
//!
//! - [`NodeId`]: Identifies a node within a flow graph
//! - [`NodeKind`]: Closed set of node kinds the builder understands
//! - [`Position`]: Canvas-space coordinates
//! - [`Handle`]: A named connection point on a node
//!
//! # Examples
//!
//! ```rust
//! use flowloom::types::{NodeKind, Position};
//!
//! // Kind tags are the drag payload the palette writes at drag-start.
//! assert_eq!(NodeKind::TextMessage.tag(), "TextMessage");
//!
//! // Unknown tags do not decode; the drop handler treats them as a no-op.
//! assert_eq!(NodeKind::parse_tag("TextMessage"), Some(NodeKind::TextMessage));
//! assert_eq!(NodeKind::parse_tag("Carousel"), None);
//!
//! let position = Position::new(120.0, 80.0);
//! assert_eq!(position.x, 120.0);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a node within a flow graph.
///
/// Ids are assigned by the store at creation time from the current node
/// count, rendered in decimal, and are never reused. They are plain strings
/// on the wire so the external surface can round-trip them untouched.
///
/// # Examples
///
/// ```rust
/// use flowloom::types::NodeId;
///
/// let id = NodeId::new("3");
/// assert_eq!(id.as_str(), "3");
/// assert_eq!(id.to_string(), "3");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Creates a node id from its raw string form.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw string form of this id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for NodeId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for NodeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The closed set of node kinds the builder understands.
///
/// Adding a kind means adding a variant here and registering its
/// [`NodeSpec`](crate::kinds::NodeSpec) implementation with the
/// [`KindRegistry`](crate::registry::KindRegistry); there is no open
/// string-keyed dispatch.
///
/// Each kind has a stable wire tag used as the drag payload between the
/// palette and the canvas drop handler. Tags that do not decode are dropped
/// by the shell without creating a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// A node that sends one text message when the flow reaches it.
    TextMessage,
}

impl NodeKind {
    /// The wire tag for this kind, written into the drag payload channel.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            NodeKind::TextMessage => "TextMessage",
        }
    }

    /// Decodes a wire tag back into a kind.
    ///
    /// Returns `None` for unknown or empty tags so callers can treat a
    /// malformed drop payload as a no-op.
    #[must_use]
    pub fn parse_tag(tag: &str) -> Option<Self> {
        match tag {
            "TextMessage" => Some(NodeKind::TextMessage),
            _ => None,
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Canvas-space coordinates for a node.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Placement for the nth click-to-add node: a diagonal stack offset by
    /// 100 canvas units per existing node.
    #[must_use]
    pub fn stacked(index: usize) -> Self {
        let offset = 100.0 + index as f64 * 100.0;
        Self::new(offset, offset)
    }
}

/// Whether a handle accepts incoming edges or emits outgoing ones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleRole {
    /// Outbound connection point; edges start here.
    Source,
    /// Inbound connection point; edges end here.
    Target,
}

/// Which side of the node visual a handle sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleSide {
    Left,
    Right,
}

/// A named connection point on a node visual.
///
/// Handle ids embed the owning node id (`"{node_id}-target"`,
/// `"{node_id}-source"`) so the surface can address them unambiguously.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Handle {
    pub id: String,
    pub role: HandleRole,
    pub side: HandleSide,
}

impl Handle {
    /// The inbound handle for a node.
    #[must_use]
    pub fn target_of(node: &NodeId, side: HandleSide) -> Self {
        Self {
            id: format!("{node}-target"),
            role: HandleRole::Target,
            side,
        }
    }

    /// The outbound handle for a node.
    #[must_use]
    pub fn source_of(node: &NodeId, side: HandleSide) -> Self {
        Self {
            id: format!("{node}-source"),
            role: HandleRole::Source,
            side,
        }
    }
}
