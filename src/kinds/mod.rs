//! Node kind capabilities: on-canvas visual, palette entry, settings form.
//!
//! Every [`NodeKind`] variant has one [`NodeSpec`] implementation describing
//! the three ways a kind presents itself to the external surface. The
//! implementations live in this module's submodules and are wired up by
//! [`KindRegistry::with_defaults`](crate::registry::KindRegistry::with_defaults).
//!
//! The capability outputs are plain data. The surface decides pixels; this
//! crate decides structure: which handles exist, which fields are editable,
//! what a freshly created node carries.

use serde_json::Value;

use crate::node::{FlowNode, NodeData};
use crate::types::{Handle, NodeId, NodeKind};

mod text_message;

pub use text_message::{MESSAGE_KEY, TextMessage};

/// How a node came into being, which decides its initial payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnOrigin {
    /// Dragged from the palette and dropped on the canvas.
    Drop,
    /// Added by clicking the palette entry.
    PaletteClick,
}

/// The per-kind capability contract.
///
/// A request for a kind with no registered spec is answered with `None` by
/// the registry and treated as a no-op by the shell; the contract itself
/// has no failure mode.
pub trait NodeSpec: Send + Sync {
    /// The kind this spec describes.
    fn kind(&self) -> NodeKind;

    /// The on-canvas representation of one node of this kind.
    ///
    /// Must expose exactly the connection points the kind defines.
    fn render(&self, node: &FlowNode) -> NodeVisual;

    /// The draggable palette representation of this kind.
    fn palette_entry(&self) -> PaletteEntry;

    /// An editable view over the node's payload.
    fn settings_form(&self, node: &FlowNode) -> SettingsForm;

    /// The payload a freshly created node of this kind starts with.
    fn default_data(&self, origin: SpawnOrigin) -> NodeData;
}

/// Structural description of a node on the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeVisual {
    /// Header label, e.g. "Send Message".
    pub title: String,
    /// Body text taken from the node's payload.
    pub body: String,
    /// The connection points this node exposes.
    pub handles: Vec<Handle>,
}

/// A palette entry the user drags onto the canvas.
///
/// At drag-start the surface writes `drag_tag` into the drag payload
/// channel; the drop handler reads it back to decide which kind to create.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaletteEntry {
    pub kind: NodeKind,
    pub label: String,
    pub drag_tag: &'static str,
}

/// One editable field of a settings form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub label: String,
    pub value: String,
}

/// An editable view over a node's payload.
///
/// Submitting commits the field values back through the store as a data
/// patch; closing discards edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettingsForm {
    pub node_id: NodeId,
    pub kind: NodeKind,
    pub fields: Vec<FormField>,
}

impl SettingsForm {
    /// Edits one field by name. Returns `false` when the form has no such
    /// field.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.fields.iter_mut().find(|field| field.name == name) {
            Some(field) => {
                field.value = value.into();
                true
            }
            None => false,
        }
    }

    /// Reads one field's current value.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }

    /// The data patch committing this form would apply.
    #[must_use]
    pub fn patch(&self) -> NodeData {
        self.fields
            .iter()
            .map(|field| (field.name.clone(), Value::String(field.value.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn form() -> SettingsForm {
        SettingsForm {
            node_id: NodeId::new("1"),
            kind: NodeKind::TextMessage,
            fields: vec![FormField {
                name: "message".into(),
                label: "Message".into(),
                value: "hello".into(),
            }],
        }
    }

    #[test]
    fn set_edits_known_fields_only() {
        let mut form = form();
        assert!(form.set("message", "edited"));
        assert!(!form.set("missing", "nope"));
        assert_eq!(form.value("message"), Some("edited"));
    }

    #[test]
    fn patch_carries_every_field_as_a_string() {
        let patch = form().patch();
        assert_eq!(patch.len(), 1);
        assert_eq!(patch.get("message"), Some(&json!("hello")));
    }
}
