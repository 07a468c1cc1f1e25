//! The Text Message node kind: send one text message.

use serde_json::{Value, json};

use super::{FormField, NodeSpec, NodeVisual, PaletteEntry, SettingsForm, SpawnOrigin};
use crate::node::{FlowNode, NodeData};
use crate::types::{Handle, HandleSide, NodeKind};

/// Payload field holding the message text.
pub const MESSAGE_KEY: &str = "message";

/// Spec for [`NodeKind::TextMessage`].
///
/// Exposes exactly one inbound handle on the left and one outbound handle
/// on the right.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextMessage;

impl TextMessage {
    fn message_of(node: &FlowNode) -> &str {
        node.field(MESSAGE_KEY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }
}

impl NodeSpec for TextMessage {
    fn kind(&self) -> NodeKind {
        NodeKind::TextMessage
    }

    fn render(&self, node: &FlowNode) -> NodeVisual {
        NodeVisual {
            title: "Send Message".to_string(),
            body: Self::message_of(node).to_string(),
            handles: vec![
                Handle::target_of(&node.id, HandleSide::Left),
                Handle::source_of(&node.id, HandleSide::Right),
            ],
        }
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            kind: self.kind(),
            label: "Message Node".to_string(),
            drag_tag: self.kind().tag(),
        }
    }

    fn settings_form(&self, node: &FlowNode) -> SettingsForm {
        SettingsForm {
            node_id: node.id.clone(),
            kind: self.kind(),
            fields: vec![FormField {
                name: MESSAGE_KEY.to_string(),
                label: "Message".to_string(),
                value: Self::message_of(node).to_string(),
            }],
        }
    }

    fn default_data(&self, origin: SpawnOrigin) -> NodeData {
        let message = match origin {
            SpawnOrigin::Drop => format!("new {} node added", self.kind().tag()),
            SpawnOrigin::PaletteClick => "this is a test message".to_string(),
        };
        let mut data = NodeData::default();
        data.insert(MESSAGE_KEY.to_string(), json!(message));
        data
    }
}
