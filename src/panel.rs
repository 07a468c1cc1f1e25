//! Settings panel state machine.
//!
//! The panel is either showing nothing or editing one node. Clicking a
//! node always enters `Editing` with the clicked id, including re-clicks;
//! closing returns to `NoSelection`. There is no terminal state and the
//! panel resets with each session.

use crate::types::NodeId;

/// Which settings form, if any, the panel is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// No node selected; the palette is shown instead.
    #[default]
    NoSelection,
    /// The settings form for one node is open.
    Editing(NodeId),
}

impl PanelState {
    /// Node click: enter `Editing` with the clicked id.
    pub fn select(&mut self, id: NodeId) {
        *self = PanelState::Editing(id);
    }

    /// Explicit close: back to `NoSelection`.
    pub fn close(&mut self) {
        *self = PanelState::NoSelection;
    }

    /// The node being edited, when any.
    #[must_use]
    pub fn editing(&self) -> Option<&NodeId> {
        match self {
            PanelState::NoSelection => None,
            PanelState::Editing(id) => Some(id),
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self, PanelState::Editing(_))
    }
}
