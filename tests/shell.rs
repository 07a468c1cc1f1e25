mod common;

use common::*;
use flowloom::panel::PanelState;
use flowloom::shell::{FlowShell, SaveError, SurfaceEvent};
use flowloom::types::{NodeId, NodeKind, Position};

#[test]
fn save_rejects_then_accepts_once_wired() {
    let (mut shell, store) = shell_with_memory_store();

    let a = drop_node(&mut shell, 80.0, 40.0);
    let b = drop_node(&mut shell, 320.0, 40.0);

    // Unwired second node: validation failure, nothing persisted.
    let err = shell.save().unwrap_err();
    assert!(matches!(err, SaveError::Validation(_)));
    assert_eq!(
        drain_messages(&shell),
        vec!["All nodes must have a target handle".to_string()]
    );
    assert!(store.is_empty());

    connect(&mut shell, &a, &b);
    let saved = shell.save().unwrap();
    assert_eq!(saved.node_count, 2);
    assert_eq!(saved.edge_count, 1);
    assert_eq!(
        drain_messages(&shell),
        vec!["Flow has been saved successfully".to_string()]
    );

    let snapshot = store.latest().unwrap();
    assert_eq!(snapshot.snapshot_id, saved.snapshot_id);
    assert_eq!(snapshot.nodes.len(), 2);
}

#[test]
fn single_node_graph_saves_without_edges() {
    let (mut shell, store) = shell_with_memory_store();
    drop_node(&mut shell, 10.0, 10.0);

    assert!(shell.save().is_ok());
    assert_eq!(
        drain_messages(&shell),
        vec!["Flow has been saved successfully".to_string()]
    );
    assert_eq!(store.len(), 1);
}

#[test]
fn failed_save_leaves_the_graph_unchanged() {
    let (mut shell, _store) = shell_with_memory_store();
    let a = drop_node(&mut shell, 0.0, 0.0);
    drop_node(&mut shell, 100.0, 0.0);

    let nodes_before = shell.graph().nodes().to_vec();
    let edges_before = shell.graph().edges().to_vec();
    assert!(shell.save().is_err());
    assert_eq!(shell.graph().nodes(), nodes_before.as_slice());
    assert_eq!(shell.graph().edges(), edges_before.as_slice());
    assert!(shell.graph().node(&a).is_some());
}

#[test]
fn dropped_event_with_unknown_tag_is_ignored() {
    let mut shell = FlowShell::with_defaults();
    shell.handle(SurfaceEvent::Dropped {
        tag: "Carousel".into(),
        position: Position::new(5.0, 5.0),
    });
    assert!(shell.graph().is_empty());
    // No notification either; silent by design.
    assert!(drain_messages(&shell).is_empty());
}

#[test]
fn dropped_nodes_carry_the_drop_position_and_default_message() {
    let mut shell = FlowShell::with_defaults();
    let id = drop_node(&mut shell, 42.0, 17.0);
    let node = shell.graph().node(&id).unwrap();
    assert_eq!(node.position, Position::new(42.0, 17.0));
    assert_eq!(
        node.field("message").and_then(|v| v.as_str()),
        Some("new TextMessage node added")
    );
}

#[test]
fn panel_follows_clicks_and_close() {
    let mut shell = FlowShell::with_defaults();
    let a = drop_node(&mut shell, 0.0, 0.0);
    let b = drop_node(&mut shell, 100.0, 0.0);

    assert_eq!(shell.panel(), &PanelState::NoSelection);

    shell.handle(SurfaceEvent::NodeClicked(a.clone()));
    assert_eq!(shell.panel().editing(), Some(&a));

    // Clicking another node re-enters Editing with the new id.
    shell.handle(SurfaceEvent::NodeClicked(b.clone()));
    assert_eq!(shell.panel().editing(), Some(&b));

    shell.close_form();
    assert_eq!(shell.panel(), &PanelState::NoSelection);
}

#[test]
fn settings_form_commits_through_the_store() {
    let mut shell = FlowShell::with_defaults();
    let id = shell.add_from_palette(NodeKind::TextMessage).unwrap();
    shell.on_node_click(id.clone());

    let mut form = shell.open_form().unwrap();
    assert_eq!(form.value("message"), Some("this is a test message"));
    form.set("message", "updated copy");
    assert!(shell.submit_form(&form));

    // Panel stays open on the same node after a submit.
    assert_eq!(shell.panel().editing(), Some(&id));
    assert_eq!(
        shell
            .graph()
            .node(&id)
            .unwrap()
            .field("message")
            .and_then(|v| v.as_str()),
        Some("updated copy")
    );
}

#[test]
fn closing_the_form_discards_nothing_already_committed() {
    let mut shell = FlowShell::with_defaults();
    let id = shell.add_from_palette(NodeKind::TextMessage).unwrap();
    shell.on_node_click(id.clone());

    let mut form = shell.open_form().unwrap();
    form.set("message", "kept");
    shell.submit_form(&form);
    shell.close_form();

    assert!(shell.open_form().is_none());
    assert_eq!(
        shell
            .graph()
            .node(&id)
            .unwrap()
            .field("message")
            .and_then(|v| v.as_str()),
        Some("kept")
    );
}

#[test]
fn submitting_a_form_for_a_stale_id_is_a_no_op() {
    let mut shell = FlowShell::with_defaults();
    let id = shell.add_from_palette(NodeKind::TextMessage).unwrap();
    shell.on_node_click(id);

    let mut form = shell.open_form().unwrap();
    form.node_id = NodeId::new("404");
    assert!(!shell.submit_form(&form));
}

#[test]
fn palette_lists_the_builtin_kind() {
    let shell = FlowShell::with_defaults();
    let palette = shell.palette();
    assert_eq!(palette.len(), 1);
    assert_eq!(palette[0].kind, NodeKind::TextMessage);
    assert_eq!(palette[0].label, "Message Node");
    assert_eq!(palette[0].drag_tag, "TextMessage");
}

#[test]
fn render_node_goes_through_the_registry() {
    let mut shell = FlowShell::with_defaults();
    let id = drop_node(&mut shell, 0.0, 0.0);
    let visual = shell.render_node(&id).unwrap();
    assert_eq!(visual.title, "Send Message");
    assert_eq!(visual.body, "new TextMessage node added");
    assert_eq!(visual.handles.len(), 2);

    assert!(shell.render_node(&NodeId::new("404")).is_none());
}
