use std::sync::Arc;

use flowloom::graph::Connection;
use flowloom::persist::MemoryStore;
use flowloom::registry::KindRegistry;
use flowloom::shell::{FlowShell, SurfaceEvent};
use flowloom::types::{NodeId, Position};

/// Shell wired to a memory store the test keeps a handle on.
#[allow(dead_code)]
pub fn shell_with_memory_store() -> (FlowShell, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let shell = FlowShell::new(KindRegistry::with_defaults(), Box::new(Arc::clone(&store)));
    (shell, store)
}

/// Drops a TextMessage node the way the canvas surface reports it.
#[allow(dead_code)]
pub fn drop_node(shell: &mut FlowShell, x: f64, y: f64) -> NodeId {
    shell
        .on_drop("TextMessage", Position::new(x, y))
        .expect("TextMessage drop creates a node")
}

#[allow(dead_code)]
pub fn connect(shell: &mut FlowShell, from: &NodeId, to: &NodeId) {
    shell.handle(SurfaceEvent::Connected(Connection::new(
        from.clone(),
        to.clone(),
    )));
}

/// Drains queued notices into their message strings.
///
/// Receivers share one queue, so a fresh subscription sees everything not
/// yet drained.
#[allow(dead_code)]
pub fn drain_messages(shell: &FlowShell) -> Vec<String> {
    shell
        .notices()
        .try_iter()
        .map(|notice| notice.message)
        .collect()
}
