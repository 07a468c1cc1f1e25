//! # Flowloom: Chatbot Flow-Builder Core
//!
//! Flowloom is the headless core of a visual chatbot-flow builder: the flow
//! graph store, the node kind registry, the settings panel state machine,
//! and the save/validation contract. An external graph-editing surface owns
//! rendering, hit-testing, and drag physics; it talks to this crate only
//! through the data model and the event API.
//!
//! ## Core Concepts
//!
//! - **Nodes**: Steps of the flow, one kind today ("send a text message")
//! - **Edges**: Directed links between node handles
//! - **Store**: Single source of truth for one flow, mutated in event order
//! - **Kinds**: Closed set of variants, each with visual/palette/form capabilities
//! - **Shell**: Dispatches surface events and owns the save side effect
//!
//! ## Quick Start
//!
//! ### Driving the shell the way a canvas surface would
//!
//! ```
//! use flowloom::graph::Connection;
//! use flowloom::shell::{FlowShell, SurfaceEvent};
//! use flowloom::types::Position;
//!
//! let mut shell = FlowShell::with_defaults();
//! let notices = shell.notices();
//!
//! // Two palette drops, reported by the surface with the drag tag.
//! let first = shell.on_drop("TextMessage", Position::new(80.0, 40.0)).unwrap();
//! let second = shell.on_drop("TextMessage", Position::new(320.0, 40.0)).unwrap();
//!
//! // The second node has no incoming edge yet, so saving fails.
//! assert!(shell.save().is_err());
//! assert_eq!(
//!     notices.try_recv().unwrap().message,
//!     "All nodes must have a target handle"
//! );
//!
//! // Wire them up and save for real.
//! shell.handle(SurfaceEvent::Connected(Connection::new(first, second)));
//! assert!(shell.save().is_ok());
//! assert_eq!(
//!     notices.try_recv().unwrap().message,
//!     "Flow has been saved successfully"
//! );
//! ```
//!
//! ### Editing a node through its settings form
//!
//! ```
//! use flowloom::shell::{FlowShell, SurfaceEvent};
//! use flowloom::types::NodeKind;
//!
//! let mut shell = FlowShell::with_defaults();
//! let id = shell.add_from_palette(NodeKind::TextMessage).unwrap();
//!
//! // Clicking the node opens its form; submitting commits the patch.
//! shell.handle(SurfaceEvent::NodeClicked(id.clone()));
//! let mut form = shell.open_form().unwrap();
//! form.set("message", "Welcome aboard!");
//! assert!(shell.submit_form(&form));
//!
//! let node = shell.graph().node(&id).unwrap();
//! assert_eq!(node.field("message").and_then(|v| v.as_str()), Some("Welcome aboard!"));
//!
//! // Closing dismisses the form without further commits.
//! shell.close_form();
//! assert!(shell.open_form().is_none());
//! ```
//!
//! ### Using the store directly
//!
//! ```
//! use flowloom::graph::{Connection, FlowGraph};
//! use flowloom::node::NodeData;
//! use flowloom::types::{NodeKind, Position};
//!
//! let mut graph = FlowGraph::new();
//! let a = graph.add_node(NodeKind::TextMessage, Position::new(0.0, 0.0), NodeData::default());
//! let b = graph.add_node(NodeKind::TextMessage, Position::new(200.0, 0.0), NodeData::default());
//! graph.add_edge(Connection::new(a, b));
//! assert!(graph.validate().is_ok());
//! ```
//!
//! ## Module Guide
//!
//! - [`types`] - Node ids, the kind enum, positions, handles
//! - [`node`] - Node records and payload merging
//! - [`graph`] - The flow graph store and the save invariant
//! - [`kinds`] - Per-kind capabilities (visual, palette, settings form)
//! - [`registry`] - Kind-to-spec lookup and palette enumeration
//! - [`panel`] - Settings panel state machine
//! - [`shell`] - Surface event dispatch and the save side effect
//! - [`notify`] - User-visible notifications
//! - [`persist`] - Snapshot shape and store backends
//! - [`telemetry`] - Tracing bootstrap

pub mod graph;
pub mod kinds;
pub mod node;
pub mod notify;
pub mod panel;
pub mod persist;
pub mod registry;
pub mod shell;
pub mod telemetry;
pub mod types;
