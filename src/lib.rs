//! # Flow Diagram Editor
//!
//! Headless state engine for an interactive node/edge diagram editor panel.
//! The canvas that draws the diagram (pan/zoom, hit-testing, drag gestures,
//! edge routing) lives elsewhere; this crate keeps the diagram it draws and
//! reacts to the callbacks it fires.
//!
//! ## Features
//!
//! - **Immutable Store** - Every change produces a new node or edge collection
//! - **Change Batches** - Position, dimension, selection, add, remove and reset descriptors
//! - **Edit Panels** - Node label/background and edge connector/animation bindings
//! - **Reconnect Tracking** - Edges dropped over empty space are removed
//! - **Validation** - Pluggable connection rules, endpoints must exist by default
//! - **Slint Models** - Bind `VecModel`s that follow the store
//!
//! ## Core Types
//!
//! - [`DiagramEditor`] - Controller implementing the canvas callbacks
//! - [`DiagramStore`] - Node and edge collections with immutable mutators
//! - [`NodeEditPanel`] / [`EdgeStylePanel`] - Selection-driven form state
//! - [`ReconnectTracker`] - Edge endpoint drag state machine
//! - [`Diagram`] / [`EditorConfig`] - Seed diagram and settings

pub mod changes;
pub mod config;
pub mod diagram;
pub mod editor;
pub mod error;
pub mod id;
pub mod models;
pub mod reconnect;
pub mod selection;
pub mod store;
pub mod validation;

pub use changes::{apply_edge_changes, apply_node_changes, EdgeChange, NodeChange};
pub use config::{Diagram, EditorConfig};
pub use diagram::{
    Connection, DiagramElement, Edge, EdgeId, EdgeKind, MarkerKind, MovableNode, Node, NodeData,
    NodeId, NodeKind, NodeStyle, XYPosition,
};
pub use editor::DiagramEditor;
pub use error::{ConfigError, ConnectError, ParseOptionError};
pub use id::IdGenerator;
pub use models::{parse_hex_color, EdgeRow, NodeRow};
pub use reconnect::{ReconnectOutcome, ReconnectState, ReconnectTracker};
pub use selection::{AnimationChoice, ConnectorKind, EdgeStylePanel, NodeEditPanel};
pub use store::DiagramStore;
pub use validation::{
    validate_connection, CompositeValidator, ConnectionValidator, EndpointsExistValidator,
    NoDuplicatesValidator, NoSelfLoopValidator, ValidationResult,
};
