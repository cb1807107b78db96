//! High-level controller for the diagram editor panel.
//!
//! [`DiagramEditor`] owns the store, both edit panels and the reconnect
//! tracker, and implements every callback the canvas fires. Clone it to share
//! it across callbacks.
//!
//! # Example
//!
//! ```ignore
//! use flow_diagram_editor::{DiagramEditor, EdgeRow, NodeRow};
//!
//! slint::include_modules!();
//!
//! fn main() {
//!     let window = MainWindow::new().unwrap();
//!     let editor = DiagramEditor::new();
//!
//!     let nodes = Rc::new(VecModel::<NodeRow>::default());
//!     let edges = Rc::new(VecModel::<EdgeRow>::default());
//!     editor.bind_node_model(nodes.clone(), NodeRow::from_node);
//!     editor.bind_edge_model(edges.clone(), EdgeRow::from_edge);
//!     window.set_nodes(ModelRc::from(nodes));
//!     window.set_edges(ModelRc::from(edges));
//!
//!     window.on_add_node(editor.add_callback());
//!     window.on_node_clicked({
//!         let editor = editor.clone();
//!         move |id| editor.on_node_click(&id.as_str().into())
//!     });
//!     window.on_label_edited({
//!         let editor = editor.clone();
//!         move |text| editor.on_label_input(text.as_str())
//!     });
//!
//!     window.run().unwrap();
//! }
//! ```

use crate::changes::{EdgeChange, NodeChange};
use crate::config::{Diagram, EditorConfig};
use crate::diagram::{Connection, Edge, EdgeId, EdgeKind, MovableNode, Node, NodeId, XYPosition};
use crate::id::IdGenerator;
use crate::reconnect::{ReconnectOutcome, ReconnectTracker};
use crate::selection::{AnimationChoice, ConnectorKind, EdgeStylePanel, NodeEditPanel};
use crate::store::DiagramStore;
use crate::validation::{CompositeValidator, NoSelfLoopValidator};
use slint::VecModel;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Controller that manages diagram state and provides callback implementations.
///
/// Handlers never fail loudly: unknown ids and rejected connections are
/// logged at debug level and otherwise ignored.
#[derive(Clone)]
pub struct DiagramEditor {
    store: Rc<RefCell<DiagramStore>>,
    node_panel: Rc<RefCell<NodeEditPanel>>,
    edge_panel: Rc<RefCell<EdgeStylePanel>>,
    reconnect: Rc<RefCell<ReconnectTracker>>,
    ids: Rc<RefCell<IdGenerator>>,
    added_y: Rc<Cell<f32>>,
    config: Rc<EditorConfig>,
}

impl Default for DiagramEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramEditor {
    /// Create an editor with default settings and the built-in seed diagram.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default(), Diagram::initial())
    }

    pub fn with_config(config: EditorConfig, diagram: Diagram) -> Self {
        let mut validator = CompositeValidator::standard();
        if config.reject_self_loops {
            validator = validator.add(NoSelfLoopValidator);
        }
        let store = DiagramStore::with_validator(diagram.nodes, diagram.edges, validator);
        Self {
            store: Rc::new(RefCell::new(store)),
            node_panel: Rc::new(RefCell::new(NodeEditPanel::new())),
            edge_panel: Rc::new(RefCell::new(EdgeStylePanel::new())),
            reconnect: Rc::new(RefCell::new(ReconnectTracker::new())),
            ids: Rc::new(RefCell::new(IdGenerator::new(config.node_id_prefix.clone()))),
            added_y: Rc::new(Cell::new(0.0)),
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Get access to the store.
    pub fn store(&self) -> Rc<RefCell<DiagramStore>> {
        self.store.clone()
    }

    /// Snapshot of the current nodes.
    pub fn nodes(&self) -> Vec<Node> {
        self.store.borrow().nodes().to_vec()
    }

    /// Snapshot of the current edges.
    pub fn edges(&self) -> Vec<Edge> {
        self.store.borrow().edges().to_vec()
    }

    pub fn node(&self, id: &NodeId) -> Option<Node> {
        self.store.borrow().node(id).cloned()
    }

    pub fn edge(&self, id: &EdgeId) -> Option<Edge> {
        self.store.borrow().edge(id).cloned()
    }

    /// Current node panel fields.
    pub fn node_panel(&self) -> NodeEditPanel {
        self.node_panel.borrow().clone()
    }

    /// Current edge panel fields.
    pub fn edge_panel(&self) -> EdgeStylePanel {
        self.edge_panel.borrow().clone()
    }

    pub fn is_reconnecting(&self) -> bool {
        self.reconnect.borrow().is_dragging()
    }

    pub fn bind_node_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + PartialEq + 'static,
        F: Fn(&Node) -> P + 'static,
    {
        self.store.borrow_mut().bind_node_model(model, constructor);
    }

    pub fn bind_edge_model<P, F>(&self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + PartialEq + 'static,
        F: Fn(&Edge) -> P + 'static,
    {
        self.store.borrow_mut().bind_edge_model(model, constructor);
    }

    // === Direct handlers ===

    /// Handle the add button: append a node below the previously added one.
    pub fn on_add(&self) -> NodeId {
        let y = self.added_y.get() + self.config.added_node_y_step;
        self.added_y.set(y);

        let id = {
            let store = self.store.borrow();
            let mut ids = self.ids.borrow_mut();
            ids.next_id(|id| store.contains_node(id))
        };
        let node = Node::new(
            id.clone(),
            self.config.added_node_label.clone(),
            XYPosition::new(self.config.added_node_x, y),
        );
        log::debug!("adding node {} at ({}, {})", id, node.position.x, y);
        self.store.borrow_mut().add_node(node);
        id
    }

    pub fn on_nodes_change(&self, changes: Vec<NodeChange>) {
        self.store.borrow_mut().apply_node_changes(changes);
        self.release_removed();
    }

    pub fn on_edges_change(&self, changes: Vec<EdgeChange>) {
        self.store.borrow_mut().apply_edge_changes(changes);
        self.release_removed();
    }

    /// Handle a completed connection drag. Returns the new edge's id if accepted.
    pub fn on_connect(&self, connection: Connection) -> Option<EdgeId> {
        match self.store.borrow_mut().connect(connection) {
            Ok(id) => {
                log::debug!("connected edge {}", id);
                Some(id)
            }
            Err(err) => {
                log::debug!("connection rejected: {}", err);
                None
            }
        }
    }

    /// Capture the clicked node into the node panel.
    pub fn on_node_click(&self, id: &NodeId) {
        let store = self.store.borrow();
        match store.node(id) {
            Some(node) => {
                log::debug!("node clicked: {} label={:?} background={:?}", id, node.label(), node.background());
                self.node_panel.borrow_mut().capture(node);
            }
            None => log::debug!("click on unknown node {}", id),
        }
    }

    pub fn on_label_input(&self, value: impl Into<String>) {
        let applied = self.node_panel.borrow_mut().set_label(value, &mut self.store.borrow_mut());
        if !applied {
            log::debug!("label edit ignored: no node selected");
        }
    }

    pub fn on_background_input(&self, value: impl Into<String>) {
        let applied = self.node_panel.borrow_mut().set_background(value, &mut self.store.borrow_mut());
        if !applied {
            log::debug!("background edit ignored: no node selected");
        }
    }

    /// Move the dragged node to `position`.
    pub fn on_node_drag(&self, id: &NodeId, position: XYPosition) {
        let moved = self.store.borrow_mut().replace_node(id, |node| {
            node.set_position(position);
            node.dragging = true;
        });
        if !moved {
            log::debug!("drag of unknown node {}", id);
        }
    }

    /// Clear the dragging flag once the pointer is released.
    pub fn on_node_drag_stop(&self, id: &NodeId) {
        self.store.borrow_mut().replace_node(id, |node| node.dragging = false);
    }

    /// Capture the clicked edge into the edge panel.
    pub fn on_edge_click(&self, id: &EdgeId) {
        let store = self.store.borrow();
        match store.edge(id) {
            Some(edge) => {
                log::debug!("edge clicked: {} animated={} marker={:?}", id, edge.animated, edge.marker_end);
                self.edge_panel.borrow_mut().capture(edge);
            }
            None => log::debug!("click on unknown edge {}", id),
        }
    }

    pub fn on_connector_input(&self, connector: ConnectorKind) {
        if !self.edge_panel.borrow_mut().set_connector(connector, &mut self.store.borrow_mut()) {
            log::debug!("connector edit ignored: no edge selected");
        }
    }

    pub fn on_animation_input(&self, choice: AnimationChoice) {
        if !self.edge_panel.borrow_mut().set_animation(choice, &mut self.store.borrow_mut()) {
            log::debug!("animation edit ignored: no edge selected");
        }
    }

    pub fn on_edge_kind_input(&self, kind: EdgeKind) {
        if !self.edge_panel.borrow_mut().set_kind(kind, &mut self.store.borrow_mut()) {
            log::debug!("edge type edit ignored: no edge selected");
        }
    }

    pub fn on_edge_update_start(&self, id: &EdgeId) {
        log::debug!("reconnect started for edge {}", id);
        self.reconnect.borrow_mut().start(id.clone());
    }

    /// Handle an endpoint dropped on a valid handle.
    pub fn on_edge_update(&self, old: &EdgeId, connection: Connection) {
        let result = self.store.borrow_mut().update_edge(old, connection);
        match result {
            Ok(new_id) => {
                log::debug!("edge {} reconnected as {}", old, new_id);
                self.follow_edge_rename(old, &new_id);
                self.reconnect.borrow_mut().mark_success(new_id);
            }
            Err(err) => log::debug!("reconnect of {} rejected: {}", old, err),
        }
    }

    /// Handle the end of an endpoint drag; `id` is the edge that was grabbed.
    pub fn on_edge_update_end(&self, id: &EdgeId) {
        let outcome = self.reconnect.borrow_mut().finish();
        if outcome == ReconnectOutcome::Abandoned {
            log::debug!("edge {} released over empty space, removing", id);
            self.store.borrow_mut().remove_edge(id);
            self.release_removed();
        }
    }

    /// Clear any panel whose captured element is no longer in the diagram.
    fn release_removed(&self) {
        let store = self.store.borrow();
        let mut node_panel = self.node_panel.borrow_mut();
        if node_panel.node_id().is_some_and(|id| !store.contains_node(id)) {
            log::debug!("captured node removed, clearing node panel");
            node_panel.clear();
        }
        let mut edge_panel = self.edge_panel.borrow_mut();
        if edge_panel.edge_id().is_some_and(|id| store.edge(id).is_none()) {
            log::debug!("captured edge removed, clearing edge panel");
            edge_panel.clear();
        }
    }

    /// Keep the edge panel pointed at an edge whose id changed.
    fn follow_edge_rename(&self, old: &EdgeId, new: &EdgeId) {
        if self.edge_panel.borrow().edge_id() != Some(old) {
            return;
        }
        if let Some(edge) = self.store.borrow().edge(new) {
            self.edge_panel.borrow_mut().capture(edge);
        }
    }

    // === Callback factories ===

    pub fn add_callback(&self) -> impl Fn() {
        let this = self.clone();
        move || {
            this.on_add();
        }
    }

    pub fn nodes_change_callback(&self) -> impl Fn(Vec<NodeChange>) {
        let this = self.clone();
        move |changes: Vec<NodeChange>| this.on_nodes_change(changes)
    }

    pub fn edges_change_callback(&self) -> impl Fn(Vec<EdgeChange>) {
        let this = self.clone();
        move |changes: Vec<EdgeChange>| this.on_edges_change(changes)
    }

    pub fn connect_callback(&self) -> impl Fn(Connection) {
        let this = self.clone();
        move |connection: Connection| {
            this.on_connect(connection);
        }
    }

    pub fn node_click_callback(&self) -> impl Fn(&NodeId) {
        let this = self.clone();
        move |id: &NodeId| this.on_node_click(id)
    }

    pub fn node_drag_callback(&self) -> impl Fn(&NodeId, XYPosition) {
        let this = self.clone();
        move |id: &NodeId, position: XYPosition| this.on_node_drag(id, position)
    }

    pub fn edge_click_callback(&self) -> impl Fn(&EdgeId) {
        let this = self.clone();
        move |id: &EdgeId| this.on_edge_click(id)
    }

    pub fn edge_update_start_callback(&self) -> impl Fn(&EdgeId) {
        let this = self.clone();
        move |id: &EdgeId| this.on_edge_update_start(id)
    }

    pub fn edge_update_callback(&self) -> impl Fn(&EdgeId, Connection) {
        let this = self.clone();
        move |old: &EdgeId, connection: Connection| this.on_edge_update(old, connection)
    }

    pub fn edge_update_end_callback(&self) -> impl Fn(&EdgeId) {
        let this = self.clone();
        move |id: &EdgeId| this.on_edge_update_end(id)
    }
}
