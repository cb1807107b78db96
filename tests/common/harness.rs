//! Test harness wiring a [`DiagramEditor`] to Slint row models.
//!
//! Mirrors what a host window does: bind one `VecModel` per collection and
//! forward canvas callbacks to the editor.

#![allow(dead_code)]

use super::{init_logging, RowTracker};
use flow_diagram_editor::{
    AnimationChoice, Connection, ConnectorKind, Diagram, DiagramEditor, Edge, EdgeId, EdgeRow,
    EditorConfig, Node, NodeId, NodeRow, XYPosition,
};
use slint::{Model, VecModel};
use std::rc::Rc;

pub struct EditorHarness {
    pub editor: DiagramEditor,
    pub node_rows: Rc<VecModel<NodeRow>>,
    pub edge_rows: Rc<VecModel<EdgeRow>>,
    pub tracker: RowTracker,
}

impl EditorHarness {
    /// Editor with the built-in seed diagram.
    pub fn new() -> Self {
        Self::with_diagram(Diagram::initial())
    }

    pub fn with_diagram(diagram: Diagram) -> Self {
        Self::with_config(EditorConfig::default(), diagram)
    }

    pub fn with_config(config: EditorConfig, diagram: Diagram) -> Self {
        init_logging();
        let editor = DiagramEditor::with_config(config, diagram);
        let node_rows = Rc::new(VecModel::<NodeRow>::default());
        let edge_rows = Rc::new(VecModel::<EdgeRow>::default());
        editor.bind_node_model(node_rows.clone(), NodeRow::from_node);
        editor.bind_edge_model(edge_rows.clone(), EdgeRow::from_edge);
        Self { editor, node_rows, edge_rows, tracker: RowTracker::new() }
    }

    /// Four unconnected nodes in a row: a, b, c, d.
    pub fn with_plain_nodes() -> Self {
        let nodes = ["a", "b", "c", "d"]
            .iter()
            .enumerate()
            .map(|(i, id)| Node::new(*id, id.to_uppercase(), XYPosition::new(i as f32 * 200.0, 0.0)))
            .collect();
        Self::with_diagram(Diagram { nodes, edges: Vec::new() })
    }

    // === Simulated user interactions ===

    pub fn click_node(&self, id: &str) {
        self.editor.on_node_click(&NodeId::from(id));
        self.snapshot();
    }

    pub fn type_label(&self, text: &str) {
        self.editor.on_label_input(text);
        self.snapshot();
    }

    pub fn type_background(&self, text: &str) {
        self.editor.on_background_input(text);
        self.snapshot();
    }

    pub fn drag_node(&self, id: &str, x: f32, y: f32) {
        self.editor.on_node_drag(&NodeId::from(id), XYPosition::new(x, y));
        self.snapshot();
    }

    pub fn click_edge(&self, id: &str) {
        self.editor.on_edge_click(&EdgeId::from(id));
    }

    pub fn choose_connector(&self, value: &str) {
        let kind: ConnectorKind = value.parse().expect("valid connector option");
        self.editor.on_connector_input(kind);
    }

    pub fn choose_animation(&self, value: &str) {
        let choice: AnimationChoice = value.parse().expect("valid animation option");
        self.editor.on_animation_input(choice);
    }

    pub fn connect(&self, source: &str, target: &str) -> Option<EdgeId> {
        self.editor.on_connect(Connection::new(source, target))
    }

    /// Drag an endpoint of `edge`; `drop_on` is the new (source, target) or
    /// `None` for a release over empty space.
    pub fn reconnect(&self, edge: &str, drop_on: Option<(&str, &str)>) {
        let id = EdgeId::from(edge);
        self.editor.on_edge_update_start(&id);
        if let Some((source, target)) = drop_on {
            self.editor.on_edge_update(&id, Connection::new(source, target));
        }
        self.editor.on_edge_update_end(&id);
    }

    // === Lookups ===

    pub fn node(&self, id: &str) -> Node {
        self.editor.node(&NodeId::from(id)).expect("node exists")
    }

    pub fn edge(&self, id: &str) -> Option<Edge> {
        self.editor.edge(&EdgeId::from(id))
    }

    pub fn node_row(&self, id: &str) -> Option<NodeRow> {
        self.node_rows.iter().find(|row| row.id.as_str() == id)
    }

    pub fn edge_row(&self, id: &str) -> Option<EdgeRow> {
        self.edge_rows.iter().find(|row| row.id.as_str() == id)
    }

    pub fn labels(&self) -> Vec<String> {
        self.node_rows.iter().map(|row| row.label.to_string()).collect()
    }

    fn snapshot(&self) {
        self.tracker.label_snapshots.borrow_mut().push(self.labels());
    }
}
