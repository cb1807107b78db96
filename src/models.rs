//! Row models handed to the canvas.
//!
//! The store owns the diagram as plain Rust collections. A canvas built with
//! Slint consumes `VecModel`s instead, so the store can be bound to one model
//! per collection and pushes every new collection into it.
//!
//! # Example
//!
//! ```ignore
//! use flow_diagram_editor::{DiagramEditor, NodeRow};
//! use slint::{ModelRc, VecModel};
//! use std::rc::Rc;
//!
//! let editor = DiagramEditor::new();
//! let rows = Rc::new(VecModel::<NodeRow>::default());
//! editor.bind_node_model(rows.clone(), NodeRow::from_node);
//! window.set_nodes(ModelRc::from(rows));
//! ```

use crate::diagram::{Edge, Node};
use slint::{Color, Model, SharedString, VecModel};
use std::rc::Rc;

/// Internal trait for auto-syncing to Slint models.
pub(crate) trait ModelSyncer<T> {
    fn sync(&self, items: &[T]);
}

/// Concrete implementation of ModelSyncer for a specific row type.
pub(crate) struct ConcreteModelSyncer<P, F> {
    model: Rc<VecModel<P>>,
    constructor: F,
}

impl<P, F> ConcreteModelSyncer<P, F> {
    pub(crate) fn new(model: Rc<VecModel<P>>, constructor: F) -> Self {
        Self { model, constructor }
    }
}

impl<T, P, F> ModelSyncer<T> for ConcreteModelSyncer<P, F>
where
    P: Clone + PartialEq + 'static,
    F: Fn(&T) -> P,
{
    fn sync(&self, items: &[T]) {
        // Update changed rows or add new ones
        for (i, item) in items.iter().enumerate() {
            let row = (self.constructor)(item);
            if i < self.model.row_count() {
                if self.model.row_data(i).as_ref() != Some(&row) {
                    self.model.set_row_data(i, row);
                }
            } else {
                self.model.push(row);
            }
        }
        // Remove excess rows
        while self.model.row_count() > items.len() {
            self.model.remove(self.model.row_count() - 1);
        }
    }
}

/// Default row shape for nodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeRow {
    pub id: SharedString,
    pub label: SharedString,
    pub x: f32,
    pub y: f32,
    pub background: SharedString,
    /// `background` parsed as a hex colour, transparent otherwise
    pub background_color: Color,
    pub selected: bool,
}

impl NodeRow {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.as_str().into(),
            label: node.label().into(),
            x: node.position.x,
            y: node.position.y,
            background: node.background().into(),
            background_color: parse_hex_color(node.background()).unwrap_or_default(),
            selected: node.selected,
        }
    }
}

/// Default row shape for edges.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeRow {
    pub id: SharedString,
    pub source: SharedString,
    pub target: SharedString,
    pub kind: SharedString,
    pub marker: SharedString,
    pub animated: bool,
    pub selected: bool,
}

impl EdgeRow {
    pub fn from_edge(edge: &Edge) -> Self {
        let kind = crate::selection::edge_kind_name(edge.kind);
        let marker = crate::selection::ConnectorKind::of_edge(edge);
        Self {
            id: edge.id.as_str().into(),
            source: edge.source.as_str().into(),
            target: edge.target.as_str().into(),
            kind: kind.into(),
            marker: marker.as_str().into(),
            animated: edge.animated,
            selected: edge.selected,
        }
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
///
/// Named CSS colours are left to the canvas and return `None`.
pub fn parse_hex_color(value: &str) -> Option<Color> {
    let hex = value.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let mut c = hex.chars().map(|ch| channel(&ch.to_string()).map(|v| v * 17));
            Some(Color::from_rgb_u8(c.next()??, c.next()??, c.next()??))
        }
        6 => Some(Color::from_rgb_u8(channel(&hex[0..2])?, channel(&hex[2..4])?, channel(&hex[4..6])?)),
        8 => Some(Color::from_argb_u8(
            channel(&hex[6..8])?,
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        _ => None,
    }
}
