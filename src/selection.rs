//! Selection-driven edit panels.
//!
//! Clicking a node or an edge captures it into a panel; the panel's form
//! fields are then bound to that element. Every field edit is pushed into the
//! store as an immutable replace of the captured element. Edits made while
//! nothing is captured only change the field.
//!
//! Node and edge panels are independent: capturing an edge leaves the node
//! panel as it was, and the other way round.

use crate::diagram::{Edge, EdgeId, EdgeKind, MarkerKind, Node, NodeId};
use crate::error::ParseOptionError;
use crate::store::DiagramStore;
use std::fmt;
use std::str::FromStr;

/// Node panel: label and background text inputs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeEditPanel {
    node_id: Option<NodeId>,
    label: String,
    background: String,
}

impl NodeEditPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `node` as the edit target and load its fields.
    pub fn capture(&mut self, node: &Node) {
        self.node_id = Some(node.id.clone());
        self.label = node.label().to_owned();
        self.background = node.background().to_owned();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn node_id(&self) -> Option<&NodeId> {
        self.node_id.as_ref()
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    /// Update the label field and the captured node's label.
    ///
    /// Returns `false` when no node is captured or it no longer exists.
    pub fn set_label(&mut self, value: impl Into<String>, store: &mut DiagramStore) -> bool {
        self.label = value.into();
        let Some(id) = &self.node_id else {
            return false;
        };
        let label = self.label.clone();
        store.replace_node(id, |node| node.data.label = label)
    }

    /// Update the background field and the captured node's style.
    ///
    /// An empty value removes the background.
    pub fn set_background(&mut self, value: impl Into<String>, store: &mut DiagramStore) -> bool {
        self.background = value.into();
        let Some(id) = &self.node_id else {
            return false;
        };
        let background = (!self.background.is_empty()).then(|| self.background.clone());
        store.replace_node(id, |node| node.style.background = background)
    }
}

/// Connector dropdown options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectorKind {
    #[default]
    None,
    ClosedArrow,
}

impl ConnectorKind {
    pub const OPTIONS: [ConnectorKind; 2] = [ConnectorKind::None, ConnectorKind::ClosedArrow];

    pub fn of_edge(edge: &Edge) -> Self {
        if edge.marker_end.is_some() {
            ConnectorKind::ClosedArrow
        } else {
            ConnectorKind::None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConnectorKind::None => "",
            ConnectorKind::ClosedArrow => "arrowclosed",
        }
    }
}

impl fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConnectorKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(ConnectorKind::None),
            "arrowclosed" => Ok(ConnectorKind::ClosedArrow),
            other => Err(ParseOptionError { field: "connector", value: other.to_owned() }),
        }
    }
}

/// Animation dropdown options. The two styles exclude each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationChoice {
    /// Animated, no marker
    Animated,
    /// Closed arrow marker, not animated
    ArrowClosed,
}

impl AnimationChoice {
    pub const OPTIONS: [AnimationChoice; 2] = [AnimationChoice::Animated, AnimationChoice::ArrowClosed];

    pub fn as_str(self) -> &'static str {
        match self {
            AnimationChoice::Animated => "animated",
            AnimationChoice::ArrowClosed => "arrowclosed",
        }
    }
}

impl fmt::Display for AnimationChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationChoice {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "animated" => Ok(AnimationChoice::Animated),
            "arrowclosed" => Ok(AnimationChoice::ArrowClosed),
            other => Err(ParseOptionError { field: "animation", value: other.to_owned() }),
        }
    }
}

impl EdgeKind {
    pub const OPTIONS: [EdgeKind; 4] = [EdgeKind::Default, EdgeKind::Straight, EdgeKind::Step, EdgeKind::SmoothStep];
}

pub(crate) fn edge_kind_name(kind: EdgeKind) -> &'static str {
    match kind {
        EdgeKind::Default => "default",
        EdgeKind::Straight => "straight",
        EdgeKind::Step => "step",
        EdgeKind::SmoothStep => "smoothstep",
    }
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(edge_kind_name(*self))
    }
}

impl FromStr for EdgeKind {
    type Err = ParseOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EdgeKind::OPTIONS
            .into_iter()
            .find(|kind| edge_kind_name(*kind) == s)
            .ok_or_else(|| ParseOptionError { field: "edge type", value: s.to_owned() })
    }
}

/// Edge panel: connector, animation and path style dropdowns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeStylePanel {
    edge_id: Option<EdgeId>,
    connector: ConnectorKind,
    animation: Option<AnimationChoice>,
    kind: EdgeKind,
}

impl EdgeStylePanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `edge` and derive the dropdown states from it.
    ///
    /// The animation dropdown shows `Animated` for animated edges and nothing otherwise.
    pub fn capture(&mut self, edge: &Edge) {
        self.edge_id = Some(edge.id.clone());
        self.connector = ConnectorKind::of_edge(edge);
        self.animation = edge.animated.then_some(AnimationChoice::Animated);
        self.kind = edge.kind;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn edge_id(&self) -> Option<&EdgeId> {
        self.edge_id.as_ref()
    }

    pub fn connector(&self) -> ConnectorKind {
        self.connector
    }

    pub fn animation(&self) -> Option<AnimationChoice> {
        self.animation
    }

    pub fn kind(&self) -> EdgeKind {
        self.kind
    }

    /// Choosing a closed arrow stops the animation; choosing none only drops the marker.
    pub fn set_connector(&mut self, connector: ConnectorKind, store: &mut DiagramStore) -> bool {
        self.connector = connector;
        if connector == ConnectorKind::ClosedArrow {
            self.animation = None;
        }
        self.push(store, move |edge| match connector {
            ConnectorKind::ClosedArrow => {
                edge.marker_end = Some(MarkerKind::ArrowClosed);
                edge.animated = false;
            }
            ConnectorKind::None => edge.marker_end = None,
        })
    }

    pub fn set_animation(&mut self, choice: AnimationChoice, store: &mut DiagramStore) -> bool {
        self.animation = Some(choice);
        self.connector = match choice {
            AnimationChoice::Animated => ConnectorKind::None,
            AnimationChoice::ArrowClosed => ConnectorKind::ClosedArrow,
        };
        self.push(store, move |edge| match choice {
            AnimationChoice::Animated => {
                edge.animated = true;
                edge.marker_end = None;
            }
            AnimationChoice::ArrowClosed => {
                edge.animated = false;
                edge.marker_end = Some(MarkerKind::ArrowClosed);
            }
        })
    }

    pub fn set_kind(&mut self, kind: EdgeKind, store: &mut DiagramStore) -> bool {
        self.kind = kind;
        self.push(store, move |edge| edge.kind = kind)
    }

    fn push(&self, store: &mut DiagramStore, f: impl FnOnce(&mut Edge)) -> bool {
        match &self.edge_id {
            Some(id) => store.replace_edge(id, f),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::XYPosition;
    use pretty_assertions::assert_eq;

    fn store() -> DiagramStore {
        DiagramStore::new(
            vec![
                Node::new("1", "A", XYPosition::new(0.0, 0.0)),
                Node::new("2", "B", XYPosition::new(0.0, 100.0)).with_background("#eee"),
            ],
            vec![
                Edge::new("e1-2", "1", "2").with_marker(MarkerKind::ArrowClosed),
                Edge::new("e2-1", "2", "1").animated(true),
            ],
        )
    }

    // ========================================================================
    // NodeEditPanel
    // ========================================================================

    #[test]
    fn test_capture_loads_fields() {
        let store = store();
        let mut panel = NodeEditPanel::new();
        panel.capture(store.node(&"2".into()).unwrap());

        assert_eq!(panel.node_id(), Some(&NodeId::from("2")));
        assert_eq!(panel.label(), "B");
        assert_eq!(panel.background(), "#eee");
    }

    #[test]
    fn test_set_label_updates_only_captured_node() {
        let mut store = store();
        let mut panel = NodeEditPanel::new();
        panel.capture(store.node(&"1".into()).unwrap());

        assert!(panel.set_label("Renamed", &mut store));
        assert_eq!(store.node(&"1".into()).unwrap().label(), "Renamed");
        assert_eq!(store.node(&"2".into()).unwrap().label(), "B");
    }

    #[test]
    fn test_set_label_without_capture_is_noop() {
        let mut store = store();
        let before = store.nodes().to_vec();
        let mut panel = NodeEditPanel::new();

        assert!(!panel.set_label("Nobody", &mut store));
        assert_eq!(panel.label(), "Nobody");
        assert_eq!(store.nodes(), before.as_slice());
    }

    #[test]
    fn test_set_background_empty_clears_style() {
        let mut store = store();
        let mut panel = NodeEditPanel::new();
        panel.capture(store.node(&"2".into()).unwrap());

        assert!(panel.set_background("red", &mut store));
        assert_eq!(store.node(&"2".into()).unwrap().background(), "red");
        assert!(panel.set_background("", &mut store));
        assert_eq!(store.node(&"2".into()).unwrap().style.background, None);
    }

    #[test]
    fn test_edit_after_node_removed_is_noop() {
        let mut store = store();
        let mut panel = NodeEditPanel::new();
        panel.capture(store.node(&"1".into()).unwrap());
        store.apply_node_changes(vec![crate::changes::NodeChange::Remove { id: "1".into() }]);

        assert!(!panel.set_label("Ghost", &mut store));
        assert_eq!(store.nodes().len(), 1);
    }

    // ========================================================================
    // EdgeStylePanel
    // ========================================================================

    #[test]
    fn test_capture_derives_dropdowns() {
        let store = store();
        let mut panel = EdgeStylePanel::new();

        panel.capture(store.edge(&"e1-2".into()).unwrap());
        assert_eq!(panel.connector(), ConnectorKind::ClosedArrow);
        assert_eq!(panel.animation(), None);

        panel.capture(store.edge(&"e2-1".into()).unwrap());
        assert_eq!(panel.connector(), ConnectorKind::None);
        assert_eq!(panel.animation(), Some(AnimationChoice::Animated));
    }

    #[test]
    fn test_animated_clears_marker() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        panel.capture(store.edge(&"e1-2".into()).unwrap());

        assert!(panel.set_animation(AnimationChoice::Animated, &mut store));
        let edge = store.edge(&"e1-2".into()).unwrap();
        assert!(edge.animated);
        assert_eq!(edge.marker_end, None);
        assert_eq!(panel.connector(), ConnectorKind::None);
    }

    #[test]
    fn test_closed_arrow_connector_clears_animation() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        panel.capture(store.edge(&"e2-1".into()).unwrap());

        assert!(panel.set_connector(ConnectorKind::ClosedArrow, &mut store));
        let edge = store.edge(&"e2-1".into()).unwrap();
        assert!(!edge.animated);
        assert_eq!(edge.marker_end, Some(MarkerKind::ArrowClosed));
        assert_eq!(panel.animation(), None);
    }

    #[test]
    fn test_connector_none_keeps_animation() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        panel.capture(store.edge(&"e2-1".into()).unwrap());

        assert!(panel.set_connector(ConnectorKind::None, &mut store));
        let edge = store.edge(&"e2-1".into()).unwrap();
        assert!(edge.animated);
        assert_eq!(edge.marker_end, None);
    }

    #[test]
    fn test_animation_arrow_closed_option() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        panel.capture(store.edge(&"e2-1".into()).unwrap());

        assert!(panel.set_animation(AnimationChoice::ArrowClosed, &mut store));
        let edge = store.edge(&"e2-1".into()).unwrap();
        assert!(!edge.animated);
        assert_eq!(edge.marker_end, Some(MarkerKind::ArrowClosed));
        assert_eq!(panel.connector(), ConnectorKind::ClosedArrow);
    }

    #[test]
    fn test_set_kind_leaves_other_edges() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        panel.capture(store.edge(&"e1-2".into()).unwrap());

        assert!(panel.set_kind(EdgeKind::Step, &mut store));
        assert_eq!(store.edge(&"e1-2".into()).unwrap().kind, EdgeKind::Step);
        assert_eq!(store.edge(&"e2-1".into()).unwrap().kind, EdgeKind::Default);
    }

    #[test]
    fn test_edge_edit_without_capture_is_noop() {
        let mut store = store();
        let mut panel = EdgeStylePanel::new();
        assert!(!panel.set_animation(AnimationChoice::Animated, &mut store));
        assert!(!store.edge(&"e1-2".into()).unwrap().animated);
    }

    // ========================================================================
    // Dropdown option parsing
    // ========================================================================

    #[test]
    fn test_option_strings() {
        assert_eq!("arrowclosed".parse::<ConnectorKind>(), Ok(ConnectorKind::ClosedArrow));
        assert_eq!("".parse::<ConnectorKind>(), Ok(ConnectorKind::None));
        assert_eq!("animated".parse::<AnimationChoice>(), Ok(AnimationChoice::Animated));
        assert_eq!("smoothstep".parse::<EdgeKind>(), Ok(EdgeKind::SmoothStep));
        assert_eq!(EdgeKind::Straight.to_string(), "straight");

        let err = "zigzag".parse::<EdgeKind>().unwrap_err();
        assert_eq!(err.field, "edge type");
        assert_eq!(err.value, "zigzag");
    }
}
