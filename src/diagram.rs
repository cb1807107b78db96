use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a node in the diagram.
///
/// Node ids are plain strings so that seed files and canvas callbacks can use
/// whatever scheme they like ("1", "input", "node_7", ...).
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of an edge, derived from its endpoints when created by a connection.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(String);

impl EdgeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the id of the edge a connection would create:
    /// `edge-{source}{source_handle}-{target}{target_handle}`.
    pub fn for_connection(connection: &Connection) -> Self {
        Self(format!(
            "edge-{}{}-{}{}",
            connection.source,
            connection.source_handle.as_deref().unwrap_or(""),
            connection.target,
            connection.target_handle.as_deref().unwrap_or(""),
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for EdgeId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A point in diagram (world) coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct XYPosition {
    pub x: f32,
    pub y: f32,
}

impl XYPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Role of a node, which decides which handles the canvas draws on it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Source handle only
    Input,
    /// Both handles
    #[default]
    Default,
    /// Target handle only
    Output,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

/// A draggable labelled box in the diagram.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    pub data: NodeData,
    pub position: XYPosition,
    #[serde(default)]
    pub style: NodeStyle,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dragging: bool,
    /// Rendered size as measured by the canvas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f32>,
}

impl Node {
    /// Create a default-kind node with the given label at `position`.
    pub fn new(id: impl Into<NodeId>, label: impl Into<String>, position: XYPosition) -> Self {
        Self {
            id: id.into(),
            kind: NodeKind::Default,
            data: NodeData { label: label.into() },
            position,
            style: NodeStyle::default(),
            selected: false,
            dragging: false,
            width: None,
            height: None,
        }
    }

    pub fn with_kind(mut self, kind: NodeKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.style.background = Some(background.into());
        self
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }

    /// Background colour, or `""` when the node has none.
    pub fn background(&self) -> &str {
        self.style.background.as_deref().unwrap_or("")
    }
}

/// Arrow drawn at the end of an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerKind {
    Arrow,
    ArrowClosed,
}

/// Path style the canvas uses to route an edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Bezier curve
    #[default]
    Default,
    Straight,
    Step,
    SmoothStep,
}

/// A directed connection between two nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
    #[serde(default, with = "marker_end", skip_serializing_if = "Option::is_none")]
    pub marker_end: Option<MarkerKind>,
    #[serde(default)]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub selected: bool,
}

impl Edge {
    pub fn new(id: impl Into<EdgeId>, source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
            kind: EdgeKind::Default,
            marker_end: None,
            animated: false,
            selected: false,
        }
    }

    /// Build the plain edge a connection creates, with its derived id.
    pub fn from_connection(connection: &Connection) -> Self {
        Self {
            id: EdgeId::for_connection(connection),
            source: connection.source.clone(),
            target: connection.target.clone(),
            source_handle: connection.source_handle.clone(),
            target_handle: connection.target_handle.clone(),
            kind: EdgeKind::Default,
            marker_end: None,
            animated: false,
            selected: false,
        }
    }

    pub fn with_marker(mut self, marker: MarkerKind) -> Self {
        self.marker_end = Some(marker);
        self
    }

    pub fn animated(mut self, animated: bool) -> Self {
        self.animated = animated;
        self
    }

    /// True if this edge links the same handles as `connection`.
    pub fn joins(&self, connection: &Connection) -> bool {
        self.source == connection.source
            && self.target == connection.target
            && self.source_handle == connection.source_handle
            && self.target_handle == connection.target_handle
    }
}

/// Endpoints reported by the canvas when a connection drag completes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub source: NodeId,
    pub target: NodeId,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl Connection {
    pub fn new(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn with_handles(
        mut self,
        source_handle: Option<impl Into<String>>,
        target_handle: Option<impl Into<String>>,
    ) -> Self {
        self.source_handle = source_handle.map(Into::into);
        self.target_handle = target_handle.map(Into::into);
        self
    }
}

/// Common view over nodes and edges used by the change-application code.
pub trait DiagramElement: Clone {
    type Id: PartialEq + fmt::Debug;

    fn element_id(&self) -> &Self::Id;
    fn set_selected(&mut self, selected: bool);
}

impl DiagramElement for Node {
    type Id = NodeId;

    fn element_id(&self) -> &NodeId {
        &self.id
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

impl DiagramElement for Edge {
    type Id = EdgeId;

    fn element_id(&self) -> &EdgeId {
        &self.id
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }
}

/// Trait for nodes that can be moved (dragged) in the editor.
pub trait MovableNode {
    fn position(&self) -> XYPosition;
    fn set_position(&mut self, position: XYPosition);
}

impl MovableNode for Node {
    fn position(&self) -> XYPosition {
        self.position
    }

    fn set_position(&mut self, position: XYPosition) {
        self.position = position;
    }
}

/// `markerEnd` is written as `{"type": "arrowclosed"}`; `{"type": null}` means no marker.
mod marker_end {
    use super::MarkerKind;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Raw {
        #[serde(rename = "type", default)]
        kind: Option<MarkerKind>,
    }

    pub fn serialize<S: Serializer>(value: &Option<MarkerKind>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(kind) => Raw { kind: Some(*kind) }.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<MarkerKind>, D::Error> {
        Ok(Option::<Raw>::deserialize(deserializer)?.and_then(|raw| raw.kind))
    }
}
