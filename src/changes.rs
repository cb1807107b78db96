//! Structural change descriptors emitted by the canvas.
//!
//! The canvas never edits the diagram directly. It reports what the user did
//! (moved a node, toggled a selection, pressed delete) as a batch of changes,
//! and the store folds the batch into a fresh collection with
//! [`apply_node_changes`] / [`apply_edge_changes`].
//!
//! Both functions leave their input slice untouched and return the next
//! collection. Changes naming an unknown id are ignored.

use crate::diagram::{DiagramElement, Edge, EdgeId, MovableNode, Node, NodeId, XYPosition};

/// A single change to the node collection.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeChange {
    /// The node was moved; `position` is `None` for drag start/stop notifications.
    Position {
        id: NodeId,
        position: Option<XYPosition>,
        dragging: Option<bool>,
    },
    /// The canvas measured the rendered node.
    Dimensions { id: NodeId, width: f32, height: f32 },
    Select { id: NodeId, selected: bool },
    Remove { id: NodeId },
    Add { node: Node },
    /// Replace the whole collection with every `Reset` node of the batch.
    Reset { node: Node },
}

/// A single change to the edge collection.
#[derive(Clone, Debug, PartialEq)]
pub enum EdgeChange {
    Select { id: EdgeId, selected: bool },
    Remove { id: EdgeId },
    Add { edge: Edge },
    /// Replace the whole collection with every `Reset` edge of the batch.
    Reset { edge: Edge },
}

/// What a change does to an existing collection, whether it targets a node or an edge.
enum Step<T: DiagramElement> {
    Update(T::Id, Box<dyn FnOnce(&mut T)>),
    Remove(T::Id),
    Add(T),
}

/// A change batch split into its reset items and its incremental steps.
struct Batch<T: DiagramElement> {
    resets: Vec<T>,
    steps: Vec<Step<T>>,
}

impl<T> Batch<T>
where
    T: DiagramElement + 'static,
{
    fn new() -> Self {
        Self { resets: Vec::new(), steps: Vec::new() }
    }

    /// Any reset in the batch replaces the collection; the other steps are dropped.
    fn apply(self, items: &[T]) -> Vec<T> {
        if !self.resets.is_empty() {
            let mut next = Vec::with_capacity(self.resets.len());
            for item in self.resets {
                push_unique(&mut next, item);
            }
            return next;
        }

        let mut next = items.to_vec();
        let mut added = Vec::new();
        for step in self.steps {
            match step {
                Step::Update(id, update) => match next.iter_mut().find(|i| *i.element_id() == id) {
                    Some(item) => update(item),
                    None => log::trace!("ignoring change for unknown element {:?}", id),
                },
                Step::Remove(id) => next.retain(|i| *i.element_id() != id),
                Step::Add(item) => {
                    if contains(&next, item.element_id()) {
                        log::trace!("ignoring add of existing element {:?}", item.element_id());
                    } else {
                        push_unique(&mut added, item);
                    }
                }
            }
        }
        next.extend(added);
        next
    }
}

fn contains<T: DiagramElement>(items: &[T], id: &T::Id) -> bool {
    items.iter().any(|i| i.element_id() == id)
}

/// Push `item` unless an element with its id is already there.
fn push_unique<T: DiagramElement>(items: &mut Vec<T>, item: T) {
    if contains(items, item.element_id()) {
        log::trace!("ignoring duplicate element {:?}", item.element_id());
    } else {
        items.push(item);
    }
}

fn update<T, F>(id: T::Id, f: F) -> Step<T>
where
    T: DiagramElement,
    F: FnOnce(&mut T) + 'static,
{
    Step::Update(id, Box::new(f))
}

/// Fold a batch of node changes into a new node collection.
///
/// Adds and resets whose id is already taken are dropped, so node ids stay unique.
pub fn apply_node_changes(changes: Vec<NodeChange>, nodes: &[Node]) -> Vec<Node> {
    let mut batch: Batch<Node> = Batch::new();
    for change in changes {
        let step: Step<Node> = match change {
            NodeChange::Position { id, position, dragging } => update(id, move |node: &mut Node| {
                if let Some(position) = position {
                    node.set_position(position);
                }
                if let Some(dragging) = dragging {
                    node.dragging = dragging;
                }
            }),
            NodeChange::Dimensions { id, width, height } => update(id, move |node: &mut Node| {
                node.width = Some(width);
                node.height = Some(height);
            }),
            NodeChange::Select { id, selected } => {
                update(id, move |node: &mut Node| node.set_selected(selected))
            }
            NodeChange::Remove { id } => Step::Remove(id),
            NodeChange::Add { node } => Step::Add(node),
            NodeChange::Reset { node } => {
                batch.resets.push(node);
                continue;
            }
        };
        batch.steps.push(step);
    }
    batch.apply(nodes)
}

/// Fold a batch of edge changes into a new edge collection.
pub fn apply_edge_changes(changes: Vec<EdgeChange>, edges: &[Edge]) -> Vec<Edge> {
    let mut batch: Batch<Edge> = Batch::new();
    for change in changes {
        let step: Step<Edge> = match change {
            EdgeChange::Select { id, selected } => {
                update(id, move |edge: &mut Edge| edge.set_selected(selected))
            }
            EdgeChange::Remove { id } => Step::Remove(id),
            EdgeChange::Add { edge } => Step::Add(edge),
            EdgeChange::Reset { edge } => {
                batch.resets.push(edge);
                continue;
            }
        };
        batch.steps.push(step);
    }
    batch.apply(edges)
}
