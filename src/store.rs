use crate::changes::{self, EdgeChange, NodeChange};
use crate::diagram::{Connection, Edge, EdgeId, Node, NodeId};
use crate::error::ConnectError;
use crate::models::{ConcreteModelSyncer, ModelSyncer};
use crate::validation::{validate_connection, CompositeValidator, ConnectionValidator};
use slint::VecModel;
use std::rc::Rc;

/// Owner of the node and edge collections.
///
/// Every mutation builds a new collection and swaps it in, then pushes it to
/// any bound row model. Lookups that miss are silent no-ops.
pub struct DiagramStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    validator: Box<dyn ConnectionValidator>,
    node_syncer: Option<Box<dyn ModelSyncer<Node>>>,
    edge_syncer: Option<Box<dyn ModelSyncer<Edge>>>,
}

impl Default for DiagramStore {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new())
    }
}

impl DiagramStore {
    /// Create a store with the standard connection rules.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        Self::with_validator(nodes, edges, CompositeValidator::standard())
    }

    pub fn with_validator<V>(nodes: Vec<Node>, edges: Vec<Edge>, validator: V) -> Self
    where
        V: ConnectionValidator + 'static,
    {
        Self {
            nodes,
            edges,
            validator: Box::new(validator),
            node_syncer: None,
            edge_syncer: None,
        }
    }

    pub fn set_validator<V: ConnectionValidator + 'static>(&mut self, validator: V) {
        self.validator = Box::new(validator);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| &e.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    /// Mirror the node collection into `model`, one row per node.
    ///
    /// The model is filled immediately and kept in sync from then on.
    pub fn bind_node_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + PartialEq + 'static,
        F: Fn(&Node) -> P + 'static,
    {
        let syncer: Box<dyn ModelSyncer<Node>> = Box::new(ConcreteModelSyncer::new(model, constructor));
        syncer.sync(&self.nodes);
        self.node_syncer = Some(syncer);
    }

    /// Mirror the edge collection into `model`, one row per edge.
    pub fn bind_edge_model<P, F>(&mut self, model: Rc<VecModel<P>>, constructor: F)
    where
        P: Clone + PartialEq + 'static,
        F: Fn(&Edge) -> P + 'static,
    {
        let syncer: Box<dyn ModelSyncer<Edge>> = Box::new(ConcreteModelSyncer::new(model, constructor));
        syncer.sync(&self.edges);
        self.edge_syncer = Some(syncer);
    }

    fn set_nodes(&mut self, nodes: Vec<Node>) {
        self.nodes = nodes;
        if let Some(syncer) = &self.node_syncer {
            syncer.sync(&self.nodes);
        }
    }

    fn set_edges(&mut self, edges: Vec<Edge>) {
        self.edges = edges;
        if let Some(syncer) = &self.edge_syncer {
            syncer.sync(&self.edges);
        }
    }

    pub fn apply_node_changes(&mut self, changes: Vec<NodeChange>) {
        if changes.is_empty() {
            return;
        }
        log::trace!("applying {} node change(s)", changes.len());
        let next = changes::apply_node_changes(changes, &self.nodes);
        self.set_nodes(next);
    }

    pub fn apply_edge_changes(&mut self, changes: Vec<EdgeChange>) {
        if changes.is_empty() {
            return;
        }
        log::trace!("applying {} edge change(s)", changes.len());
        let next = changes::apply_edge_changes(changes, &self.edges);
        self.set_edges(next);
    }

    /// Replace the node `id` with a modified copy.
    ///
    /// Returns `false` (and leaves the collection alone) if no node matches.
    pub fn replace_node(&mut self, id: &NodeId, f: impl FnOnce(&mut Node)) -> bool {
        let Some(index) = self.nodes.iter().position(|n| &n.id == id) else {
            return false;
        };
        let mut next = self.nodes.clone();
        f(&mut next[index]);
        self.set_nodes(next);
        true
    }

    /// Replace the edge `id` with a modified copy.
    pub fn replace_edge(&mut self, id: &EdgeId, f: impl FnOnce(&mut Edge)) -> bool {
        let Some(index) = self.edges.iter().position(|e| &e.id == id) else {
            return false;
        };
        let mut next = self.edges.clone();
        f(&mut next[index]);
        self.set_edges(next);
        true
    }

    /// Append `node`. Returns `false` (and adds nothing) if its id is taken.
    pub fn add_node(&mut self, node: Node) -> bool {
        if self.contains_node(&node.id) {
            log::debug!("node {} already exists", node.id);
            return false;
        }
        self.apply_node_changes(vec![NodeChange::Add { node }]);
        true
    }

    /// Remove the edge `id`. Returns whether it existed.
    pub fn remove_edge(&mut self, id: &EdgeId) -> bool {
        if self.edge(id).is_none() {
            return false;
        }
        self.apply_edge_changes(vec![EdgeChange::Remove { id: id.clone() }]);
        true
    }

    /// Append the edge described by `connection`.
    ///
    /// The connection must pass the store's validator (by default both
    /// endpoints exist and no edge already joins the same handles), and its
    /// derived id must be free.
    pub fn connect(&mut self, connection: Connection) -> Result<EdgeId, ConnectError> {
        validate_connection(&connection, &self.nodes, &self.edges, None, self.validator.as_ref())
            .into_result()?;
        let edge = Edge::from_connection(&connection);
        // Different handles can still derive the same id
        if self.edge(&edge.id).is_some() {
            return Err(ConnectError::Duplicate(edge.id));
        }
        let id = edge.id.clone();
        self.apply_edge_changes(vec![EdgeChange::Add { edge }]);
        Ok(id)
    }

    /// Move the edge `old` onto the endpoints of `connection`.
    ///
    /// The edge keeps its place in the collection and its styling; its id is
    /// re-derived from the new endpoints.
    pub fn update_edge(&mut self, old: &EdgeId, connection: Connection) -> Result<EdgeId, ConnectError> {
        if self.edge(old).is_none() {
            return Err(ConnectError::EdgeNotFound(old.clone()));
        }
        validate_connection(&connection, &self.nodes, &self.edges, Some(old), self.validator.as_ref())
            .into_result()?;
        let id = EdgeId::for_connection(&connection);
        if id != *old && self.edge(&id).is_some() {
            return Err(ConnectError::Duplicate(id));
        }
        let new_id = id.clone();
        self.replace_edge(old, move |edge| {
            edge.id = new_id;
            edge.source = connection.source;
            edge.target = connection.target;
            edge.source_handle = connection.source_handle;
            edge.target_handle = connection.target_handle;
        });
        Ok(id)
    }
}
