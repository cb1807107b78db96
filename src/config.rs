//! Editor settings and the seed diagram.

use crate::diagram::{Edge, Node};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const INITIAL_DIAGRAM: &str = include_str!("initial_diagram.json");

/// Tunables for the add-node button and connection rules.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Label given to nodes created by the add button
    pub added_node_label: String,
    /// X coordinate of every added node
    pub added_node_x: f32,
    /// Vertical distance between consecutive added nodes
    pub added_node_y_step: f32,
    pub node_id_prefix: String,
    /// Reject edges from a node to itself
    pub reject_self_loops: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            added_node_label: "Added node".to_owned(),
            added_node_x: 100.0,
            added_node_y_step: 30.0,
            node_id_prefix: "node".to_owned(),
            reject_self_loops: false,
        }
    }
}

impl EditorConfig {
    /// Parse a config; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Nodes and edges the editor starts with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagram {
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl Diagram {
    /// The built-in seed: an input, a default and an output node chained by two edges.
    pub fn initial() -> Self {
        match Self::from_json_str(INITIAL_DIAGRAM) {
            Ok(diagram) => diagram,
            Err(err) => {
                log::error!("built-in diagram is invalid: {err}");
                Self::default()
            }
        }
    }

    /// Parse and check a diagram.
    ///
    /// Duplicate node ids are an error. Edges pointing at unknown nodes are kept
    /// and only logged.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let diagram: Diagram = serde_json::from_str(json)?;
        diagram.check()?;
        Ok(diagram)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn check(&self) -> Result<(), ConfigError> {
        let mut ids = HashSet::new();
        for node in &self.nodes {
            if !ids.insert(&node.id) {
                return Err(ConfigError::DuplicateNodeId(node.id.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !ids.contains(endpoint) {
                    log::warn!("edge {} references unknown node {}", edge.id, endpoint);
                }
            }
        }
        Ok(())
    }
}
