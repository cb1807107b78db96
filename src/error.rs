use crate::diagram::{EdgeId, NodeId};
use std::path::PathBuf;
use thiserror::Error;

/// Reasons a connection (new or reconnected edge) is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectError {
    /// An endpoint does not name an existing node
    #[error("node {0} does not exist")]
    MissingEndpoint(NodeId),
    /// An edge between these handles already exists
    #[error("edge {0} already links these handles")]
    Duplicate(EdgeId),
    #[error("cannot connect node {0} to itself")]
    SelfLoop(NodeId),
    /// The edge being reconnected is gone
    #[error("edge {0} not found")]
    EdgeNotFound(EdgeId),
    #[error("{0}")]
    Custom(String),
}

/// Errors from loading an editor configuration or seed diagram.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid diagram json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("node id {0} is used more than once")]
    DuplicateNodeId(NodeId),
}

/// A form dropdown received a value outside its option list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {field} option {value:?}")]
pub struct ParseOptionError {
    pub field: &'static str,
    pub value: String,
}
