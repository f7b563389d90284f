use crate::graph::{ConnectionId, NodeId};
use std::fmt;
use thiserror::Error;

/// Why a proposed connection was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Source and target are the same node.
    SelfLoop,
    /// Output-to-output or input-to-input.
    TypeMismatch,
    /// The same (source, target) pair is already connected.
    Duplicate,
    /// One of the endpoints does not name a live node.
    UnknownNode,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop => write!(f, "Cannot connect a node to itself"),
            Self::TypeMismatch => write!(f, "Must connect an output to an input"),
            Self::Duplicate => write!(f, "Connection already exists"),
            Self::UnknownNode => write!(f, "Endpoint node does not exist"),
        }
    }
}

/// Errors returned by `GraphStore` mutations.
///
/// These are plain values: a failed mutation leaves the store untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node '{0}' not found")]
    NodeNotFound(NodeId),

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(ConnectionId),

    #[error("A node with id '{0}' already exists")]
    DuplicateNodeId(NodeId),

    #[error("A connection with id '{0}' already exists")]
    DuplicateConnectionId(ConnectionId),

    #[error("Connection rejected: {0}")]
    ConnectionRejected(RejectReason),
}

/// Errors that can occur while reading or writing a workflow library.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse workflow JSON: {0}")]
    Json(String),

    #[error("Workflow '{0}' not found in library")]
    WorkflowNotFound(String),
}

/// Errors that can occur while loading an `EngineConfig`.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
