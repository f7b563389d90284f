use crate::error::GraphError;
use crate::graph::{Connection, GraphStore, Node, NodeId, PositionResolver};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// A saved workflow, as exchanged with the storage collaborator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowRecord {
    pub name: String,
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
    pub execution_order: Vec<NodeId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    /// Captures the current graph and its execution order under `name`.
    pub fn capture(name: impl Into<String>, store: &GraphStore) -> Self {
        let now = Utc::now();
        let snapshot = store.snapshot();
        Self {
            name: name.into(),
            execution_order: store.execution_order(),
            nodes: snapshot.nodes,
            connections: snapshot.connections,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the stored order differs from the one the graph produces now.
    pub fn is_order_stale(&self) -> bool {
        let store = GraphStore::restore(self, PositionResolver::default());
        store.execution_order() != self.execution_order
    }
}

impl GraphStore {
    /// Rebuilds a store from a saved record.
    ///
    /// Nodes and connections keep their ids. Connections are replayed through
    /// validation, so a hand-edited record cannot break the store's
    /// invariants. Offending entries are skipped with a warning.
    pub fn restore(record: &WorkflowRecord, resolver: PositionResolver) -> GraphStore {
        let mut store = GraphStore::new(resolver);

        for node in &record.nodes {
            if let Err(e) = store.insert_node(node.clone()) {
                warn!(workflow = %record.name, error = %e, "skipping node");
            }
        }

        for connection in &record.connections {
            match store.insert_connection(connection.clone()) {
                Ok(committed) if committed.replaced.is_some() => {
                    warn!(
                        workflow = %record.name,
                        connection = %connection.id,
                        "connection displaced an earlier outgoing connection"
                    );
                }
                Ok(_) => {}
                Err(GraphError::ConnectionRejected(reason)) => {
                    warn!(
                        workflow = %record.name,
                        connection = %connection.id,
                        %reason,
                        "skipping invalid connection"
                    );
                }
                Err(e) => {
                    warn!(workflow = %record.name, error = %e, "skipping connection");
                }
            }
        }

        store
    }
}
