use super::ids::{ConnectionId, IdGenerator, NodeId};
use super::model::{
    AnchorRole, Connection, GraphSnapshot, Node, NodePatch, NodeSpec, Point, ProposedConnection,
};
use super::order::ExecutionOrderResolver;
use super::position::{Endpoints, PositionResolver};
use super::validator::{ConnectionValidator, Decision};
use crate::error::{GraphError, RejectReason};
use ahash::AHashMap;
use tracing::debug;

/// Incoming and outgoing connection ids of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Adjacency {
    pub incoming: Vec<ConnectionId>,
    pub outgoing: Vec<ConnectionId>,
}

/// A connection that was committed, and the one it displaced, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedConnection {
    pub id: ConnectionId,
    pub replaced: Option<ConnectionId>,
}

/// The canonical owner of all nodes and connections.
///
/// Every mutation leaves the store consistent before it returns:
/// - connection changes go through [`ConnectionValidator`]
/// - removing a node removes every connection touching it
/// - geometry changes recompute the anchors of every touching connection
///
/// Anchor coordinates are a derived cache, filled only by [`PositionResolver`].
#[derive(Debug)]
pub struct GraphStore {
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    adjacency: AHashMap<NodeId, Adjacency>,
    anchors: AHashMap<ConnectionId, Endpoints>,
    resolver: PositionResolver,
    validator: ConnectionValidator,
    ids: IdGenerator,
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new(PositionResolver::default())
    }
}

impl GraphStore {
    pub fn new(resolver: PositionResolver) -> Self {
        Self {
            nodes: Vec::new(),
            connections: Vec::new(),
            adjacency: AHashMap::new(),
            anchors: AHashMap::new(),
            resolver,
            validator: ConnectionValidator,
            ids: IdGenerator::new(),
        }
    }

    // --- Nodes ---

    /// Creates a node with a freshly generated id.
    pub fn add_node(&mut self, spec: NodeSpec) -> NodeId {
        // Restored nodes may carry ids from an earlier generator.
        let mut id = self.ids.next_node_id();
        while self.adjacency.contains_key(&id) {
            id = self.ids.next_node_id();
        }
        self.push_node(spec.into_node(id.clone()));
        id
    }

    /// Inserts a node with a caller-chosen id, e.g. when restoring a saved workflow.
    pub fn insert_node(&mut self, node: Node) -> Result<(), GraphError> {
        if self.adjacency.contains_key(&node.id) {
            return Err(GraphError::DuplicateNodeId(node.id));
        }
        self.push_node(node);
        Ok(())
    }

    fn push_node(&mut self, node: Node) {
        debug!(node = %node.id, title = %node.title, "node added");
        self.adjacency.insert(node.id.clone(), Adjacency::default());
        self.nodes.push(node);
    }

    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) -> Result<(), GraphError> {
        let node = self
            .nodes
            .iter_mut()
            .find(|n| &n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;

        let geometry_changed = patch.touches_geometry();
        if let Some(position) = patch.position {
            node.position = position;
        }
        if let Some(size) = patch.size {
            node.size = size;
        }
        if let Some(collapsed) = patch.collapsed {
            node.collapsed = collapsed;
        }
        if let Some(title) = patch.title {
            node.title = title;
        }
        if let Some(category) = patch.category {
            node.category = category;
        }

        if geometry_changed {
            self.refresh_anchors_of(id);
        }
        Ok(())
    }

    /// Flips the collapsed flag and returns the new value.
    pub fn toggle_collapsed(&mut self, id: &NodeId) -> Result<bool, GraphError> {
        let collapsed = !self
            .node(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?
            .collapsed;
        self.update_node(id, NodePatch::collapsed(collapsed))?;
        Ok(collapsed)
    }

    /// Removes a node together with every connection touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let index = self
            .nodes
            .iter()
            .position(|n| &n.id == id)
            .ok_or_else(|| GraphError::NodeNotFound(id.clone()))?;

        let adjacency = self.adjacency.remove(id).unwrap_or_default();
        for conn_id in adjacency.incoming.iter().chain(&adjacency.outgoing) {
            self.detach_connection(conn_id);
        }

        let node = self.nodes.remove(index);
        debug!(
            node = %node.id,
            dropped_connections = adjacency.incoming.len() + adjacency.outgoing.len(),
            "node removed"
        );
        Ok(node)
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Canvas-space anchor of a live node.
    pub fn anchor_for(&self, id: &NodeId, role: AnchorRole) -> Option<Point> {
        self.node(id).map(|n| self.resolver.anchor_for(n, role))
    }

    // --- Connections ---

    /// Connects `source`'s output to `target`'s input.
    pub fn add_connection(
        &mut self,
        source: &NodeId,
        target: &NodeId,
    ) -> Result<ConnectionId, GraphError> {
        let proposed = ProposedConnection::between(source.clone(), target.clone());
        self.propose_connection(&proposed).map(|committed| committed.id)
    }

    /// Validates a connection gesture and applies the decision.
    pub fn propose_connection(
        &mut self,
        proposed: &ProposedConnection,
    ) -> Result<CommittedConnection, GraphError> {
        self.commit(proposed, None)
    }

    /// Validates and inserts a connection that already carries an id, e.g.
    /// when restoring a saved workflow.
    pub fn insert_connection(
        &mut self,
        connection: Connection,
    ) -> Result<CommittedConnection, GraphError> {
        if self.anchors.contains_key(&connection.id) {
            return Err(GraphError::DuplicateConnectionId(connection.id));
        }
        let proposed =
            ProposedConnection::between(connection.source_node_id, connection.target_node_id);
        self.commit(&proposed, Some(connection.id))
    }

    fn commit(
        &mut self,
        proposed: &ProposedConnection,
        id: Option<ConnectionId>,
    ) -> Result<CommittedConnection, GraphError> {
        let replaced = match self
            .validator
            .validate(proposed, &self.nodes, &self.connections)
        {
            Decision::Reject(reason) => {
                debug!(from = %proposed.from.node_id, to = %proposed.to.node_id, %reason, "connection rejected");
                return Err(GraphError::ConnectionRejected(reason));
            }
            Decision::Accept => None,
            Decision::AcceptReplacing(old) => Some(old),
        };

        // An accepted proposal always normalizes.
        let Some((source, target)) = proposed.normalized() else {
            return Err(GraphError::ConnectionRejected(RejectReason::TypeMismatch));
        };
        let id = match id {
            Some(id) => id,
            None => {
                let mut id = self.ids.next_connection_id();
                while self.anchors.contains_key(&id) {
                    id = self.ids.next_connection_id();
                }
                id
            }
        };
        let connection = Connection {
            id,
            source_node_id: source.clone(),
            target_node_id: target.clone(),
        };

        if let Some(old) = &replaced {
            self.detach_connection(old);
            debug!(replaced = %old, "outgoing connection replaced");
        }
        let id = connection.id.clone();
        self.attach_connection(connection);

        Ok(CommittedConnection { id, replaced })
    }

    pub fn remove_connection(&mut self, id: &ConnectionId) -> Result<Connection, GraphError> {
        self.detach_connection(id)
            .ok_or_else(|| GraphError::ConnectionNotFound(id.clone()))
    }

    pub fn connection(&self, id: &ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| &c.id == id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn adjacency(&self, id: &NodeId) -> Option<&Adjacency> {
        self.adjacency.get(id)
    }

    pub fn incoming(&self, id: &NodeId) -> impl Iterator<Item = &Connection> + '_ {
        let id = id.clone();
        self.connections
            .iter()
            .filter(move |c| c.target_node_id == id)
    }

    pub fn outgoing(&self, id: &NodeId) -> impl Iterator<Item = &Connection> + '_ {
        let id = id.clone();
        self.connections
            .iter()
            .filter(move |c| c.source_node_id == id)
    }

    /// Resolved anchors of a connection, as last derived from node geometry.
    pub fn endpoints(&self, id: &ConnectionId) -> Option<Endpoints> {
        self.anchors.get(id).copied()
    }

    // --- Whole graph ---

    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            connections: self.connections.clone(),
        }
    }

    pub fn execution_order(&self) -> Vec<NodeId> {
        ExecutionOrderResolver.resolve(&self.nodes, &self.connections)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.connections.clear();
        self.adjacency.clear();
        self.anchors.clear();
    }

    pub fn resolver(&self) -> &PositionResolver {
        &self.resolver
    }

    // --- Internals ---

    fn attach_connection(&mut self, connection: Connection) {
        if let Some(adj) = self.adjacency.get_mut(&connection.source_node_id) {
            adj.outgoing.push(connection.id.clone());
        }
        if let Some(adj) = self.adjacency.get_mut(&connection.target_node_id) {
            adj.incoming.push(connection.id.clone());
        }
        let endpoints = self.resolver.connection_endpoints(&connection, &self.nodes);
        self.anchors.insert(connection.id.clone(), endpoints);
        debug!(
            connection = %connection.id,
            source = %connection.source_node_id,
            target = %connection.target_node_id,
            "connection added"
        );
        self.connections.push(connection);
    }

    fn detach_connection(&mut self, id: &ConnectionId) -> Option<Connection> {
        let index = self.connections.iter().position(|c| &c.id == id)?;
        let connection = self.connections.remove(index);
        for node_id in [&connection.source_node_id, &connection.target_node_id] {
            if let Some(adj) = self.adjacency.get_mut(node_id) {
                adj.incoming.retain(|c| c != id);
                adj.outgoing.retain(|c| c != id);
            }
        }
        self.anchors.remove(id);
        debug!(connection = %id, "connection removed");
        Some(connection)
    }

    fn refresh_anchors_of(&mut self, id: &NodeId) {
        let Some(adj) = self.adjacency.get(id) else {
            return;
        };
        for conn_id in adj.incoming.iter().chain(&adj.outgoing) {
            if let Some(connection) = self.connections.iter().find(|c| &c.id == conn_id) {
                let endpoints = self.resolver.connection_endpoints(connection, &self.nodes);
                self.anchors.insert(conn_id.clone(), endpoints);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(names: &[&str]) -> (GraphStore, Vec<NodeId>) {
        let mut store = GraphStore::default();
        let ids = names
            .iter()
            .map(|name| store.add_node(NodeSpec::prompt(*name, "")))
            .collect();
        (store, ids)
    }

    #[test]
    fn adjacency_tracks_both_directions() {
        let (mut store, ids) = store_with(&["a", "b"]);
        let conn = store.add_connection(&ids[0], &ids[1]).unwrap();
        assert_eq!(store.adjacency(&ids[0]).unwrap().outgoing, vec![conn.clone()]);
        assert_eq!(store.adjacency(&ids[1]).unwrap().incoming, vec![conn]);
    }

    #[test]
    fn replacement_updates_adjacency() {
        let (mut store, ids) = store_with(&["a", "b", "c"]);
        let first = store.add_connection(&ids[0], &ids[1]).unwrap();
        let second = store.add_connection(&ids[0], &ids[2]).unwrap();

        assert!(store.connection(&first).is_none());
        assert!(store.endpoints(&first).is_none());
        assert!(store.adjacency(&ids[1]).unwrap().incoming.is_empty());
        assert_eq!(store.adjacency(&ids[0]).unwrap().outgoing, vec![second]);
    }

    #[test]
    fn rejected_connection_leaves_store_untouched() {
        let (mut store, ids) = store_with(&["a"]);
        let result = store.add_connection(&ids[0], &ids[0]);
        assert_eq!(result, Err(GraphError::ConnectionRejected(RejectReason::SelfLoop)));
        assert!(store.connections().is_empty());
        assert!(store.adjacency(&ids[0]).unwrap().outgoing.is_empty());
    }

    #[test]
    fn insert_node_refuses_duplicate_ids() {
        let (mut store, ids) = store_with(&["a"]);
        let clone = store.node(&ids[0]).unwrap().clone();
        assert_eq!(
            store.insert_node(clone),
            Err(GraphError::DuplicateNodeId(ids[0].clone()))
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn toggle_collapsed_moves_anchor_to_header() {
        let (mut store, ids) = store_with(&["a", "b"]);
        let conn = store.add_connection(&ids[0], &ids[1]).unwrap();
        assert!(store.toggle_collapsed(&ids[0]).unwrap());
        let (from, _) = store.endpoints(&conn).unwrap().resolved().unwrap();
        assert_eq!(from, Point::new(300.0, 30.0));
    }

    #[test]
    fn clear_empties_everything() {
        let (mut store, ids) = store_with(&["a", "b"]);
        store.add_connection(&ids[0], &ids[1]).unwrap();
        store.clear();
        assert!(store.is_empty());
        assert!(store.connections().is_empty());
        assert!(!store.contains_node(&ids[0]));
    }
}
