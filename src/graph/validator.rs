use super::ids::{ConnectionId, NodeId};
use super::model::{Connection, Node, ProposedConnection};
use crate::error::RejectReason;

/// Outcome of validating a proposed connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Commit the connection.
    Accept,
    /// Drop the gesture; nothing changes.
    Reject(RejectReason),
    /// Commit the connection and remove the existing outgoing connection
    /// of the same source in the same step.
    AcceptReplacing(ConnectionId),
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Decision::Reject(_))
    }
}

/// Decides whether a connection gesture may be committed.
///
/// Validation has no side effects; the caller applies the decision.
/// Rules are checked in order:
/// 1. same node on both ends -> `SelfLoop`
/// 2. both ends share a role -> `TypeMismatch`
/// 3. an endpoint is not a live node -> `UnknownNode`
/// 4. the (source, target) pair already exists -> `Duplicate`
/// 5. the source already has an outgoing connection -> `AcceptReplacing`
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectionValidator;

impl ConnectionValidator {
    pub fn validate(
        &self,
        proposed: &ProposedConnection,
        nodes: &[Node],
        connections: &[Connection],
    ) -> Decision {
        if proposed.from.node_id == proposed.to.node_id {
            return Decision::Reject(RejectReason::SelfLoop);
        }

        let Some((source, target)) = proposed.normalized() else {
            return Decision::Reject(RejectReason::TypeMismatch);
        };

        let exists = |id: &NodeId| nodes.iter().any(|n| &n.id == id);
        if !exists(source) || !exists(target) {
            return Decision::Reject(RejectReason::UnknownNode);
        }

        if connections
            .iter()
            .any(|c| &c.source_node_id == source && &c.target_node_id == target)
        {
            return Decision::Reject(RejectReason::Duplicate);
        }

        match connections.iter().find(|c| &c.source_node_id == source) {
            Some(existing) => Decision::AcceptReplacing(existing.id.clone()),
            None => Decision::Accept,
        }
    }
}
