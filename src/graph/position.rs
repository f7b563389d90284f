use super::model::{AnchorRole, Connection, Node, Point};
use serde::Serialize;
use tracing::warn;

/// Resolved canvas-space endpoints of a connection.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Endpoints {
    Resolved { from: Point, to: Point },
    /// One of the endpoint nodes is missing. Renderers skip these.
    Unresolved,
}

impl Endpoints {
    pub fn resolved(&self) -> Option<(Point, Point)> {
        match *self {
            Endpoints::Resolved { from, to } => Some((from, to)),
            Endpoints::Unresolved => None,
        }
    }
}

/// Derives anchor coordinates from node geometry.
///
/// Anchors sit on the vertical middle of the left (input) and right (output)
/// edges. A collapsed node only shows its header row, so its anchors use a
/// fixed offset from the top instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionResolver {
    collapsed_offset: f64,
}

impl Default for PositionResolver {
    fn default() -> Self {
        Self::new(crate::config::EngineConfig::default().collapsed_anchor_offset)
    }
}

impl PositionResolver {
    pub fn new(collapsed_offset: f64) -> Self {
        Self { collapsed_offset }
    }

    pub fn anchor_for(&self, node: &Node, role: AnchorRole) -> Point {
        let dy = if node.collapsed {
            self.collapsed_offset
        } else {
            node.size.height / 2.0
        };
        let x = match role {
            AnchorRole::Input => node.position.x,
            AnchorRole::Output => node.position.x + node.size.width,
        };
        Point::new(x, node.position.y + dy)
    }

    pub fn connection_endpoints(&self, connection: &Connection, nodes: &[Node]) -> Endpoints {
        let source = nodes.iter().find(|n| n.id == connection.source_node_id);
        let target = nodes.iter().find(|n| n.id == connection.target_node_id);

        match (source, target) {
            (Some(source), Some(target)) => Endpoints::Resolved {
                from: self.anchor_for(source, AnchorRole::Output),
                to: self.anchor_for(target, AnchorRole::Input),
            },
            _ => {
                warn!(
                    connection = %connection.id,
                    source = %connection.source_node_id,
                    target = %connection.target_node_id,
                    "connection references a missing node, skipping"
                );
                Endpoints::Unresolved
            }
        }
    }
}
