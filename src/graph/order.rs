use super::ids::NodeId;
use super::model::{Connection, Node};
use ahash::{AHashMap, AHashSet};
use tracing::warn;

/// Computes a linear execution order for a workflow graph.
///
/// Every node appears exactly once. Before a node is emitted, all nodes that
/// feed into it are emitted (depth-first post-order over incoming edges).
/// Traversal is seeded from root nodes (no incoming connection), then from
/// any node still unvisited, in insertion order.
///
/// Cycles are tolerated: the visited set guarantees termination, but the
/// relative order of nodes on a cycle is not dependency-correct.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionOrderResolver;

impl ExecutionOrderResolver {
    pub fn resolve(&self, nodes: &[Node], connections: &[Connection]) -> Vec<NodeId> {
        let live: AHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        // target -> sources, in connection order
        let mut feeders: AHashMap<&str, Vec<&str>> = AHashMap::with_capacity(nodes.len());
        for connection in connections {
            let source = connection.source_node_id.as_str();
            let target = connection.target_node_id.as_str();
            if !live.contains(source) || !live.contains(target) {
                warn!(
                    connection = %connection.id,
                    "connection references a missing node, ignored for ordering"
                );
                continue;
            }
            feeders.entry(target).or_default().push(source);
        }

        let mut order = Vec::with_capacity(nodes.len());
        let mut visited: AHashSet<&str> = AHashSet::with_capacity(nodes.len());

        let roots = nodes
            .iter()
            .map(|n| n.id.as_str())
            .filter(|id| !feeders.contains_key(id));
        for root in roots {
            Self::visit(root, &feeders, &mut visited, &mut order);
        }
        for node in nodes {
            Self::visit(node.id.as_str(), &feeders, &mut visited, &mut order);
        }

        order
    }

    /// Iterative post-order walk over incoming edges starting at `start`.
    fn visit<'a>(
        start: &'a str,
        feeders: &AHashMap<&'a str, Vec<&'a str>>,
        visited: &mut AHashSet<&'a str>,
        order: &mut Vec<NodeId>,
    ) {
        if !visited.insert(start) {
            return;
        }
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            let deps = feeders.get(node).map(Vec::as_slice).unwrap_or(&[]);
            if next < deps.len() {
                top.1 += 1;
                let dep = deps[next];
                if visited.insert(dep) {
                    stack.push((dep, 0));
                }
            } else {
                stack.pop();
                order.push(NodeId::from(node));
            }
        }
    }
}
