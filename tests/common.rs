//! Common test utilities for building workflow graphs.
use promptflow::prelude::*;

/// Two prompt nodes side by side, the layout used by most scenarios.
///
/// A sits at `(0,0)` and B at `(400,0)`, both `300x200`.
#[allow(dead_code)]
pub fn create_pair() -> (GraphStore, NodeId, NodeId) {
    let mut store = GraphStore::default();
    let a = store.add_node(NodeSpec::prompt("A", "first").at(0.0, 0.0));
    let b = store.add_node(NodeSpec::prompt("B", "second").at(400.0, 0.0));
    (store, a, b)
}

/// A store with one prompt node per title, laid out in a row.
#[allow(dead_code)]
pub fn create_nodes(titles: &[&str]) -> (GraphStore, Vec<NodeId>) {
    let mut store = GraphStore::default();
    let ids = titles
        .iter()
        .enumerate()
        .map(|(i, title)| store.add_node(NodeSpec::prompt(*title, "").at(i as f64 * 400.0, 0.0)))
        .collect();
    (store, ids)
}

/// A -> B -> C plus an isolated D.
#[allow(dead_code)]
pub fn create_chain_with_island() -> (GraphStore, Vec<NodeId>) {
    let (mut store, ids) = create_nodes(&["A", "B", "C", "D"]);
    store.add_connection(&ids[0], &ids[1]).unwrap();
    store.add_connection(&ids[1], &ids[2]).unwrap();
    (store, ids)
}

/// An editor whose catalogue has a few prompts next to the stock data sources.
#[allow(dead_code)]
pub fn create_editor() -> WorkflowEditor {
    let catalogue = Catalogue::new().with_prompt_rows([
        ("Act as a Code Reviewer", "Review {{code}} for bugs."),
        ("Act as an Essay Writer", "Write about {topic}."),
        ("Summarizer", "Summarize the input."),
    ]);
    WorkflowEditor::default().with_catalogue(catalogue)
}

/// Title of every node in `order`, for readable assertions.
#[allow(dead_code)]
pub fn titles(store: &GraphStore, order: &[NodeId]) -> Vec<String> {
    order
        .iter()
        .filter_map(|id| store.node(id))
        .map(|n| n.title.clone())
        .collect()
}

/// Resolved `(from, to)` anchors of a connection.
#[allow(dead_code)]
pub fn endpoints_of(store: &GraphStore, id: &ConnectionId) -> (Point, Point) {
    store
        .endpoints(id)
        .and_then(|e| e.resolved())
        .expect("connection has resolved endpoints")
}
