//! The editor facade: one graph, one viewport, one pointer controller.
//!
//! `WorkflowEditor` is what a host UI talks to. It forwards hit-tested
//! pointer and keyboard events to the controller, applies catalogue drops
//! and node chrome actions to the store, and hands out a [`RenderSnapshot`]
//! after every change.

use crate::catalogue::{Catalogue, CatalogueItem};
use crate::config::EngineConfig;
use crate::error::GraphError;
use crate::graph::{
    AnchorRef, ConnectionId, GraphStore, Node, NodeId, NodePatch, NodePayload, Point,
    PositionResolver, Size,
};
use crate::interaction::{
    InteractionOutcome, Key, NodeRegion, PointerInteractionController, TransientConnection,
    Viewport,
};
use crate::variables::{VariableStatus, detect_variables, variable_status};
use crate::workflow::{WorkflowLibrary, WorkflowRecord};
use serde::Serialize;
use tracing::{debug, info};

/// A node as the renderer needs it.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedNode {
    #[serde(flatten)]
    pub node: Node,
    /// Placeholders found in a prompt's content. Empty for data sources.
    pub variables: Vec<String>,
    pub variable_status: VariableStatus,
}

/// A committed connection with its derived endpoints.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderedConnection {
    pub id: ConnectionId,
    pub source_node_id: NodeId,
    pub target_node_id: NodeId,
    pub from: Point,
    pub to: Point,
    pub selected: bool,
}

/// Everything needed to draw one frame.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub nodes: Vec<RenderedNode>,
    /// Connections whose endpoints could not be resolved are left out.
    pub connections: Vec<RenderedConnection>,
    pub transient: Option<TransientConnection>,
    pub selected_connection: Option<ConnectionId>,
    pub zoom: f64,
    pub zoom_percent: u32,
}

#[derive(Debug)]
pub struct WorkflowEditor {
    config: EngineConfig,
    store: GraphStore,
    viewport: Viewport,
    controller: PointerInteractionController,
    catalogue: Catalogue,
}

impl Default for WorkflowEditor {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl WorkflowEditor {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            store: GraphStore::new(PositionResolver::new(config.collapsed_anchor_offset)),
            viewport: Viewport::new(config.zoom),
            controller: PointerInteractionController::new(),
            catalogue: Catalogue::new(),
            config,
        }
    }

    pub fn with_catalogue(mut self, catalogue: Catalogue) -> Self {
        self.catalogue = catalogue;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &GraphStore {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn controller(&self) -> &PointerInteractionController {
        &self.controller
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    // --- Node chrome ---

    /// Places a catalogue item on the canvas at the default position.
    pub fn drop_item(&mut self, item: &CatalogueItem) -> NodeId {
        let id = self.store.add_node(item.to_node_spec(&self.config));
        debug!(node = %id, item = %item.id, "catalogue item dropped");
        id
    }

    /// Drops the catalogue item with the given id, if it exists.
    pub fn drop_catalogue_item(&mut self, item_id: &str) -> Option<NodeId> {
        let item = self.catalogue.get(item_id)?.clone();
        Some(self.drop_item(&item))
    }

    /// Deletes a node and every connection touching it.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<Node, GraphError> {
        let node = self.store.remove_node(id)?;
        let dangling = self
            .controller
            .selected_connection()
            .is_some_and(|c| self.store.connection(c).is_none());
        if dangling {
            self.controller.clear_selection();
        }
        Ok(node)
    }

    pub fn toggle_collapse(&mut self, id: &NodeId) -> Result<bool, GraphError> {
        self.store.toggle_collapsed(id)
    }

    pub fn resize_node(&mut self, id: &NodeId, size: Size) -> Result<(), GraphError> {
        self.store.update_node(id, NodePatch::size(size))
    }

    // --- Pointer & keyboard ---

    pub fn pointer_down_on_node(
        &mut self,
        id: &NodeId,
        region: NodeRegion,
        screen: Point,
    ) -> InteractionOutcome {
        self.controller
            .pointer_down_on_node(&self.store, &self.viewport, id, region, screen)
    }

    pub fn pointer_down_on_anchor(&mut self, anchor: AnchorRef, screen: Point) -> InteractionOutcome {
        self.controller
            .pointer_down_on_anchor(&self.store, &self.viewport, anchor, screen)
    }

    pub fn pointer_move(&mut self, screen: Point) -> InteractionOutcome {
        self.controller
            .pointer_move(&mut self.store, &self.viewport, screen)
    }

    pub fn pointer_up(&mut self, target: Option<AnchorRef>) -> InteractionOutcome {
        self.controller.pointer_up(&mut self.store, target)
    }

    pub fn click_canvas(&mut self) -> InteractionOutcome {
        self.controller.click_canvas()
    }

    pub fn select_connection(&mut self, id: &ConnectionId) -> InteractionOutcome {
        self.controller.select_connection(&self.store, id)
    }

    pub fn delete_connection(&mut self, id: &ConnectionId) -> InteractionOutcome {
        self.controller.delete_connection(&mut self.store, id)
    }

    pub fn key(&mut self, key: Key) -> InteractionOutcome {
        self.controller.key(&mut self.store, key)
    }

    // --- Zoom ---

    pub fn zoom_in(&mut self) -> f64 {
        self.viewport.zoom_in()
    }

    pub fn zoom_out(&mut self) -> f64 {
        self.viewport.zoom_out()
    }

    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.viewport.set_zoom(zoom)
    }

    // --- Workflow ---

    /// The order the workflow would run in. Nothing is executed.
    pub fn run(&self) -> Vec<NodeId> {
        let order = self.store.execution_order();
        info!(nodes = order.len(), "workflow execution order resolved");
        order
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        let selected = self.controller.selected_connection();

        let nodes = self
            .store
            .nodes()
            .iter()
            .map(|node| {
                let (variables, status) = match &node.payload {
                    NodePayload::Prompt {
                        content,
                        mapped_variables,
                    } => {
                        let variables = detect_variables(content);
                        let status = variable_status(&variables, mapped_variables);
                        (variables, status)
                    }
                    NodePayload::DataSource { .. } => (Vec::new(), VariableStatus::None),
                };
                RenderedNode {
                    node: node.clone(),
                    variables,
                    variable_status: status,
                }
            })
            .collect();

        let connections = self
            .store
            .connections()
            .iter()
            .filter_map(|conn| {
                let (from, to) = self.store.endpoints(&conn.id)?.resolved()?;
                Some(RenderedConnection {
                    id: conn.id.clone(),
                    source_node_id: conn.source_node_id.clone(),
                    target_node_id: conn.target_node_id.clone(),
                    from,
                    to,
                    selected: selected == Some(&conn.id),
                })
            })
            .collect();

        RenderSnapshot {
            nodes,
            connections,
            transient: self.controller.transient(),
            selected_connection: selected.cloned(),
            zoom: self.viewport.zoom(),
            zoom_percent: self.viewport.zoom_percent(),
        }
    }

    /// Captures the current graph into `library` under `name`.
    pub fn save_into(&self, library: &mut WorkflowLibrary, name: &str) {
        library.save(WorkflowRecord::capture(name, &self.store));
        info!(workflow = name, nodes = self.store.len(), "workflow saved");
    }

    /// Replaces the current graph with a saved workflow.
    ///
    /// Any gesture in progress and the connection selection are dropped.
    pub fn load(&mut self, record: &WorkflowRecord) {
        self.store = GraphStore::restore(record, *self.store.resolver());
        self.controller = PointerInteractionController::new();
        info!(
            workflow = %record.name,
            nodes = self.store.len(),
            connections = self.store.connections().len(),
            "workflow loaded"
        );
    }
}
