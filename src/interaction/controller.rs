use super::viewport::Viewport;
use crate::error::{GraphError, RejectReason};
use crate::graph::{AnchorRef, ConnectionId, GraphStore, NodeId, NodePatch, Point, ProposedConnection};
use serde::Serialize;
use tracing::trace;

/// Part of a node that received a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRegion {
    /// The draggable frame of the node.
    Body,
    /// Title row. Clicks here belong to collapse/delete, not dragging.
    Header,
    /// Buttons inside the header.
    Controls,
    /// The scrollable content area.
    Content,
}

/// Keys the canvas reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

/// The pointer interaction state. Exactly one gesture can be active.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle,
    DraggingNode {
        node_id: NodeId,
        /// Pointer position minus the node's zoomed position, in screen units.
        offset: Point,
    },
    DraggingConnection {
        origin: AnchorRef,
        /// Anchor the gesture started from, in canvas space.
        from: Point,
        /// Current pointer position, in canvas space.
        cursor: Point,
    },
}

/// Uncommitted connection line drawn while dragging from an anchor.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct TransientConnection {
    pub from: Point,
    pub to: Point,
}

/// What a handled event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionOutcome {
    Ignored,
    DragStarted,
    NodeMoved,
    DragEnded,
    ConnectionPreview,
    ConnectionCreated {
        id: ConnectionId,
        replaced: Option<ConnectionId>,
    },
    ConnectionRejected(RejectReason),
    ConnectionDeleted(ConnectionId),
    Cancelled,
    SelectionChanged(Option<ConnectionId>),
}

/// Translates pointer and keyboard events into `GraphStore` mutations.
///
/// The controller never owns the store; callers pass it in per event.
#[derive(Debug, Clone)]
pub struct PointerInteractionController {
    state: DragState,
    selected: Option<ConnectionId>,
}

impl Default for PointerInteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerInteractionController {
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
            selected: None,
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DragState::Idle)
    }

    pub fn selected_connection(&self) -> Option<&ConnectionId> {
        self.selected.as_ref()
    }

    pub fn transient(&self) -> Option<TransientConnection> {
        match self.state {
            DragState::DraggingConnection { from, cursor, .. } => {
                Some(TransientConnection { from, to: cursor })
            }
            _ => None,
        }
    }

    // --- Pointer ---

    /// Pointer-down on a node. Only the body starts a drag.
    pub fn pointer_down_on_node(
        &mut self,
        store: &GraphStore,
        viewport: &Viewport,
        node_id: &NodeId,
        region: NodeRegion,
        screen: Point,
    ) -> InteractionOutcome {
        if !self.is_idle() || region != NodeRegion::Body {
            return InteractionOutcome::Ignored;
        }
        let Some(node) = store.node(node_id) else {
            return InteractionOutcome::Ignored;
        };

        let offset = screen - node.position * viewport.zoom();
        trace!(node = %node_id, ?offset, "node drag started");
        self.state = DragState::DraggingNode {
            node_id: node_id.clone(),
            offset,
        };
        InteractionOutcome::DragStarted
    }

    /// Pointer-down on an input or output anchor.
    pub fn pointer_down_on_anchor(
        &mut self,
        store: &GraphStore,
        viewport: &Viewport,
        anchor: AnchorRef,
        screen: Point,
    ) -> InteractionOutcome {
        if !self.is_idle() {
            return InteractionOutcome::Ignored;
        }
        let Some(from) = store.anchor_for(&anchor.node_id, anchor.role) else {
            return InteractionOutcome::Ignored;
        };

        trace!(node = %anchor.node_id, role = ?anchor.role, "connection drag started");
        self.state = DragState::DraggingConnection {
            origin: anchor,
            from,
            cursor: viewport.to_canvas(screen),
        };
        InteractionOutcome::DragStarted
    }

    pub fn pointer_move(
        &mut self,
        store: &mut GraphStore,
        viewport: &Viewport,
        screen: Point,
    ) -> InteractionOutcome {
        match &mut self.state {
            DragState::Idle => InteractionOutcome::Ignored,
            DragState::DraggingNode { node_id, offset } => {
                let position = (screen - *offset) / viewport.zoom();
                match store.update_node(node_id, NodePatch::position(position)) {
                    Ok(()) => InteractionOutcome::NodeMoved,
                    Err(_) => {
                        // The node was deleted mid-drag.
                        self.state = DragState::Idle;
                        InteractionOutcome::Cancelled
                    }
                }
            }
            DragState::DraggingConnection { cursor, .. } => {
                *cursor = viewport.to_canvas(screen);
                InteractionOutcome::ConnectionPreview
            }
        }
    }

    /// Pointer-up. `target` is the anchor under the pointer, if any.
    pub fn pointer_up(
        &mut self,
        store: &mut GraphStore,
        target: Option<AnchorRef>,
    ) -> InteractionOutcome {
        let state = std::mem::replace(&mut self.state, DragState::Idle);
        match state {
            DragState::Idle => InteractionOutcome::Ignored,
            DragState::DraggingNode { node_id, .. } => {
                trace!(node = %node_id, "node drag ended");
                InteractionOutcome::DragEnded
            }
            DragState::DraggingConnection { origin, .. } => {
                let Some(target) = target else {
                    trace!("connection drag dropped off-target");
                    return InteractionOutcome::Cancelled;
                };
                let proposed = ProposedConnection::new(origin, target);
                match store.propose_connection(&proposed) {
                    Ok(committed) => {
                        if self.selected.is_some() && self.selected == committed.replaced {
                            self.selected = None;
                        }
                        InteractionOutcome::ConnectionCreated {
                            id: committed.id,
                            replaced: committed.replaced,
                        }
                    }
                    Err(GraphError::ConnectionRejected(reason)) => {
                        InteractionOutcome::ConnectionRejected(reason)
                    }
                    Err(_) => InteractionOutcome::Cancelled,
                }
            }
        }
    }

    /// Ends whatever gesture is active without touching the store.
    ///
    /// A pending connection is dropped uncommitted. A dragged node stays
    /// where the last move put it; later moves no longer relocate it.
    pub fn cancel(&mut self) -> InteractionOutcome {
        match std::mem::replace(&mut self.state, DragState::Idle) {
            DragState::Idle => InteractionOutcome::Ignored,
            DragState::DraggingNode { node_id, .. } => {
                trace!(node = %node_id, "node drag cancelled");
                InteractionOutcome::Cancelled
            }
            DragState::DraggingConnection { .. } => {
                trace!("connection drag cancelled");
                InteractionOutcome::Cancelled
            }
        }
    }

    // --- Selection & keyboard ---

    pub fn select_connection(&mut self, store: &GraphStore, id: &ConnectionId) -> InteractionOutcome {
        if store.connection(id).is_none() {
            return InteractionOutcome::Ignored;
        }
        self.selected = Some(id.clone());
        InteractionOutcome::SelectionChanged(self.selected.clone())
    }

    pub fn clear_selection(&mut self) -> InteractionOutcome {
        match self.selected.take() {
            Some(_) => InteractionOutcome::SelectionChanged(None),
            None => InteractionOutcome::Ignored,
        }
    }

    /// A click on empty canvas deselects.
    pub fn click_canvas(&mut self) -> InteractionOutcome {
        self.clear_selection()
    }

    /// Deletes a connection directly, e.g. from its delete button.
    pub fn delete_connection(
        &mut self,
        store: &mut GraphStore,
        id: &ConnectionId,
    ) -> InteractionOutcome {
        match store.remove_connection(id) {
            Ok(removed) => {
                if self.selected.as_ref() == Some(&removed.id) {
                    self.selected = None;
                }
                InteractionOutcome::ConnectionDeleted(removed.id)
            }
            Err(_) => InteractionOutcome::Ignored,
        }
    }

    pub fn key(&mut self, store: &mut GraphStore, key: Key) -> InteractionOutcome {
        match key {
            Key::Delete | Key::Backspace => match self.selected.take() {
                Some(id) => self.delete_connection(store, &id),
                None => InteractionOutcome::Ignored,
            },
            Key::Escape => {
                let cancelled = self.cancel();
                let cleared = self.clear_selection();
                if cancelled != InteractionOutcome::Ignored {
                    cancelled
                } else {
                    cleared
                }
            }
            Key::Other => InteractionOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeSpec;

    fn setup() -> (GraphStore, NodeId, NodeId) {
        let mut store = GraphStore::default();
        let a = store.add_node(NodeSpec::prompt("A", "").at(0.0, 0.0));
        let b = store.add_node(NodeSpec::prompt("B", "").at(400.0, 0.0));
        (store, a, b)
    }

    #[test]
    fn header_clicks_do_not_start_a_drag() {
        let (store, a, _) = setup();
        let mut ctrl = PointerInteractionController::new();
        for region in [NodeRegion::Header, NodeRegion::Controls, NodeRegion::Content] {
            let outcome =
                ctrl.pointer_down_on_node(&store, &Viewport::default(), &a, region, Point::ORIGIN);
            assert_eq!(outcome, InteractionOutcome::Ignored);
        }
        assert!(ctrl.is_idle());
    }

    #[test]
    fn second_gesture_is_refused_while_dragging() {
        let (store, a, b) = setup();
        let viewport = Viewport::default();
        let mut ctrl = PointerInteractionController::new();
        ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, Point::new(10.0, 10.0));
        let outcome =
            ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(b), Point::ORIGIN);
        assert_eq!(outcome, InteractionOutcome::Ignored);
        assert!(matches!(ctrl.state(), DragState::DraggingNode { .. }));
    }

    #[test]
    fn transient_follows_pointer_in_canvas_space() {
        let (store, a, _) = setup();
        let mut viewport = Viewport::default();
        viewport.set_zoom(0.5);
        viewport.set_origin(Point::new(20.0, 20.0));
        let mut store = store;
        let mut ctrl = PointerInteractionController::new();

        ctrl.pointer_down_on_anchor(&store, &viewport, AnchorRef::output(a), Point::ORIGIN);
        ctrl.pointer_move(&mut store, &viewport, Point::new(120.0, 70.0));

        let transient = ctrl.transient().unwrap();
        assert_eq!(transient.from, Point::new(300.0, 100.0));
        assert_eq!(transient.to, Point::new(200.0, 100.0));
    }

    #[test]
    fn node_deleted_mid_drag_resets_state() {
        let (mut store, a, _) = setup();
        let viewport = Viewport::default();
        let mut ctrl = PointerInteractionController::new();
        ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, Point::ORIGIN);
        store.remove_node(&a).unwrap();

        let outcome = ctrl.pointer_move(&mut store, &viewport, Point::new(5.0, 5.0));
        assert_eq!(outcome, InteractionOutcome::Cancelled);
        assert!(ctrl.is_idle());
    }

    #[test]
    fn escape_ends_a_node_drag() {
        let (mut store, a, _) = setup();
        let viewport = Viewport::default();
        let mut ctrl = PointerInteractionController::new();
        ctrl.pointer_down_on_node(&store, &viewport, &a, NodeRegion::Body, Point::ORIGIN);
        ctrl.pointer_move(&mut store, &viewport, Point::new(30.0, 40.0));

        assert_eq!(ctrl.key(&mut store, Key::Escape), InteractionOutcome::Cancelled);
        assert!(ctrl.is_idle());

        let outcome = ctrl.pointer_move(&mut store, &viewport, Point::new(300.0, 300.0));
        assert_eq!(outcome, InteractionOutcome::Ignored);
        assert_eq!(store.node(&a).unwrap().position, Point::new(30.0, 40.0));
        assert_eq!(ctrl.pointer_up(&mut store, None), InteractionOutcome::Ignored);
    }

    #[test]
    fn escape_without_anything_active_is_ignored() {
        let (mut store, _, _) = setup();
        let mut ctrl = PointerInteractionController::new();
        assert_eq!(ctrl.key(&mut store, Key::Escape), InteractionOutcome::Ignored);
    }
}
