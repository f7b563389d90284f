use super::ids::{ConnectionId, NodeId};
use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// A point in either canvas or screen space.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, factor: f64) -> Point {
        Point::new(self.x * factor, self.y * factor)
    }
}

impl Div<f64> for Point {
    type Output = Point;
    fn div(self, factor: f64) -> Point {
        Point::new(self.x / factor, self.y / factor)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Which side of a node a connection attaches to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AnchorRole {
    Input,
    Output,
}

/// Discriminant of [`NodePayload`], for callers that only care about the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Prompt,
    DataSource,
}

/// Kind-specific node data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodePayload {
    #[serde(rename_all = "camelCase")]
    Prompt {
        content: String,
        #[serde(default)]
        mapped_variables: Vec<String>,
    },
    #[serde(rename_all = "camelCase")]
    DataSource {
        #[serde(default)]
        fields: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        webhook_url: Option<String>,
        #[serde(default)]
        is_realtime: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        brand_color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
}

impl NodePayload {
    pub fn prompt(content: impl Into<String>) -> Self {
        Self::Prompt {
            content: content.into(),
            mapped_variables: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Prompt { .. } => NodeKind::Prompt,
            Self::DataSource { .. } => NodeKind::DataSource,
        }
    }
}

/// A placed unit of work on the canvas.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub title: String,
    #[serde(default)]
    pub category: String,
    pub position: Point,
    pub size: Size,
    #[serde(default, rename = "isCollapsed")]
    pub collapsed: bool,
    /// Catalogue item the node was dropped from, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_id: Option<String>,
    #[serde(flatten)]
    pub payload: NodePayload,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }
}

/// Everything needed to create a node except its id.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    pub title: String,
    pub category: String,
    pub position: Point,
    pub size: Size,
    pub item_id: Option<String>,
    pub payload: NodePayload,
}

impl NodeSpec {
    /// A prompt node at the origin with the default prompt size.
    pub fn prompt(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: String::new(),
            position: Point::ORIGIN,
            size: EngineConfig::default().prompt_size,
            item_id: None,
            payload: NodePayload::prompt(content),
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub(crate) fn into_node(self, id: NodeId) -> Node {
        Node {
            id,
            title: self.title,
            category: self.category,
            position: self.position,
            size: self.size,
            collapsed: false,
            item_id: self.item_id,
            payload: self.payload,
        }
    }
}

/// Partial update applied by `GraphStore::update_node`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub position: Option<Point>,
    pub size: Option<Size>,
    pub collapsed: Option<bool>,
    pub title: Option<String>,
    pub category: Option<String>,
}

impl NodePatch {
    pub fn position(position: Point) -> Self {
        Self {
            position: Some(position),
            ..Self::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    pub fn collapsed(collapsed: bool) -> Self {
        Self {
            collapsed: Some(collapsed),
            ..Self::default()
        }
    }

    /// True when applying the patch can move a node's anchors.
    pub fn touches_geometry(&self) -> bool {
        self.position.is_some() || self.size.is_some() || self.collapsed.is_some()
    }
}

/// A directed edge from one node's output to another node's input.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: ConnectionId,
    pub source_node_id: NodeId,
    pub target_node_id: NodeId,
}

/// One end of a connection gesture: a node and the anchor that was hit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub node_id: NodeId,
    pub role: AnchorRole,
}

impl AnchorRef {
    pub fn output(node_id: impl Into<NodeId>) -> Self {
        Self {
            node_id: node_id.into(),
            role: AnchorRole::Output,
        }
    }

    pub fn input(node_id: impl Into<NodeId>) -> Self {
        Self {
            node_id: node_id.into(),
            role: AnchorRole::Input,
        }
    }
}

/// A connection gesture that has not been validated yet.
///
/// The drag may run in either direction; `normalized` turns it into a
/// (source, target) pair where the source owns the output anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposedConnection {
    pub from: AnchorRef,
    pub to: AnchorRef,
}

impl ProposedConnection {
    pub fn new(from: AnchorRef, to: AnchorRef) -> Self {
        Self { from, to }
    }

    /// Output of `source` into input of `target`.
    pub fn between(source: impl Into<NodeId>, target: impl Into<NodeId>) -> Self {
        Self::new(AnchorRef::output(source), AnchorRef::input(target))
    }

    /// Returns `(source, target)`, or `None` when both ends share a role.
    pub fn normalized(&self) -> Option<(&NodeId, &NodeId)> {
        match (self.from.role, self.to.role) {
            (AnchorRole::Output, AnchorRole::Input) => Some((&self.from.node_id, &self.to.node_id)),
            (AnchorRole::Input, AnchorRole::Output) => Some((&self.to.node_id, &self.from.node_id)),
            _ => None,
        }
    }
}

/// Read-only copy of the graph for rendering, ordering and persistence.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}
