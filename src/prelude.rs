//! Prelude module for convenient imports
//!
//! Re-exports the types most callers need to build, edit, order and save a
//! workflow graph.
//!
//! # Example
//!
//! ```rust,no_run
//! use promptflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let library = WorkflowLibrary::from_file("path/to/workflows.json")?;
//! let record = library.require("Lead scoring")?;
//!
//! let mut editor = WorkflowEditor::default();
//! editor.load(record);
//! for id in editor.run() {
//!     println!("{}", id);
//! }
//! # Ok(())
//! # }
//! ```

// Graph model and engine
pub use crate::graph::{
    AnchorRef, AnchorRole, Connection, ConnectionId, Endpoints, ExecutionOrderResolver,
    GraphSnapshot, GraphStore, Node, NodeId, NodeKind, NodePatch, NodePayload, NodeSpec, Point,
    PositionResolver, ProposedConnection, Size,
};

// Interaction
pub use crate::interaction::{
    InteractionOutcome, Key, NodeRegion, PointerInteractionController, Viewport,
};

// Editor, catalogue and persistence
pub use crate::catalogue::{Catalogue, CatalogueItem};
pub use crate::config::EngineConfig;
pub use crate::editor::{RenderSnapshot, WorkflowEditor};
pub use crate::workflow::{WorkflowLibrary, WorkflowRecord};

// Error types
pub use crate::error::{ConfigError, GraphError, PersistenceError, RejectReason};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
