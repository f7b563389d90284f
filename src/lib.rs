//! # PromptFlow - Workflow Graph Engine
//!
//! **PromptFlow** is the engine behind a visual prompt-chaining canvas. Users
//! drop data sources and prompts on a canvas, wire outputs to inputs, and
//! "run" the workflow. This crate owns everything below the pixels: the
//! graph model, the connection rules, anchor geometry, the pointer state
//! machine and the execution order.
//!
//! ## Core Workflow
//!
//! 1.  **Populate**: Drop [`catalogue::CatalogueItem`]s or add nodes with a
//!     [`graph::NodeSpec`]. Node ids are generated by the store.
//! 2.  **Connect**: Propose connections, either directly or through the
//!     [`interaction::PointerInteractionController`]. Every proposal is
//!     validated; an output can feed at most one input, so connecting an
//!     output a second time replaces its previous connection.
//! 3.  **Render**: Read a [`editor::RenderSnapshot`]. Anchor coordinates are
//!     derived from node geometry and are never stored by hand.
//! 4.  **Run & Save**: Resolve the execution order (dependencies first) and
//!     persist the graph as a [`workflow::WorkflowRecord`].
//!
//! ## Quick Start
//!
//! ```rust
//! use promptflow::prelude::*;
//!
//! let mut store = GraphStore::default();
//! let source = store.add_node(NodeSpec::prompt("Leads", "").at(0.0, 0.0));
//! let summary = store.add_node(NodeSpec::prompt("Summarize", "Summarize {{lead}}").at(400.0, 0.0));
//!
//! store.add_connection(&source, &summary).unwrap();
//!
//! // Self-loops are refused and leave the store untouched.
//! assert!(store.add_connection(&summary, &summary).is_err());
//!
//! assert_eq!(store.execution_order(), vec![source, summary]);
//! ```

pub mod catalogue;
pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod interaction;
pub mod prelude;
pub mod variables;
pub mod workflow;
