//! Saving and restoring named workflows.

pub mod library;
pub mod record;

pub use library::*;
pub use record::*;
