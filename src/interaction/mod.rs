//! Pointer and keyboard handling for the canvas.

pub mod controller;
pub mod viewport;

pub use controller::*;
pub use viewport::*;
