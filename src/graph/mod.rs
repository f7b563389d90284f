//! The workflow graph: data model, connection rules, anchor derivation and
//! execution ordering.

pub mod ids;
pub mod model;
pub mod order;
pub mod position;
pub mod store;
pub mod validator;

pub use ids::*;
pub use model::*;
pub use order::*;
pub use position::*;
pub use store::*;
pub use validator::*;
