//! HTTP handlers for order CRUD.

pub mod order;
pub use order::*;
