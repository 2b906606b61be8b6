//! The cart aggregate: per-user cart state with reserve-at-add-time stock
//! semantics.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
