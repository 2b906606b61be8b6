//! Catalog and stock management, the unit of truth for how many units remain.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
