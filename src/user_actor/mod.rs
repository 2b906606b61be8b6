//! The user directory: shopper records and the admin-grant action.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
