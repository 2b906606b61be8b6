//! Per-item reviews and the flagged-review moderation queue.

pub mod error;
pub mod service;

pub use error::*;
pub use service::*;
