//! System orchestration, sessions, startup, and shutdown logic.

pub mod session;
pub mod storefront_system;
pub mod tracing;

pub use session::*;
pub use storefront_system::*;
pub use self::tracing::*;
