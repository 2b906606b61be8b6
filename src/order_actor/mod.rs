//! The order lifecycle engine: checkout, cancellation, pickup confirmation,
//! the back-office queue and the sales report.

pub mod error;
pub mod report;
pub mod service;

pub use error::*;
pub use report::*;
pub use service::*;
