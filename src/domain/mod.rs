pub mod cart;
pub mod food;
pub mod order;
pub mod review;
pub mod user;

pub use cart::*;
pub use food::*;
pub use order::*;
pub use review::*;
pub use user::*;

use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Injectable time source. Services read the clock instead of calling
/// `Utc::now()` directly so lifecycle tests can travel in time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Wall-clock time source for production wiring.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Fixed time source for tests.
#[cfg(test)]
pub fn fixed_clock(at: DateTime<Utc>) -> Clock {
    Arc::new(move || at)
}
