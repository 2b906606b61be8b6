pub mod macros;

mod cart_client;
mod inventory_client;
mod order_client;
mod review_client;
mod user_client;

pub use cart_client::CartClient;
pub use inventory_client::{InventoryClient, LOW_STOCK_THRESHOLD};
pub use order_client::OrderClient;
pub use review_client::ReviewClient;
pub use user_client::UserClient;
