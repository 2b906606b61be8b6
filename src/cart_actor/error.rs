use thiserror::Error;

use crate::inventory_actor::InventoryError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },
    #[error("Item not in cart: {0}")]
    LineNotFound(String),
    #[error("Inventory error: {0}")]
    Inventory(#[from] InventoryError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
