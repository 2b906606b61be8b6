use thiserror::Error;

use crate::cart_actor::CartError;
use crate::user_actor::UserError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Cancellation not allowed: {0}")]
    CancelNotAllowed(String),
    #[error("Order already cancelled: {0}")]
    AlreadyCancelled(String),
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
    #[error("User error: {0}")]
    User(#[from] UserError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
