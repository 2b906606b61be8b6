use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid item: {0}")]
    InvalidItem(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for InventoryError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => InventoryError::NotFound(id),
            FrameworkError::Rejected(msg) => InventoryError::InvalidItem(msg),
            other => InventoryError::ActorCommunicationError(other.to_string()),
        }
    }
}
