use thiserror::Error;
use tracing::{debug, instrument};

use crate::clients::UserClient;
use crate::user_actor::UserError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Not authenticated: {0}")]
    NotAuthenticated(String),
    #[error("Admin privileges required for user: {0}")]
    NotAuthorized(String),
    #[error("User service error: {0}")]
    User(#[from] UserError),
}

/// An authenticated shopper. Admin-only surfaces check `is_admin` through
/// [`Session::require_admin`] before each back-office call.
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub is_admin: bool,
}

impl Session {
    /// Resolve a user id into a session. Unknown ids fail closed.
    #[instrument(skip(user_client))]
    pub async fn authenticate(user_client: &UserClient, user_id: String) -> Result<Self, AuthError> {
        debug!("Authenticating session");
        let user = user_client
            .get_user(user_id.clone())
            .await?
            .ok_or_else(|| AuthError::NotAuthenticated(user_id))?;
        Ok(Self {
            user_id: user.id,
            email: user.email,
            is_admin: user.is_admin,
        })
    }

    pub fn require_admin(&self) -> Result<(), AuthError> {
        if self.is_admin {
            Ok(())
        } else {
            Err(AuthError::NotAuthorized(self.user_id.clone()))
        }
    }
}
