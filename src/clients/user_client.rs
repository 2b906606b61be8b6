use tracing::{debug, instrument};

use crate::actor_framework::ResourceClient;
use crate::domain::{User, UserCreate, UserPatch};
use crate::impl_basic_client;
use crate::user_actor::{UserAction, UserActionResult, UserError};

/// Client for the user directory actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl_basic_client!(UserClient, User, UserError, user);

impl UserClient {
    #[instrument(skip(self, payload))]
    pub async fn create_user(&self, payload: UserCreate) -> Result<String, UserError> {
        debug!("Sending request");
        self.inner.create(payload).await.map_err(UserError::from)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_user(&self, id: String, patch: UserPatch) -> Result<User, UserError> {
        debug!("Sending request");
        self.inner.update(id, patch).await.map_err(UserError::from)
    }

    /// Back-office grant. Returns whether the flag changed.
    #[instrument(skip(self))]
    pub async fn grant_admin(&self, id: String) -> Result<bool, UserError> {
        debug!("Sending request");
        match self.inner.perform_action(id, UserAction::GrantAdmin).await {
            Ok(UserActionResult::AdminGranted(changed)) => Ok(changed),
            Err(e) => Err(e.into()),
        }
    }
}
