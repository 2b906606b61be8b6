use crate::actor_framework::Entity;
use crate::domain::{User, UserCreate, UserPatch};

use super::actions::{UserAction, UserActionResult};

impl Entity for User {
    type Id = String;
    type CreatePayload = UserCreate;
    type Patch = UserPatch;
    type Action = UserAction;
    type ActionResult = UserActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: UserCreate) -> Result<Self, String> {
        if payload.email.trim().is_empty() {
            return Err("Email required".to_string());
        }
        Ok(Self {
            id,
            name: payload.name,
            email: payload.email,
            is_admin: false,
        })
    }

    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            if email.trim().is_empty() {
                return Err("Email required".to_string());
            }
            self.email = email;
        }
        Ok(())
    }

    fn handle_action(&mut self, action: UserAction) -> Result<UserActionResult, String> {
        match action {
            UserAction::GrantAdmin => {
                if self.is_admin {
                    Ok(UserActionResult::AdminGranted(false))
                } else {
                    self.is_admin = true;
                    Ok(UserActionResult::AdminGranted(true))
                }
            }
        }
    }
}
