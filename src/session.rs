//! Process-wide "current user" context backed by local storage.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::models::User;
use crate::storage::{LocalStorage, StorageError};

pub const USER_KEY: &str = "vtb_user";
pub const TOKEN_KEY: &str = "vtb_token";

#[derive(Debug)]
pub struct UserContext {
    storage: Arc<LocalStorage>,
    user: RwLock<Option<User>>,
}

impl UserContext {
    /// Reads the saved user once. Later reads only touch memory.
    pub fn load(storage: Arc<LocalStorage>) -> Self {
        let user = storage
            .get_item(USER_KEY)
            .and_then(|raw| match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    tracing::warn!(error = %err, "ignoring malformed saved user");
                    None
                }
            });

        if let Some(ref user) = user {
            tracing::info!(area = %user.selected_area, "restored saved user");
        }

        Self {
            storage,
            user: RwLock::new(user),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.read().clone()
    }

    pub fn is_registered(&self) -> bool {
        self.user.read().is_some()
    }

    pub fn set_user(&self, user: Option<User>) -> Result<(), StorageError> {
        let mut guard = self.user.write();
        match user {
            Some(ref value) => {
                let raw = serde_json::to_string(value)?;
                self.storage.set_item(USER_KEY, raw)?;
            }
            None => self.storage.remove_item(USER_KEY)?,
        }
        *guard = user;
        Ok(())
    }

    pub fn clear_user(&self) -> Result<(), StorageError> {
        self.set_user(None)
    }

    pub fn token(&self) -> Option<String> {
        self.storage.get_item(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn set_token(&self, token: Option<&str>) -> Result<(), StorageError> {
        match token {
            Some(token) => self.storage.set_item(TOKEN_KEY, token),
            None => self.storage.remove_item(TOKEN_KEY),
        }
    }

    /// Drops token and user after the API rejected our credentials.
    pub fn expire(&self) {
        if let Err(err) = self.set_token(None) {
            tracing::error!(error = %err, "failed to remove token");
        }
        if let Err(err) = self.clear_user() {
            tracing::error!(error = %err, "failed to remove user");
        }
    }
}
