//! Session store - the single authentication context
//!
//! Shared through `Arc` by the request authenticator, the auth service and
//! the router, so all three observe the same token.

use std::sync::Arc;

use crate::domain::result::{Error, Result};
use crate::domain::{Session, SessionUser};
use crate::ports::KeyValueStorage;

/// Storage key for the opaque bearer token
pub const TOKEN_KEY: &str = "token";
/// Storage key for the JSON-serialized user summary
pub const USER_KEY: &str = "user";

pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self { storage }
    }

    /// Persist user and token. The token goes last, so a failed write
    /// never leaves a token behind without its user.
    pub fn set(&self, session: &Session) -> Result<()> {
        let user = serde_json::to_string(&session.user)?;
        self.storage.set_item(USER_KEY, &user)?;
        self.storage.set_item(TOKEN_KEY, &session.token)?;
        Ok(())
    }

    /// Last persisted session, if both entries are present
    pub fn get(&self) -> Result<Option<Session>> {
        match (self.token()?, self.user()?) {
            (Some(token), Some(user)) => Ok(Some(Session { token, user })),
            _ => Ok(None),
        }
    }

    /// Remove token and user. The token goes first.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove_item(TOKEN_KEY)?;
        self.storage.remove_item(USER_KEY)?;
        Ok(())
    }

    /// Current bearer token. An empty string counts as no token.
    pub fn token(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get_item(TOKEN_KEY)?
            .filter(|token| !token.is_empty()))
    }

    pub fn user(&self) -> Result<Option<SessionUser>> {
        match self.storage.get_item(USER_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.token()?.is_some())
    }

    /// Clear the session when the storage can no longer be read.
    /// Returns true if it was cleared.
    pub fn discard_if_unreadable(&self) -> Result<bool> {
        match self.token() {
            Err(Error::Storage(_)) => {
                self.clear()?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
