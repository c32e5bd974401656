//! User repository.

use crate::store::{Collection, RecordStore};
use crate::{Error, Result, User};
use std::sync::Arc;
use uuid::Uuid;

/// Create and look up users
#[derive(Clone)]
pub struct UserRepository {
    store: Arc<RecordStore>,
}

impl UserRepository {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    /// Register a new user under a freshly generated id
    ///
    /// Usernames are trimmed and must not be empty. Duplicates are allowed.
    pub fn create_user(&self, username: &str) -> Result<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(Error::validation("Username is required"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
        };

        self.store.update(Collection::Users, |users: &mut Vec<User>| {
            users.push(user.clone());
            Ok(())
        })?;

        tracing::info!("Created user {} ({})", user.id, user.username);
        Ok(user)
    }

    /// All users in creation order
    pub fn list_users(&self) -> Result<Vec<User>> {
        self.store.load(Collection::Users)
    }

    pub fn find_user(&self, id: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.store.load(Collection::Users)?;
        Ok(users.into_iter().find(|user| user.id == id))
    }

    /// Like [`find_user`](Self::find_user), but a missing user is an error
    pub fn require_user(&self, id: &str) -> Result<User> {
        self.find_user(id)?
            .ok_or_else(|| Error::not_found("User not found"))
    }
}
