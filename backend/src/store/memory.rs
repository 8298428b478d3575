//! In-memory development store.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use user_console_common::User;

use super::{StoreError, UserStore};
use crate::validate::{UserPatch, ValidatedUser};

/// Development stand-in for the user-service collection.
///
/// Identifiers are sequential and never reassigned, even after deletes.
/// The lock is the mutual-exclusion boundary around collection mutation;
/// handlers never touch the vector directly.
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

struct Inner {
    users: Vec<User>,
    next_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                users: Vec::new(),
                next_id: 1,
            }),
        }
    }

    /// Start from an existing collection; the id counter continues after
    /// the highest seeded id.
    pub fn with_users(users: Vec<User>) -> Self {
        let next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(Inner { users, next_id }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        Ok(inner.users.clone())
    }

    async fn get(&self, id: i64) -> Result<User, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, user: ValidatedUser) -> Result<User, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let id = inner.next_id;
        inner.next_id += 1;

        let record = User {
            id,
            email: user.email,
            first_name: user.first_name,
            middle_name: user.middle_name,
            last_name: user.last_name,
            date_of_birth: user.date_of_birth,
            role: user.role,
            role_id: user.role_id,
            is_active: user.is_active,
            country: user.country,
            created_at: Utc::now(),
            avatar_url: user.avatar_url,
        };
        inner.users.push(record.clone());

        tracing::debug!("Inserted user {}", id);
        Ok(record)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(StoreError::NotFound)?;

        // id and created_at are deliberately absent from the patch type.
        if let Some(email) = patch.email {
            user.email = email;
        }
        if let Some(first_name) = patch.first_name {
            user.first_name = first_name;
        }
        if let Some(middle_name) = patch.middle_name {
            user.middle_name = Some(middle_name);
        }
        if let Some(last_name) = patch.last_name {
            user.last_name = last_name;
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            user.date_of_birth = date_of_birth;
        }
        if let Some((role, role_id)) = patch.role {
            user.role = role;
            user.role_id = role_id;
        }
        if let Some(is_active) = patch.is_active {
            user.is_active = is_active;
        }
        if let Some(country) = patch.country {
            user.country = country;
        }
        if let Some(avatar_url) = patch.avatar_url {
            user.avatar_url = Some(avatar_url);
        }

        tracing::debug!("Updated user {}", id);
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(StoreError::NotFound);
        }

        tracing::debug!("Deleted user {}", id);
        Ok(())
    }
}
