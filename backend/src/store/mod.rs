//! User record store abstraction.
//!
//! Route handlers talk to [`UserStore`] only; the in-memory development
//! store and the remote user-service proxy are interchangeable behind it,
//! so swapping in a real database client never touches handler logic.

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use async_trait::async_trait;
use user_console_common::User;

use crate::upstream::UpstreamError;
use crate::validate::{UserPatch, ValidatedUser};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user not found")]
    NotFound,
    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<UpstreamError> for StoreError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::NotFound => StoreError::NotFound,
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// The canonical user collection, local or proxied.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Full collection snapshot, no pagination.
    async fn list(&self) -> Result<Vec<User>, StoreError>;

    async fn get(&self, id: i64) -> Result<User, StoreError>;

    /// Insert a validated user; the store assigns the identifier and the
    /// creation timestamp.
    async fn insert(&self, user: ValidatedUser) -> Result<User, StoreError>;

    /// Apply a partial patch. Unspecified fields are preserved; `id` and
    /// `createdAt` are never touched.
    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError>;

    /// Delete by id. A missing id is [`StoreError::NotFound`], never a
    /// silent success.
    async fn delete(&self, id: i64) -> Result<(), StoreError>;
}
