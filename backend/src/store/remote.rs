//! Store implementation backed by the upstream user-service.

use async_trait::async_trait;
use user_console_common::User;

use super::{StoreError, UserStore};
use crate::upstream::UserServiceClient;
use crate::validate::{UserPatch, ValidatedUser};

/// Forwards every operation to the upstream user-service, synchronously,
/// one attempt each.
pub struct RemoteStore {
    client: UserServiceClient,
}

impl RemoteStore {
    pub fn new(client: UserServiceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl UserStore for RemoteStore {
    async fn list(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.client.list_users().await?)
    }

    async fn get(&self, id: i64) -> Result<User, StoreError> {
        Ok(self.client.get_user(id).await?)
    }

    async fn insert(&self, user: ValidatedUser) -> Result<User, StoreError> {
        Ok(self.client.create_user(&user.to_request()).await?)
    }

    async fn update(&self, id: i64, patch: UserPatch) -> Result<User, StoreError> {
        Ok(self.client.update_user(id, &patch.to_request()).await?)
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        Ok(self.client.delete_user(id).await?)
    }
}
