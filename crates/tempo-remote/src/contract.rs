//! The remote persistence/auth contract.
//!
//! Any backend that satisfies [`RemoteService`] can sit behind the entity
//! caches. Backends own identity checks: listing, updating and deleting only
//! ever touch records owned by the signed-in user.

use std::sync::Arc;

use async_trait::async_trait;
use tempo_core::enums::{Collection, Filter, OrderBy};
use tempo_core::identity::UserIdentity;

use crate::error::RemoteError;

/// A record as it crosses the remote boundary.
pub type Record = serde_json::Map<String, serde_json::Value>;

#[cfg_attr(any(test, feature = "test-support"), mockall::automock)]
#[async_trait]
pub trait RemoteService: Send + Sync {
    /// The signed-in user, or `None` when nobody is signed in.
    async fn current_user(&self) -> Result<Option<UserIdentity>, RemoteError>;

    /// Every record in `collection` matching `filter`, sorted by `order`.
    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
        order: OrderBy,
    ) -> Result<Vec<Record>, RemoteError>;

    /// Persist a new record and return it with server-assigned `id` and
    /// `created_at`.
    async fn insert(&self, collection: Collection, record: Record) -> Result<Record, RemoteError>;

    /// Apply `fields` to the record with `id` and return the persisted result.
    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<Record, RemoteError>;

    /// Delete every record in `collection` matching `filter`.
    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), RemoteError>;
}

#[async_trait]
impl<T: RemoteService + ?Sized> RemoteService for Arc<T> {
    async fn current_user(&self) -> Result<Option<UserIdentity>, RemoteError> {
        (**self).current_user().await
    }

    async fn list(
        &self,
        collection: Collection,
        filter: &Filter,
        order: OrderBy,
    ) -> Result<Vec<Record>, RemoteError> {
        (**self).list(collection, filter, order).await
    }

    async fn insert(&self, collection: Collection, record: Record) -> Result<Record, RemoteError> {
        (**self).insert(collection, record).await
    }

    async fn update(
        &self,
        collection: Collection,
        id: &str,
        fields: Record,
    ) -> Result<Record, RemoteError> {
        (**self).update(collection, id, fields).await
    }

    async fn delete(&self, collection: Collection, filter: &Filter) -> Result<(), RemoteError> {
        (**self).delete(collection, filter).await
    }
}
