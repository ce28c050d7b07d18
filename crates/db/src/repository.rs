//! The storage seam every resource handler talks to.

use std::sync::Arc;

use async_trait::async_trait;
use workshop_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use workshop_core::types::DbId;

use crate::error::StoreError;

/// A clamped `LIMIT`/`OFFSET` window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Page {
    /// Build a page from raw query parameters, clamping both values.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        Self {
            limit: clamp_limit(limit, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT),
            offset: clamp_offset(offset),
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// A repository trait object shared across handlers.
pub type SharedRepository<E, C, U> = Arc<dyn Repository<Entity = E, Create = C, Update = U>>;

/// Generic CRUD over one entity type.
///
/// Each method performs at most one read or one write against the backing
/// store and never retries. Implementations must order `list` by `id`.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send;
    type Create: Send + Sync;
    type Update: Send + Sync;

    async fn list(&self, page: Page) -> Result<Vec<Self::Entity>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Self::Entity>, StoreError>;

    async fn create(&self, input: &Self::Create) -> Result<Self::Entity, StoreError>;

    /// Apply the non-`None` fields of `input`. Returns `None` if no row
    /// with `id` exists.
    async fn update(
        &self,
        id: DbId,
        input: &Self::Update,
    ) -> Result<Option<Self::Entity>, StoreError>;

    /// Returns `true` if a row was removed.
    async fn delete(&self, id: DbId) -> Result<bool, StoreError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
