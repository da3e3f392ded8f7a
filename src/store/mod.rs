//! Persistence boundary for bookmarks. Handlers only ever talk to a [`BookmarkStore`].

use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use async_trait::async_trait;

mod memory;
mod postgres;

pub use memory::MemoryBookmarkStore;
pub use postgres::{ensure_bookmarks_table, ensure_database_exists, PgBookmarkStore};

/// The five bookmark operations, each a single round trip to the backing store.
#[async_trait]
pub trait BookmarkStore: Send + Sync + 'static {
    /// Every record in the store's natural (id) order.
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError>;

    /// `Ok(None)` when no record has this id.
    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError>;

    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StorageError>;

    /// Apply the supplied fields. Returns the number of records changed.
    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError>;

    /// Hard delete. Returns the number of records removed.
    async fn delete(&self, id: i64) -> Result<u64, StorageError>;
}
