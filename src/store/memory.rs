//! In-memory store: an id-ordered map behind an async lock.

use super::BookmarkStore;
use crate::error::StorageError;
use crate::model::{Bookmark, BookmarkPatch, NewBookmark};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug)]
struct Rows {
    next_id: i64,
    by_id: BTreeMap<i64, Bookmark>,
}

#[derive(Debug)]
pub struct MemoryBookmarkStore {
    rows: RwLock<Rows>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::with_bookmarks(Vec::new())
    }

    /// Seed with records that already carry ids. New ids continue after the largest one.
    pub fn with_bookmarks(bookmarks: Vec<Bookmark>) -> Self {
        let by_id: BTreeMap<i64, Bookmark> = bookmarks.into_iter().map(|b| (b.id, b)).collect();
        let next_id = by_id.keys().next_back().map_or(1, |max| max + 1);
        MemoryBookmarkStore {
            rows: RwLock::new(Rows { next_id, by_id }),
        }
    }
}

impl Default for MemoryBookmarkStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookmarkStore for MemoryBookmarkStore {
    async fn list_all(&self) -> Result<Vec<Bookmark>, StorageError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Bookmark>, StorageError> {
        let rows = self.rows.read().await;
        Ok(rows.by_id.get(&id).cloned())
    }

    async fn insert(&self, new: NewBookmark) -> Result<Bookmark, StorageError> {
        let mut rows = self.rows.write().await;
        let id = rows.next_id;
        rows.next_id += 1;
        let bookmark = new.with_id(id);
        rows.by_id.insert(id, bookmark.clone());
        tracing::debug!(id, "inserted bookmark");
        Ok(bookmark)
    }

    async fn update(&self, id: i64, patch: BookmarkPatch) -> Result<u64, StorageError> {
        let mut rows = self.rows.write().await;
        match rows.by_id.get_mut(&id) {
            Some(bookmark) => {
                patch.apply_to(bookmark);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, id: i64) -> Result<u64, StorageError> {
        let mut rows = self.rows.write().await;
        Ok(rows.by_id.remove(&id).map_or(0, |_| 1))
    }
}
