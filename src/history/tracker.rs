//! Recent-Search Tracker
//!
//! Records every search a user submits and keeps only the most recent
//! [`MAX_RECENT_SEARCHES`] of them.
//!
//! Recording is insert-then-trim: after the insert, the user's entries are read
//! newest first and everything past the cap is deleted. The whole sequence runs
//! under the user's entry in [`KeyedLocks`], so two concurrent recordings for
//! the same user cannot both trim against a stale view, and the cap holds after
//! every completed write. Timestamps only have millisecond-ish resolution, so
//! entries with equal timestamps are ordered by store insertion sequence.

use super::types::{MAX_RECENT_SEARCHES, SearchHistoryEntry};
use crate::error::AppError;
use crate::storage::{Document, DocumentId, DocumentStore, KeyedLocks, StoreError};

use chrono::Utc;
use std::cmp::Reverse;
use std::sync::Arc;

pub struct RecentSearchTracker {
    store: Arc<DocumentStore>,
    locks: KeyedLocks,
    capacity: usize,
}

impl RecentSearchTracker {
    pub fn new(store: Arc<DocumentStore>, locks: KeyedLocks) -> Self {
        Self {
            store,
            locks,
            capacity: MAX_RECENT_SEARCHES,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Stores `query` for `user_id` and evicts the oldest entries beyond the cap.
    ///
    /// The query is stored as submitted; only the emptiness check trims it.
    pub async fn record_search(&self, user_id: &str, query: Option<&str>) -> Result<(), AppError> {
        let query = query
            .filter(|query| !query.trim().is_empty())
            .ok_or_else(|| AppError::InvalidArgument("Search query is required".to_string()))?;

        let _guard = self.locks.acquire(user_id).await?;

        self.store
            .searches
            .insert_one(SearchHistoryEntry {
                user_id: user_id.to_string(),
                query: query.to_string(),
                timestamp: Utc::now(),
            })
            .await?;

        let evicted = self.evict_beyond_capacity(user_id).await?;
        if evicted > 0 {
            tracing::debug!("Evicted {} old searches for user {}", evicted, user_id);
        }

        Ok(())
    }

    /// The user's most recent queries, newest first, at most `capacity` of them.
    pub async fn list_recent(&self, user_id: &str) -> Result<Vec<String>, AppError> {
        let entries = self.newest_first(user_id).await?;

        Ok(entries
            .into_iter()
            .take(self.capacity)
            .map(|doc| doc.body.query)
            .collect())
    }

    async fn evict_beyond_capacity(&self, user_id: &str) -> Result<usize, StoreError> {
        let stale: Vec<DocumentId> = self
            .newest_first(user_id)
            .await?
            .into_iter()
            .skip(self.capacity)
            .map(|doc| doc.id)
            .collect();

        if stale.is_empty() {
            return Ok(0);
        }
        self.store.searches.delete_many(&stale).await
    }

    async fn newest_first(
        &self,
        user_id: &str,
    ) -> Result<Vec<Document<SearchHistoryEntry>>, StoreError> {
        let mut entries = self
            .store
            .searches
            .find(|entry| entry.user_id == user_id)
            .await?;
        entries.sort_by_key(|doc| Reverse((doc.body.timestamp, doc.seq)));
        Ok(entries)
    }
}
