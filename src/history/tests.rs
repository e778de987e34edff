//! History Module Tests
//!
//! Validates the per-user recent-search cap.
//!
//! ## Test Scopes
//! - **Recording**: validation, raw storage, repeated queries.
//! - **Eviction**: only the seven newest entries survive, per user.
//! - **Concurrency**: the cap holds when one user records from many tasks at once.

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::history::tracker::RecentSearchTracker;
    use crate::history::types::{MAX_RECENT_SEARCHES, SearchHistoryEntry};
    use crate::storage::{DocumentStore, KeyedLocks};
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use std::time::Duration;

    fn tracker() -> (Arc<DocumentStore>, RecentSearchTracker) {
        let store = Arc::new(DocumentStore::in_memory());
        let tracker = RecentSearchTracker::new(store.clone(), KeyedLocks::new(Duration::from_secs(2)));
        (store, tracker)
    }

    // ============================================================
    // RECORDING TESTS
    // ============================================================

    #[tokio::test]
    async fn test_fresh_user_has_no_searches() {
        let (_, tracker) = tracker();

        let recent = tracker.list_recent("nobody").await.unwrap();
        assert!(recent.is_empty());
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let (store, tracker) = tracker();

        for raw in [None, Some(""), Some("  \t ")] {
            let result = tracker.record_search("u1", raw).await;
            assert!(matches!(result, Err(AppError::InvalidArgument(_))));
        }
        assert!(store.searches.is_empty(), "Rejected queries must not be stored");
    }

    #[tokio::test]
    async fn test_query_stored_as_submitted() {
        let (_, tracker) = tracker();

        tracker.record_search("u1", Some(" Egg, Flour ")).await.unwrap();

        assert_eq!(tracker.list_recent("u1").await.unwrap(), vec![" Egg, Flour "]);
    }

    #[tokio::test]
    async fn test_repeated_queries_are_separate_entries() {
        let (_, tracker) = tracker();

        tracker.record_search("u1", Some("egg")).await.unwrap();
        tracker.record_search("u1", Some("egg")).await.unwrap();

        assert_eq!(tracker.list_recent("u1").await.unwrap(), vec!["egg", "egg"]);
    }

    #[tokio::test]
    async fn test_listing_is_idempotent() {
        let (_, tracker) = tracker();
        tracker.record_search("u1", Some("a")).await.unwrap();
        tracker.record_search("u1", Some("b")).await.unwrap();

        let first = tracker.list_recent("u1").await.unwrap();
        let second = tracker.list_recent("u1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, vec!["b", "a"]);
    }

    // ============================================================
    // EVICTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_eighth_search_evicts_oldest() {
        // ARRANGE
        let (store, tracker) = tracker();

        // ACT
        for i in 1..=8 {
            tracker
                .record_search("u1", Some(&format!("q{}", i)))
                .await
                .unwrap();
        }

        // ASSERT
        let recent = tracker.list_recent("u1").await.unwrap();
        assert_eq!(recent, vec!["q8", "q7", "q6", "q5", "q4", "q3", "q2"]);
        assert_eq!(store.searches.len(), MAX_RECENT_SEARCHES, "q1 must be deleted, not hidden");
    }

    #[tokio::test]
    async fn test_equal_timestamps_fall_back_to_insertion_order() {
        // ARRANGE
        let (store, tracker) = tracker();
        let same_instant = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        for i in 1..=9 {
            store
                .searches
                .insert_one(SearchHistoryEntry {
                    user_id: "u1".to_string(),
                    query: format!("q{}", i),
                    timestamp: same_instant,
                })
                .await
                .unwrap();
        }

        // ACT
        let listed = tracker.list_recent("u1").await.unwrap();
        tracker.record_search("u1", Some("fresh")).await.unwrap();

        // ASSERT
        assert_eq!(listed, vec!["q9", "q8", "q7", "q6", "q5", "q4", "q3"]);
        assert_eq!(
            tracker.list_recent("u1").await.unwrap(),
            vec!["fresh", "q9", "q8", "q7", "q6", "q5", "q4"]
        );
        let stored = store
            .searches
            .count(|entry| entry.user_id == "u1")
            .await
            .unwrap();
        assert_eq!(stored, MAX_RECENT_SEARCHES, "Earliest inserted ties are evicted");
    }

    #[tokio::test]
    async fn test_users_are_capped_independently() {
        let (store, tracker) = tracker();

        for i in 0..10 {
            tracker.record_search("u1", Some(&format!("a{}", i))).await.unwrap();
        }
        tracker.record_search("u2", Some("only")).await.unwrap();

        assert_eq!(tracker.list_recent("u1").await.unwrap().len(), MAX_RECENT_SEARCHES);
        assert_eq!(tracker.list_recent("u2").await.unwrap(), vec!["only"]);
        assert_eq!(store.searches.len(), MAX_RECENT_SEARCHES + 1);
    }

    #[tokio::test]
    async fn test_capacity_is_seven() {
        let (_, tracker) = tracker();
        assert_eq!(tracker.capacity(), 7);
    }

    // ============================================================
    // CONCURRENCY TESTS
    // ============================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_cap_holds_under_concurrent_recording() {
        // ARRANGE
        let (store, tracker) = tracker();
        let tracker = Arc::new(tracker);

        // ACT
        let handles: Vec<_> = (0..40)
            .map(|i| {
                let tracker = tracker.clone();
                tokio::spawn(async move {
                    tracker
                        .record_search("busy", Some(&format!("query-{}", i)))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // ASSERT
        let stored = store
            .searches
            .count(|entry| entry.user_id == "busy")
            .await
            .unwrap();
        assert_eq!(stored, MAX_RECENT_SEARCHES);
        assert_eq!(tracker.list_recent("busy").await.unwrap().len(), MAX_RECENT_SEARCHES);
    }

    #[tokio::test]
    async fn test_closed_store_is_storage_unavailable() {
        let (store, tracker) = tracker();
        store.close().await.unwrap();

        let result = tracker.record_search("u1", Some("egg")).await;
        assert!(matches!(result, Err(AppError::StorageUnavailable(_))));

        let listed = tracker.list_recent("u1").await;
        assert!(matches!(listed, Err(AppError::StorageUnavailable(_))));
    }
}
