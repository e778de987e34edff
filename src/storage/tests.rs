//! Storage Module Tests
//!
//! Validates the embedded document store.
//!
//! ## Test Scopes
//! - **Collection**: CRUD by id and predicate, insertion order, sequence numbers.
//! - **Lifecycle**: operations after `close` fail with `StoreError::Closed`.
//! - **Snapshots**: collections survive a close/open cycle through the data directory.
//! - **Seeding**: legacy recipe dumps are normalized on import.
//! - **KeyedLocks**: per-key exclusion and acquire timeouts.

#[cfg(test)]
mod tests {
    use crate::recipes::types::Recipe;
    use crate::storage::memory::{Collection, Lifecycle};
    use crate::storage::snapshot;
    use crate::storage::{DocumentId, DocumentStore, KeyedLocks, StoreError};
    use std::time::Duration;

    fn recipe(title: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            title: title.to_string(),
            instructions: "Mix and bake.".to_string(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            image: None,
            user_id: None,
            created_at: None,
        }
    }

    // ============================================================
    // COLLECTION TESTS
    // ============================================================

    #[tokio::test]
    async fn test_insert_and_get() {
        let books: Collection<String> = Collection::new("notes", Lifecycle::new());

        let id = books.insert_one("first".to_string()).await.unwrap();
        let doc = books.get(&id).await.unwrap().expect("document should exist");

        assert_eq!(doc.id, id);
        assert_eq!(doc.body, "first");
        assert_eq!(books.len(), 1);
    }

    #[tokio::test]
    async fn test_get_unknown_id_returns_none() {
        let notes: Collection<String> = Collection::new("notes", Lifecycle::new());

        let found = notes.get(&DocumentId::from("missing")).await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_ids_are_unique_and_seq_increases() {
        let notes: Collection<u32> = Collection::new("notes", Lifecycle::new());

        let a = notes.insert_one(1).await.unwrap();
        let b = notes.insert_one(2).await.unwrap();
        assert_ne!(a, b);

        let docs = notes.dump();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].seq < docs[1].seq, "Sequence numbers must increase");
    }

    #[tokio::test]
    async fn test_find_filters_and_keeps_insertion_order() {
        let numbers: Collection<u32> = Collection::new("numbers", Lifecycle::new());
        for n in [5, 2, 8, 3, 6] {
            numbers.insert_one(n).await.unwrap();
        }

        let even: Vec<u32> = numbers
            .find(|n| n % 2 == 0)
            .await
            .unwrap()
            .into_iter()
            .map(|doc| doc.body)
            .collect();

        assert_eq!(even, vec![2, 8, 6]);
        assert_eq!(numbers.count(|n| *n > 4).await.unwrap(), 3);
        assert_eq!(numbers.find_one(|n| *n > 4).await.unwrap().unwrap().body, 5);
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let notes: Collection<String> = Collection::new("notes", Lifecycle::new());
        let id = notes.insert_one("draft".to_string()).await.unwrap();

        let updated = notes
            .update(&id, |body| body.push_str(" v2"))
            .await
            .unwrap()
            .expect("document should exist");

        assert_eq!(updated.body, "draft v2");
        assert_eq!(notes.get(&id).await.unwrap().unwrap().body, "draft v2");

        let missing = notes
            .update(&DocumentId::from("missing"), |body| body.clear())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_one_and_many() {
        let notes: Collection<u32> = Collection::new("notes", Lifecycle::new());
        let a = notes.insert_one(1).await.unwrap();
        let b = notes.insert_one(2).await.unwrap();
        let c = notes.insert_one(3).await.unwrap();

        assert!(notes.delete_one(&a).await.unwrap());
        assert!(!notes.delete_one(&a).await.unwrap(), "Second delete is a no-op");

        // Unknown ids are skipped
        let deleted = notes
            .delete_many(&[b, c, DocumentId::from("missing")])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_restore_keeps_ids_and_sequences_after() {
        let source: Collection<u32> = Collection::new("numbers", Lifecycle::new());
        source.insert_one(10).await.unwrap();
        source.insert_one(20).await.unwrap();
        let dumped = source.dump();

        let target: Collection<u32> = Collection::new("numbers", Lifecycle::new());
        target.restore(dumped.clone());
        let new_id = target.insert_one(30).await.unwrap();

        let restored = target.dump();
        assert_eq!(restored.len(), 3);
        assert_eq!(restored[0].id, dumped[0].id);
        assert_eq!(restored[2].id, new_id);
        assert!(restored[2].seq > dumped[1].seq);
    }

    // ============================================================
    // LIFECYCLE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_closed_store_rejects_operations() {
        let store = DocumentStore::in_memory();
        let id = store.recipes.insert_one(recipe("Cake", &["flour"])).await.unwrap();

        store.close().await.unwrap();
        assert!(!store.is_open());

        assert!(matches!(store.recipes.get(&id).await, Err(StoreError::Closed)));
        assert!(matches!(
            store.recipes.find(|_| true).await,
            Err(StoreError::Closed)
        ));
        assert!(matches!(
            store.recipes.insert_one(recipe("Pie", &["apple"])).await,
            Err(StoreError::Closed)
        ));
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let store = DocumentStore::in_memory();

        store.close().await.unwrap();
        store.close().await.unwrap();
        assert!(!store.is_open());
    }

    // ============================================================
    // SNAPSHOT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_missing_snapshot_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let docs = snapshot::load::<u32>(dir.path(), "nothing").await.unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_snapshot_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(snapshot::snapshot_path(dir.path(), "numbers"), b"{ not json").unwrap();

        let result = snapshot::load::<u32>(dir.path(), "numbers").await;
        assert!(matches!(result, Err(StoreError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_store_survives_close_and_reopen() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::open(Some(dir.path().to_path_buf()))
            .await
            .unwrap();
        let id = store
            .recipes
            .insert_one(recipe("Pancakes", &["flour", "egg", "milk"]))
            .await
            .unwrap();

        // ACT
        store.close().await.unwrap();
        let reopened = DocumentStore::open(Some(dir.path().to_path_buf()))
            .await
            .unwrap();

        // ASSERT
        let doc = reopened.recipes.get(&id).await.unwrap().expect("recipe restored");
        assert_eq!(doc.body.title, "Pancakes");
        assert_eq!(doc.body.ingredients, vec!["flour", "egg", "milk"]);
        assert!(dir.path().join("recipes.json").exists());
        assert!(dir.path().join("user_searches.json").exists());
    }

    // ============================================================
    // SEED TESTS
    // ============================================================

    #[tokio::test]
    async fn test_seed_normalizes_legacy_records() {
        // ARRANGE
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        let seed = serde_json::json!([
            {
                "Title": "Old Cake",
                "Instructions": "Bake it.",
                "Cleaned_Ingredients": ["2 cups flour", "3 eggs"],
                "Image_Name": "old-cake"
            },
            {
                "title": "New Salad",
                "instructions": "Toss it.",
                "ingredients": "lettuce"
            }
        ]);
        std::fs::write(&seed_path, serde_json::to_vec(&seed).unwrap()).unwrap();
        let store = DocumentStore::in_memory();

        // ACT
        let seeded = store.seed_recipes(&seed_path).await.unwrap();

        // ASSERT
        assert_eq!(seeded, 2);
        let recipes = store.recipes.find(|_| true).await.unwrap();
        assert_eq!(recipes[0].body.title, "Old Cake");
        assert_eq!(recipes[0].body.ingredients, vec!["2 cups flour", "3 eggs"]);
        assert_eq!(recipes[0].body.image.as_deref(), Some("old-cake"));
        assert_eq!(recipes[1].body.ingredients, vec!["lettuce"]);
    }

    #[tokio::test]
    async fn test_seed_skipped_when_recipes_exist() {
        let dir = tempfile::tempdir().unwrap();
        let seed_path = dir.path().join("seed.json");
        std::fs::write(&seed_path, br#"[{"title": "Seeded"}]"#).unwrap();

        let store = DocumentStore::in_memory();
        store.recipes.insert_one(recipe("Existing", &["salt"])).await.unwrap();

        assert_eq!(store.seed_recipes(&seed_path).await.unwrap(), 0);
        assert_eq!(store.recipes.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::in_memory();

        let result = store.seed_recipes(&dir.path().join("absent.json")).await;
        assert!(matches!(result, Err(StoreError::Io { .. })));
    }

    // ============================================================
    // KEYED LOCK TESTS
    // ============================================================

    #[tokio::test]
    async fn test_lock_times_out_while_held() {
        let locks = KeyedLocks::new(Duration::from_millis(50));

        let _held = locks.acquire("user-1").await.unwrap();
        let second = locks.acquire("user-1").await;

        assert!(matches!(second, Err(StoreError::Timeout(key)) if key == "user-1"));
    }

    #[tokio::test]
    async fn test_different_keys_do_not_contend() {
        let locks = KeyedLocks::new(Duration::from_millis(50));

        let _a = locks.acquire("user-1").await.unwrap();
        let b = locks.acquire("user-2").await;

        assert!(b.is_ok(), "Other keys must not wait");
    }

    #[tokio::test]
    async fn test_lock_released_on_drop_and_pruned() {
        let locks = KeyedLocks::new(Duration::from_millis(50));

        {
            let _guard = locks.acquire("user-1").await.unwrap();
        }
        assert!(locks.acquire("user-1").await.is_ok());

        locks.prune();
        assert!(locks.is_empty(), "Unused entries should be pruned");
    }
}
