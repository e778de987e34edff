//! Likes Module Tests

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::likes::service;
    use crate::recipes::types::Recipe;
    use crate::storage::{DocumentStore, KeyedLocks};
    use std::sync::Arc;
    use std::time::Duration;

    const BASE: &str = "http://localhost:3000";

    fn locks() -> KeyedLocks {
        KeyedLocks::new(Duration::from_secs(2))
    }

    async fn add_recipe(store: &DocumentStore, title: &str) -> String {
        store
            .recipes
            .insert_one(Recipe {
                title: title.to_string(),
                instructions: "Cook.".to_string(),
                ingredients: vec!["salt".to_string()],
                image: None,
                user_id: None,
                created_at: None,
            })
            .await
            .unwrap()
            .0
    }

    // ============================================================
    // TOGGLE TESTS
    // ============================================================

    #[tokio::test]
    async fn test_toggle_flips_state() {
        let store = DocumentStore::in_memory();
        let locks = locks();
        let recipe = add_recipe(&store, "Soup").await;

        assert!(service::toggle(&store, &locks, "u1", &recipe).await.unwrap());
        assert!(service::is_liked(&store, "u1", &recipe).await.unwrap());

        assert!(!service::toggle(&store, &locks, "u1", &recipe).await.unwrap());
        assert!(!service::is_liked(&store, "u1", &recipe).await.unwrap());
        assert!(store.likes.is_empty());
    }

    #[tokio::test]
    async fn test_like_unknown_recipe_is_not_found() {
        let store = DocumentStore::in_memory();

        let result = service::toggle(&store, &locks(), "u1", "missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unlike_after_recipe_deleted() {
        let store = DocumentStore::in_memory();
        let locks = locks();
        let recipe = add_recipe(&store, "Soup").await;
        service::toggle(&store, &locks, "u1", &recipe).await.unwrap();

        store.recipes.delete_one(&recipe.as_str().into()).await.unwrap();

        assert!(!service::toggle(&store, &locks, "u1", &recipe).await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_toggles_never_duplicate() {
        // ARRANGE
        let store = Arc::new(DocumentStore::in_memory());
        let locks = locks();
        let recipe = add_recipe(&store, "Soup").await;

        // ACT: an odd number of toggles must end liked, with exactly one like.
        let handles: Vec<_> = (0..9)
            .map(|_| {
                let store = store.clone();
                let locks = locks.clone();
                let recipe = recipe.clone();
                tokio::spawn(async move { service::toggle(&store, &locks, "u1", &recipe).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        // ASSERT
        assert_eq!(store.likes.len(), 1);
        assert!(service::is_liked(&store, "u1", &recipe).await.unwrap());
    }

    // ============================================================
    // QUERY TESTS
    // ============================================================

    #[tokio::test]
    async fn test_liked_recipe_ids_keeps_request_order() {
        let store = DocumentStore::in_memory();
        let locks = locks();
        let a = add_recipe(&store, "A").await;
        let b = add_recipe(&store, "B").await;
        let c = add_recipe(&store, "C").await;
        service::toggle(&store, &locks, "u1", &a).await.unwrap();
        service::toggle(&store, &locks, "u1", &c).await.unwrap();
        service::toggle(&store, &locks, "u2", &b).await.unwrap();

        let request = vec![c.clone(), b.clone(), a.clone(), c.clone()];
        let liked = service::liked_recipe_ids(&store, "u1", &request).await.unwrap();

        assert_eq!(liked, vec![c, a]);
    }

    #[tokio::test]
    async fn test_liked_recipes_newest_first_skipping_deleted() {
        // ARRANGE
        let store = DocumentStore::in_memory();
        let locks = locks();
        let first = add_recipe(&store, "First").await;
        let second = add_recipe(&store, "Second").await;
        let gone = add_recipe(&store, "Gone").await;
        for recipe in [&first, &second, &gone] {
            service::toggle(&store, &locks, "u1", recipe).await.unwrap();
        }
        store.recipes.delete_one(&gone.as_str().into()).await.unwrap();

        // ACT
        let recipes = service::liked_recipes(&store, "u1", BASE).await.unwrap();

        // ASSERT
        let titles: Vec<&str> = recipes.iter().map(|view| view.recipe.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "First"]);
        assert_eq!(service::count_for_user(&store, "u1").await.unwrap(), 3);
    }
}
