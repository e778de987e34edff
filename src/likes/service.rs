use super::types::Like;
use crate::error::AppError;
use crate::recipes::types::RecipeView;
use crate::storage::{DocumentId, DocumentStore, KeyedLocks};

use chrono::Utc;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Flips the like of `user_id` on `recipe_id` and returns the new state.
///
/// Liking requires the recipe to exist; unliking does not, so likes on
/// deleted recipes can still be removed.
pub async fn toggle(
    store: &DocumentStore,
    locks: &KeyedLocks,
    user_id: &str,
    recipe_id: &str,
) -> Result<bool, AppError> {
    let _guard = locks.acquire(user_id).await?;

    let existing = store
        .likes
        .find(|like| like.user_id == user_id && like.recipe_id == recipe_id)
        .await?;

    if !existing.is_empty() {
        let ids: Vec<DocumentId> = existing.into_iter().map(|doc| doc.id).collect();
        store.likes.delete_many(&ids).await?;
        tracing::debug!("User {} unliked recipe {}", user_id, recipe_id);
        return Ok(false);
    }

    if store
        .recipes
        .get(&DocumentId::from(recipe_id))
        .await?
        .is_none()
    {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }

    store
        .likes
        .insert_one(Like {
            user_id: user_id.to_string(),
            recipe_id: recipe_id.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    tracing::debug!("User {} liked recipe {}", user_id, recipe_id);
    Ok(true)
}

pub async fn is_liked(store: &DocumentStore, user_id: &str, recipe_id: &str) -> Result<bool, AppError> {
    let count = store
        .likes
        .count(|like| like.user_id == user_id && like.recipe_id == recipe_id)
        .await?;
    Ok(count > 0)
}

pub async fn count_for_user(store: &DocumentStore, user_id: &str) -> Result<usize, AppError> {
    Ok(store.likes.count(|like| like.user_id == user_id).await?)
}

/// The subset of `recipe_ids` liked by `user_id`, in request order, without
/// duplicates.
pub async fn liked_recipe_ids(
    store: &DocumentStore,
    user_id: &str,
    recipe_ids: &[String],
) -> Result<Vec<String>, AppError> {
    let liked: HashSet<String> = store
        .likes
        .find(|like| like.user_id == user_id)
        .await?
        .into_iter()
        .map(|doc| doc.body.recipe_id)
        .collect();

    let mut seen = HashSet::new();
    Ok(recipe_ids
        .iter()
        .filter(|id| liked.contains(*id) && seen.insert(id.as_str()))
        .cloned()
        .collect())
}

/// Recipes liked by `user_id`, most recently liked first. Likes pointing at
/// deleted recipes are skipped.
pub async fn liked_recipes(
    store: &DocumentStore,
    user_id: &str,
    public_url: &str,
) -> Result<Vec<RecipeView>, AppError> {
    let mut likes = store.likes.find(|like| like.user_id == user_id).await?;
    likes.sort_by_key(|doc| Reverse((doc.body.created_at, doc.seq)));

    let mut recipes = Vec::with_capacity(likes.len());
    for like in likes {
        match store
            .recipes
            .get(&DocumentId::from(like.body.recipe_id.as_str()))
            .await?
        {
            Some(recipe) => recipes.push(RecipeView::from_document(recipe, public_url)),
            None => {
                tracing::debug!("Skipping like on missing recipe {}", like.body.recipe_id);
            }
        }
    }

    Ok(recipes)
}
