use super::types::{NewRecipe, Recipe, RecipeView};
use crate::error::AppError;
use crate::storage::{DocumentId, DocumentStore};

use chrono::Utc;

pub async fn list_all(store: &DocumentStore, public_url: &str) -> Result<Vec<RecipeView>, AppError> {
    let recipes = store.recipes.find(|_| true).await?;

    Ok(recipes
        .into_iter()
        .map(|doc| RecipeView::from_document(doc, public_url))
        .collect())
}

pub async fn get_by_id(
    store: &DocumentStore,
    recipe_id: &str,
    public_url: &str,
) -> Result<RecipeView, AppError> {
    store
        .recipes
        .get(&DocumentId::from(recipe_id))
        .await?
        .map(|doc| RecipeView::from_document(doc, public_url))
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))
}

pub async fn list_by_owner(
    store: &DocumentStore,
    user_id: &str,
    public_url: &str,
) -> Result<Vec<RecipeView>, AppError> {
    let recipes = store
        .recipes
        .find(|recipe| recipe.user_id.as_deref() == Some(user_id))
        .await?;

    Ok(recipes
        .into_iter()
        .map(|doc| RecipeView::from_document(doc, public_url))
        .collect())
}

/// Validates and stores a new recipe owned by `user_id`.
pub async fn create(
    store: &DocumentStore,
    user_id: &str,
    new_recipe: NewRecipe,
) -> Result<DocumentId, AppError> {
    let title = new_recipe
        .title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty());
    let instructions = new_recipe
        .instructions
        .filter(|instructions| !instructions.trim().is_empty());
    let ingredients: Vec<String> = new_recipe
        .ingredients
        .map(|field| field.into_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|ingredient| ingredient.trim().to_string())
        .filter(|ingredient| !ingredient.is_empty())
        .collect();

    let (Some(title), Some(instructions)) = (title, instructions) else {
        return Err(AppError::InvalidArgument("Missing required fields".to_string()));
    };
    if ingredients.is_empty() {
        return Err(AppError::InvalidArgument("Missing required fields".to_string()));
    }

    let recipe = Recipe {
        title,
        instructions,
        ingredients,
        image: new_recipe.image.filter(|image| !image.trim().is_empty()),
        user_id: Some(user_id.to_string()),
        created_at: Some(Utc::now()),
    };

    let recipe_id = store.recipes.insert_one(recipe).await?;
    tracing::info!("User {} created recipe {}", user_id, recipe_id);
    Ok(recipe_id)
}

/// Deletes a recipe. Owned recipes may only be deleted by their owner;
/// unowned legacy recipes by any authenticated user.
pub async fn delete(store: &DocumentStore, user_id: &str, recipe_id: &str) -> Result<(), AppError> {
    let id = DocumentId::from(recipe_id);
    let recipe = store
        .recipes
        .get(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Recipe not found".to_string()))?;

    if let Some(owner) = recipe.body.user_id.as_deref()
        && owner != user_id
    {
        tracing::warn!("User {} tried to delete recipe {} owned by {}", user_id, recipe_id, owner);
        return Err(AppError::Forbidden(
            "You can only delete your own recipes".to_string(),
        ));
    }

    if !store.recipes.delete_one(&id).await? {
        return Err(AppError::NotFound("Recipe not found".to_string()));
    }

    tracing::info!("User {} deleted recipe {}", user_id, recipe_id);
    Ok(())
}
