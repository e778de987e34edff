use super::query::IngredientQuery;
use crate::error::AppError;
use crate::recipes::types::Recipe;
use crate::storage::{Document, DocumentStore};

/// Returns every recipe whose ingredients contain all terms of `raw_query`,
/// in store insertion order.
pub async fn search(
    store: &DocumentStore,
    raw_query: Option<&str>,
) -> Result<(IngredientQuery, Vec<Document<Recipe>>), AppError> {
    let query = IngredientQuery::parse(raw_query)?;

    let matches = store
        .recipes
        .find(|recipe| query.matches(&recipe.ingredients))
        .await?;

    tracing::debug!(
        "Ingredient search {:?} matched {} recipes",
        query.terms(),
        matches.len()
    );
    Ok((query, matches))
}
