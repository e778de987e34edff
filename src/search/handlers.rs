use super::engine::search;
use super::types::{SearchParams, SearchResponse};
use crate::error::AppError;
use crate::recipes::types::RecipeView;
use crate::state::AppState;

use axum::Json;
use axum::extract::{Query, State};
use std::sync::Arc;

pub async fn handle_search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    let (query, matches) = search(&state.store, params.query.as_deref()).await?;

    let recipes: Vec<RecipeView> = matches
        .into_iter()
        .map(|doc| RecipeView::from_document(doc, &state.config.public_url))
        .collect();

    Ok(Json(SearchResponse {
        query: params.query.unwrap_or_default(),
        terms: query.terms().to_vec(),
        count: recipes.len(),
        recipes,
    }))
}
