use super::service;
use super::types::{IsLikedResponse, ToggleLikeResponse};
use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

use axum::Json;
use axum::extract::{Path, State};
use std::sync::Arc;

pub async fn handle_toggle_like(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<ToggleLikeResponse>, AppError> {
    let liked = service::toggle(&state.store, &state.like_locks, &user_id, &recipe_id).await?;
    Ok(Json(ToggleLikeResponse { liked }))
}

pub async fn handle_is_liked(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<IsLikedResponse>, AppError> {
    let is_liked = service::is_liked(&state.store, &user_id, &recipe_id).await?;
    Ok(Json(IsLikedResponse { is_liked }))
}
