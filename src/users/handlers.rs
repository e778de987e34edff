use super::service;
use super::types::{CurrentUserResponse, UpdateProfileRequest, UserResponse, UserStats};
use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::likes;
use crate::recipes;
use crate::recipes::types::RecipeView;
use crate::state::AppState;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use std::sync::Arc;

pub async fn handle_current_user(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<CurrentUserResponse>, AppError> {
    let doc = service::get(&state.store, &user_id).await?;
    let profile_image_url = service::profile_image_url(&doc.body, &state.config.public_url);

    Ok(Json(CurrentUserResponse {
        user: doc.into(),
        profile_image_url,
    }))
}

pub async fn handle_update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserResponse>, AppError> {
    let Json(req) = payload?;
    let user = service::update_profile(&state.store, &user_id, req).await?;

    Ok(Json(UserResponse {
        message: "Profile updated successfully".to_string(),
        user,
    }))
}

pub async fn handle_remove_profile_picture(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = service::remove_profile_picture(&state.store, &user_id).await?;

    Ok(Json(UserResponse {
        message: "Profile picture removed successfully".to_string(),
        user,
    }))
}

pub async fn handle_user_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<UserStats>, AppError> {
    Ok(Json(service::stats(&state.store, &user_id).await?))
}

pub async fn handle_user_recipes(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecipeView>>, AppError> {
    let recipes =
        recipes::service::list_by_owner(&state.store, &user_id, &state.config.public_url).await?;
    Ok(Json(recipes))
}

pub async fn handle_my_liked_recipes(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecipeView>>, AppError> {
    let recipes =
        likes::service::liked_recipes(&state.store, &user_id, &state.config.public_url).await?;
    Ok(Json(recipes))
}

pub async fn handle_liked_recipes(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<RecipeView>>, AppError> {
    let recipes =
        likes::service::liked_recipes(&state.store, &user_id, &state.config.public_url).await?;
    Ok(Json(recipes))
}
