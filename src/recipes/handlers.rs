use super::service;
use super::types::{
    CheckLikesRequest, CheckLikesResponse, CreateRecipeResponse, NewRecipe, RecipeView,
};
use crate::auth::extractor::AuthUser;
use crate::error::{AppError, MessageResponse};
use crate::likes;
use crate::state::AppState;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn handle_list_recipes(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RecipeView>>, AppError> {
    let recipes = service::list_all(&state.store, &state.config.public_url).await?;
    Ok(Json(recipes))
}

pub async fn handle_get_recipe(
    State(state): State<Arc<AppState>>,
    Path(recipe_id): Path<String>,
) -> Result<Json<RecipeView>, AppError> {
    let recipe = service::get_by_id(&state.store, &recipe_id, &state.config.public_url).await?;
    Ok(Json(recipe))
}

pub async fn handle_create_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<NewRecipe>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateRecipeResponse>), AppError> {
    let Json(req) = payload?;
    let recipe_id = service::create(&state.store, &user_id, req).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateRecipeResponse {
            message: "Recipe created successfully".to_string(),
            recipe_id: recipe_id.0,
        }),
    ))
}

pub async fn handle_delete_recipe(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Path(recipe_id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    service::delete(&state.store, &user_id, &recipe_id).await?;
    Ok(Json(MessageResponse::new("Recipe deleted successfully")))
}

pub async fn handle_check_likes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckLikesRequest>, JsonRejection>,
) -> Result<Json<CheckLikesResponse>, AppError> {
    let Json(req) = payload?;
    let (Some(recipe_ids), Some(user_id)) = (req.recipe_ids, req.user_id) else {
        return Err(AppError::InvalidArgument(
            "Recipe IDs and User ID are required".to_string(),
        ));
    };

    let liked_recipe_ids =
        likes::service::liked_recipe_ids(&state.store, &user_id, &recipe_ids).await?;
    Ok(Json(CheckLikesResponse { liked_recipe_ids }))
}
