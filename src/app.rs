use crate::auth::handlers::{
    handle_google_sign_in, handle_login, handle_register, handle_reset_password,
    handle_reset_request,
};
use crate::error::MessageResponse;
use crate::history::handlers::{handle_recent_searches, handle_save_search};
use crate::likes::handlers::{handle_is_liked, handle_toggle_like};
use crate::recipes::handlers::{
    handle_check_likes, handle_create_recipe, handle_delete_recipe, handle_get_recipe,
    handle_list_recipes,
};
use crate::search::handlers::handle_search;
use crate::state::AppState;
use crate::uploads::blob::MAX_UPLOAD_BYTES;
use crate::uploads::handlers::{handle_upload_image, handle_upload_profile_picture};
use crate::users::handlers::{
    handle_current_user, handle_liked_recipes, handle_my_liked_recipes,
    handle_remove_profile_picture, handle_update_profile, handle_user_recipes, handle_user_stats,
};

use axum::extract::DefaultBodyLimit;
use axum::http::Method;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Multipart framing on top of the largest accepted file.
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    let upload_limit = DefaultBodyLimit::max(UPLOAD_BODY_LIMIT);

    Router::new()
        .route("/", get(handle_root))
        // Accounts:
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route("/api/auth/google", post(handle_google_sign_in))
        .route("/api/auth/reset-password-request", post(handle_reset_request))
        .route("/api/auth/reset-password/:token", post(handle_reset_password))
        // Recipes:
        .route(
            "/api/recipes",
            get(handle_list_recipes).post(handle_create_recipe),
        )
        .route("/api/recipes/search", get(handle_search))
        .route("/api/recipes/check-likes", post(handle_check_likes))
        .route(
            "/api/recipes/:id",
            get(handle_get_recipe).delete(handle_delete_recipe),
        )
        // Users:
        .route(
            "/api/users/me",
            get(handle_current_user).patch(handle_update_profile),
        )
        .route(
            "/api/users/me/profile-picture",
            delete(handle_remove_profile_picture),
        )
        .route("/api/users/stats", get(handle_user_stats))
        .route("/api/users/recipes", get(handle_user_recipes))
        .route("/api/users/liked-recipes", get(handle_my_liked_recipes))
        .route(
            "/api/users/:user_id/searches",
            get(handle_recent_searches).post(handle_save_search),
        )
        .route("/api/users/:user_id/liked-recipes", get(handle_liked_recipes))
        // Likes:
        .route("/api/likes/:recipe_id/toggle-like", post(handle_toggle_like))
        .route("/api/likes/:recipe_id/is-liked", get(handle_is_liked))
        // Uploads:
        .route(
            "/api/upload",
            post(handle_upload_image).layer(upload_limit),
        )
        .route(
            "/api/upload/profile-picture",
            post(handle_upload_profile_picture).layer(upload_limit),
        )
        .nest_service("/uploads", ServeDir::new(&state.config.upload_dir))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn handle_root() -> Json<MessageResponse> {
    Json(MessageResponse::new("Welcome to the Cookbook API"))
}
