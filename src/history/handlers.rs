use super::types::SaveSearchRequest;
use crate::error::{AppError, MessageResponse};
use crate::state::AppState;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn handle_save_search(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    payload: Result<Json<SaveSearchRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    let Json(req) = payload?;
    state
        .history
        .record_search(&user_id, req.query.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Search saved successfully")),
    ))
}

pub async fn handle_recent_searches(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<String>>, AppError> {
    let searches = state.history.list_recent(&user_id).await?;
    Ok(Json(searches))
}
