use super::service;
use super::types::{
    AuthResponse, CredentialsRequest, GoogleSignInRequest, NewPasswordRequest, RegisterResponse,
    ResetRequest,
};
use crate::error::{AppError, MessageResponse};
use crate::state::AppState;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn handle_register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(req) = payload?;
    let response = service::register(
        &state.store,
        &state.account_locks,
        &state.tokens,
        req.email,
        req.password,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn handle_login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;
    let response = service::login(&state.store, &state.tokens, req.email, req.password).await?;
    Ok(Json(response))
}

pub async fn handle_google_sign_in(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GoogleSignInRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;
    let response = service::federated_sign_in(
        &state.store,
        &state.account_locks,
        &state.tokens,
        state.verifier.as_ref(),
        req,
    )
    .await?;
    Ok(Json(response))
}

pub async fn handle_reset_request(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ResetRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    service::request_password_reset(
        &state.store,
        state.mailer.as_ref(),
        &state.config.public_url,
        req.email,
    )
    .await?;
    Ok(Json(MessageResponse::new("Password reset email sent")))
}

pub async fn handle_reset_password(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
    payload: Result<Json<NewPasswordRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(req) = payload?;
    service::reset_password(&state.store, &token, req.password).await?;
    Ok(Json(MessageResponse::new("Password has been reset")))
}
