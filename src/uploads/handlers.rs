use super::blob::profile_prefix;
use super::types::UploadResponse;
use crate::auth::extractor::AuthUser;
use crate::error::AppError;
use crate::state::AppState;
use crate::users;
use crate::users::types::UserResponse;

use axum::Json;
use axum::extract::{Multipart, State};
use std::sync::Arc;

const FILE_FIELD: &str = "image";

struct UploadedFile {
    name: String,
    bytes: Vec<u8>,
}

/// Pulls the `image` field out of a multipart body.
async fn read_image_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidArgument(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidArgument(format!("Malformed upload: {}", e)))?;

        return Ok(UploadedFile {
            name,
            bytes: bytes.to_vec(),
        });
    }

    Err(AppError::InvalidArgument("No file uploaded".to_string()))
}

pub async fn handle_upload_image(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_image_field(&mut multipart).await?;
    let image_url = state.blobs.save("", &file.name, &file.bytes).await?;

    Ok(Json(UploadResponse {
        message: "File uploaded successfully".to_string(),
        image_url,
    }))
}

pub async fn handle_upload_profile_picture(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    mut multipart: Multipart,
) -> Result<Json<UserResponse>, AppError> {
    // Fail before writing anything for a token whose user is gone.
    users::service::get(&state.store, &user_id).await?;

    let file = read_image_field(&mut multipart).await?;
    let picture = state
        .blobs
        .save(&profile_prefix(&user_id), &file.name, &file.bytes)
        .await?;

    let user = users::service::set_profile_picture(&state.store, &user_id, &picture).await?;
    Ok(Json(UserResponse {
        message: "Profile picture updated successfully".to_string(),
        user,
    }))
}
