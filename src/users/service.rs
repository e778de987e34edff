use super::types::{PublicUser, UpdateProfileRequest, User, UserStats};
use crate::error::AppError;
use crate::likes;
use crate::storage::{Document, DocumentId, DocumentStore};

/// Served when a user has no profile picture.
pub const DEFAULT_PROFILE_PICTURE: &str = "/uploads/default-profile.png";

pub async fn find_by_email(
    store: &DocumentStore,
    email: &str,
) -> Result<Option<Document<User>>, AppError> {
    let email = normalize_email(email);
    Ok(store.users.find_one(|user| user.email == email).await?)
}

pub async fn get(store: &DocumentStore, user_id: &str) -> Result<Document<User>, AppError> {
    store
        .users
        .get(&DocumentId::from(user_id))
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Emails are compared case-insensitively and without surrounding blanks.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn profile_image_url(user: &User, public_url: &str) -> String {
    match user.profile_picture.as_deref().filter(|url| !url.is_empty()) {
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => url.to_string(),
        Some(path) => format!("{}{}", public_url.trim_end_matches('/'), path),
        None => format!("{}{}", public_url.trim_end_matches('/'), DEFAULT_PROFILE_PICTURE),
    }
}

pub async fn update_profile(
    store: &DocumentStore,
    user_id: &str,
    req: UpdateProfileRequest,
) -> Result<PublicUser, AppError> {
    let first_name = req.first_name.filter(|name| !name.trim().is_empty());
    let last_name = req.last_name.filter(|name| !name.trim().is_empty());

    if first_name.is_none() && last_name.is_none() {
        return Err(AppError::InvalidArgument("No name fields provided".to_string()));
    }

    let updated = store
        .users
        .update(&DocumentId::from(user_id), |user| {
            if let Some(first_name) = first_name {
                user.first_name = Some(first_name);
            }
            if let Some(last_name) = last_name {
                user.last_name = Some(last_name);
            }
        })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(updated.into())
}

/// Points the user's profile picture at an uploaded file.
pub async fn set_profile_picture(
    store: &DocumentStore,
    user_id: &str,
    picture: &str,
) -> Result<PublicUser, AppError> {
    let updated = store
        .users
        .update(&DocumentId::from(user_id), |user| {
            user.profile_picture = Some(picture.to_string());
        })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    tracing::info!("Updated profile picture of user {}", user_id);
    Ok(updated.into())
}

pub async fn remove_profile_picture(
    store: &DocumentStore,
    user_id: &str,
) -> Result<PublicUser, AppError> {
    let updated = store
        .users
        .update(&DocumentId::from(user_id), |user| {
            user.profile_picture = None;
        })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(updated.into())
}

pub async fn stats(store: &DocumentStore, user_id: &str) -> Result<UserStats, AppError> {
    let recipe_count = store
        .recipes
        .count(|recipe| recipe.user_id.as_deref() == Some(user_id))
        .await?;
    let liked_count = likes::service::count_for_user(store, user_id).await?;

    Ok(UserStats {
        recipe_count,
        liked_count,
    })
}
