use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Document;

/// A stored account.
///
/// Password accounts carry `password_hash`; federated accounts carry
/// `google_id` and may have no password at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    pub password_hash: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub google_id: Option<String>,
    pub reset_token: Option<String>,
    pub reset_token_expiry: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: &str) -> Self {
        Self {
            email: email.to_string(),
            password_hash: None,
            first_name: None,
            last_name: None,
            profile_picture: None,
            google_id: None,
            reset_token: None,
            reset_token_expiry: None,
            created_at: Utc::now(),
        }
    }
}

/// What clients may see of a user. Never includes credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
}

impl From<Document<User>> for PublicUser {
    fn from(doc: Document<User>) -> Self {
        Self {
            id: doc.id.0,
            email: doc.body.email,
            first_name: doc.body.first_name,
            last_name: doc.body.last_name,
            profile_picture: doc.body.profile_picture,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUserResponse {
    #[serde(flatten)]
    pub user: PublicUser,
    pub profile_image_url: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub recipe_count: usize,
    pub liked_count: usize,
}
