use super::federated::FederatedVerifier;
use super::mailer::{Mail, Mailer};
use super::password;
use super::token::TokenIssuer;
use super::types::{AuthResponse, GoogleSignInRequest, RegisterResponse};
use crate::error::AppError;
use crate::storage::{DocumentId, DocumentStore, KeyedLocks};
use crate::users::service::{find_by_email, normalize_email};
use crate::users::types::User;

use chrono::{Duration, Utc};

pub const RESET_TOKEN_TTL_MINUTES: i64 = 60;

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid email or password".to_string())
}

/// Creates a password account. Registrations for the same email are
/// serialized so two concurrent requests cannot both succeed.
pub async fn register(
    store: &DocumentStore,
    locks: &KeyedLocks,
    tokens: &TokenIssuer,
    email: Option<String>,
    password: Option<String>,
) -> Result<RegisterResponse, AppError> {
    let (Some(email), Some(password)) = (required(email), password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::InvalidArgument(
            "Email and password are required".to_string(),
        ));
    };
    let email = normalize_email(&email);

    let _guard = locks.acquire(&email).await?;

    if find_by_email(store, &email).await?.is_some() {
        return Err(AppError::InvalidArgument("Email already registered".to_string()));
    }

    let password_hash = password::hash_password_blocking(password).await?;
    let mut user = User::new(&email);
    user.password_hash = Some(password_hash);

    let user_id = store.users.insert_one(user).await?;
    let token = tokens.issue(user_id.as_str())?;

    tracing::info!("Registered user {} ({})", user_id, email);
    Ok(RegisterResponse {
        message: "User registered successfully".to_string(),
        token,
        user_id: user_id.0,
        email,
    })
}

pub async fn login(
    store: &DocumentStore,
    tokens: &TokenIssuer,
    email: Option<String>,
    password: Option<String>,
) -> Result<AuthResponse, AppError> {
    let (Some(email), Some(password)) = (required(email), password.filter(|p| !p.is_empty()))
    else {
        return Err(AppError::InvalidArgument(
            "Email and password are required".to_string(),
        ));
    };

    let Some(user) = find_by_email(store, &email).await? else {
        return Err(invalid_credentials());
    };
    let Some(stored_hash) = user.body.password_hash.clone() else {
        // Federated-only account.
        return Err(invalid_credentials());
    };

    if !password::verify_password_blocking(password, stored_hash).await? {
        return Err(invalid_credentials());
    }

    let token = tokens.issue(user.id.as_str())?;
    tracing::debug!("User {} logged in", user.id);
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

/// Signs in with a verified ID token.
///
/// The account is found by federated subject first, then by the provider's
/// verified email. An email match already linked to a different subject is
/// refused. Unknown identities get a new account.
pub async fn federated_sign_in(
    store: &DocumentStore,
    locks: &KeyedLocks,
    tokens: &TokenIssuer,
    verifier: &dyn FederatedVerifier,
    req: GoogleSignInRequest,
) -> Result<AuthResponse, AppError> {
    let Some(id_token) = required(req.id_token) else {
        return Err(AppError::InvalidArgument("ID token is required".to_string()));
    };

    let identity = verifier.verify(&id_token).await?;
    let Some(email) = identity.email.as_deref().map(normalize_email) else {
        tracing::warn!("ID token for subject {} carries no verified email", identity.subject);
        return Err(AppError::Unauthorized("Authentication failed".to_string()));
    };

    let _guard = locks.acquire(&email).await?;

    let subject = identity.subject.as_str();
    let linked = store
        .users
        .find_one(|user| user.google_id.as_deref() == Some(subject))
        .await?;

    let user = match linked {
        Some(linked) => linked,
        None => match find_by_email(store, &email).await? {
            Some(existing) if existing.body.google_id.is_some() => {
                tracing::warn!(
                    "Subject {} tried to sign in to user {} linked to another identity",
                    subject,
                    existing.id
                );
                return Err(AppError::Unauthorized("Authentication failed".to_string()));
            }
            Some(existing) => {
                let google_id = subject.to_string();
                store
                    .users
                    .update(&existing.id, |user| user.google_id = Some(google_id))
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            }
            None => {
                let mut user = User::new(&email);
                user.google_id = Some(subject.to_string());
                user.first_name = required(req.first_name);
                user.last_name = required(req.last_name);
                user.profile_picture = required(req.profile_picture);

                let user_id = store.users.insert_one(user).await?;
                tracing::info!("Created federated user {} ({})", user_id, email);
                store
                    .users
                    .get(&user_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("User not found".to_string()))?
            }
        },
    };

    let token = tokens.issue(user.id.as_str())?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

/// Stores a one-hour reset token on the account and mails the reset link.
pub async fn request_password_reset(
    store: &DocumentStore,
    mailer: &dyn Mailer,
    public_url: &str,
    email: Option<String>,
) -> Result<(), AppError> {
    let Some(email) = required(email) else {
        return Err(AppError::InvalidArgument("Email is required".to_string()));
    };

    let Some(user) = find_by_email(store, &email).await? else {
        return Err(AppError::NotFound("User not found".to_string()));
    };

    let reset_token = hex::encode(rand::random::<[u8; 32]>());
    let expiry = Utc::now() + Duration::minutes(RESET_TOKEN_TTL_MINUTES);

    let stored_token = reset_token.clone();
    store
        .users
        .update(&user.id, move |user| {
            user.reset_token = Some(stored_token);
            user.reset_token_expiry = Some(expiry);
        })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let link = format!(
        "{}/reset-password?token={}",
        public_url.trim_end_matches('/'),
        reset_token
    );
    mailer
        .send(Mail {
            to: user.body.email.clone(),
            subject: "Password reset".to_string(),
            body: format!(
                "A password reset was requested for your account.\n\
                 Open this link within one hour to choose a new password:\n{}",
                link
            ),
        })
        .await?;

    tracing::info!("Issued password reset token for user {}", user.id);
    Ok(())
}

pub async fn reset_password(
    store: &DocumentStore,
    token: &str,
    password: Option<String>,
) -> Result<(), AppError> {
    let token = token.trim();
    let Some(password) = password.filter(|p| !p.is_empty()) else {
        return Err(AppError::InvalidArgument("Password is required".to_string()));
    };
    if token.is_empty() {
        return Err(AppError::InvalidArgument(
            "Invalid or expired reset token".to_string(),
        ));
    }

    let now = Utc::now();
    let user = store
        .users
        .find_one(|user| {
            user.reset_token.as_deref() == Some(token)
                && user.reset_token_expiry.is_some_and(|expiry| expiry > now)
        })
        .await?
        .ok_or_else(|| AppError::InvalidArgument("Invalid or expired reset token".to_string()))?;

    let password_hash = password::hash_password_blocking(password).await?;
    update_password(store, &user.id, password_hash).await?;

    tracing::info!("Password reset for user {}", user.id);
    Ok(())
}

async fn update_password(
    store: &DocumentStore,
    user_id: &DocumentId,
    password_hash: String,
) -> Result<(), AppError> {
    store
        .users
        .update(user_id, move |user| {
            user.password_hash = Some(password_hash);
            user.reset_token = None;
            user.reset_token_expiry = None;
        })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(())
}
