//! Federated Identity Verification
//!
//! Sign-in with an ID token issued by an external identity provider. The
//! provider is abstracted behind `FederatedVerifier` so the account logic does
//! not depend on a live network call.

use crate::error::AppError;

use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

pub const GOOGLE_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";

/// The verified claims of an ID token.
#[derive(Debug, Clone, PartialEq)]
pub struct FederatedIdentity {
    /// Provider-scoped, stable user id (`sub`).
    pub subject: String,
    /// Only set when the provider vouches for the address.
    pub email: Option<String>,
}

pub type VerifyFuture<'a> =
    Pin<Box<dyn Future<Output = Result<FederatedIdentity, AppError>> + Send + 'a>>;

pub trait FederatedVerifier: Send + Sync {
    fn verify<'a>(&'a self, id_token: &'a str) -> VerifyFuture<'a>;
}

/// Verifies Google ID tokens with the token-info endpoint and checks that the
/// token was issued for our client id.
pub struct GoogleVerifier {
    http_client: reqwest::Client,
    client_id: Option<String>,
    endpoint: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenInfo {
    aud: String,
    sub: String,
    email: Option<String>,
    /// The token-info endpoint sends this as the string `"true"`.
    email_verified: Option<serde_json::Value>,
}

impl TokenInfo {
    pub(crate) fn verified_email(self) -> Option<String> {
        let verified = match self.email_verified {
            Some(serde_json::Value::Bool(flag)) => flag,
            Some(serde_json::Value::String(flag)) => flag.eq_ignore_ascii_case("true"),
            _ => false,
        };
        self.email.filter(|_| verified)
    }
}

impl GoogleVerifier {
    pub fn new(client_id: Option<String>) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            client_id,
            endpoint: GOOGLE_TOKENINFO_URL.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    async fn verify_remote(&self, id_token: &str) -> Result<FederatedIdentity, AppError> {
        let Some(client_id) = self.client_id.as_deref() else {
            return Err(AppError::Unauthorized(
                "Federated sign-in is not configured".to_string(),
            ));
        };

        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[("id_token", id_token)])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Token verification request failed: {}", e)))?;

        if !response.status().is_success() {
            tracing::debug!("Identity provider rejected token: {}", response.status());
            return Err(AppError::Unauthorized("Authentication failed".to_string()));
        }

        let info: TokenInfo = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Malformed token info response: {}", e)))?;

        if info.aud != client_id {
            tracing::warn!("ID token issued for another audience: {}", info.aud);
            return Err(AppError::Unauthorized("Authentication failed".to_string()));
        }

        let subject = info.sub.clone();
        Ok(FederatedIdentity {
            subject,
            email: info.verified_email(),
        })
    }
}

impl FederatedVerifier for GoogleVerifier {
    fn verify<'a>(&'a self, id_token: &'a str) -> VerifyFuture<'a> {
        Box::pin(self.verify_remote(id_token))
    }
}
