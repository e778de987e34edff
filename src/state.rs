use crate::auth::federated::{FederatedVerifier, GoogleVerifier};
use crate::auth::mailer::{LogMailer, Mailer};
use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::history::tracker::RecentSearchTracker;
use crate::storage::{DocumentStore, KeyedLocks, StoreError};
use crate::uploads::BlobStore;

use std::sync::Arc;

/// Everything the handlers share.
pub struct AppState {
    pub config: Config,
    pub store: Arc<DocumentStore>,
    pub history: RecentSearchTracker,
    /// Serializes like toggles per user.
    pub like_locks: KeyedLocks,
    /// Serializes account creation per email.
    pub account_locks: KeyedLocks,
    pub tokens: TokenIssuer,
    pub verifier: Arc<dyn FederatedVerifier>,
    pub mailer: Arc<dyn Mailer>,
    pub blobs: BlobStore,
}

impl AppState {
    /// Opens the store (restoring snapshots and seeding recipes) and wires the
    /// production collaborators.
    pub async fn new(config: Config) -> Result<Arc<Self>, StoreError> {
        let store = Arc::new(DocumentStore::open(config.data_dir.clone()).await?);

        if let Some(seed) = &config.recipe_seed {
            store.seed_recipes(seed).await?;
        }

        let verifier = Arc::new(GoogleVerifier::new(config.google_client_id.clone()));
        Ok(Arc::new(Self::with_parts(
            config,
            store,
            verifier,
            Arc::new(LogMailer),
        )))
    }

    pub fn with_parts(
        config: Config,
        store: Arc<DocumentStore>,
        verifier: Arc<dyn FederatedVerifier>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let history_locks = KeyedLocks::new(config.store_timeout);

        Self {
            history: RecentSearchTracker::new(store.clone(), history_locks),
            like_locks: KeyedLocks::new(config.store_timeout),
            account_locks: KeyedLocks::new(config.store_timeout),
            tokens: TokenIssuer::new(&config.jwt_secret),
            blobs: BlobStore::new(config.upload_dir.clone()),
            verifier,
            mailer,
            store,
            config,
        }
    }
}
