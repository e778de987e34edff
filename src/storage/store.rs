use super::memory::{Collection, Lifecycle};
use super::snapshot;
use super::types::StoreError;
use crate::history::types::SearchHistoryEntry;
use crate::likes::types::Like;
use crate::recipes::types::Recipe;
use crate::users::types::User;

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const RECIPES: &str = "recipes";
pub const USERS: &str = "users";
pub const LIKES: &str = "likes";
pub const USER_SEARCHES: &str = "user_searches";

/// Handle to every collection the service uses.
///
/// Created once at startup and shared behind an `Arc`. [`DocumentStore::close`]
/// flushes snapshots (when a data directory is configured) and rejects every
/// later operation with [`StoreError::Closed`].
pub struct DocumentStore {
    pub recipes: Collection<Recipe>,
    pub users: Collection<User>,
    pub likes: Collection<Like>,
    pub searches: Collection<SearchHistoryEntry>,
    lifecycle: Arc<Lifecycle>,
    data_dir: Option<PathBuf>,
}

impl DocumentStore {
    /// A volatile store with no snapshot directory.
    pub fn in_memory() -> Self {
        let lifecycle = Lifecycle::new();

        Self {
            recipes: Collection::new(RECIPES, lifecycle.clone()),
            users: Collection::new(USERS, lifecycle.clone()),
            likes: Collection::new(LIKES, lifecycle.clone()),
            searches: Collection::new(USER_SEARCHES, lifecycle.clone()),
            lifecycle,
            data_dir: None,
        }
    }

    /// Opens a store, restoring every collection from `data_dir` when given.
    pub async fn open(data_dir: Option<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::in_memory();

        if let Some(dir) = data_dir {
            restore_collection(&store.recipes, &dir).await?;
            restore_collection(&store.users, &dir).await?;
            restore_collection(&store.likes, &dir).await?;
            restore_collection(&store.searches, &dir).await?;
            store.data_dir = Some(dir);
        }

        Ok(store)
    }

    pub fn is_open(&self) -> bool {
        self.lifecycle.is_open()
    }

    /// Imports legacy recipe records from a JSON array, but only into an
    /// empty recipes collection. Returns the number of imported recipes.
    pub async fn seed_recipes(&self, path: &Path) -> Result<usize, StoreError> {
        if !self.recipes.is_empty() {
            tracing::info!("Recipes already present, skipping seed {}", path.display());
            return Ok(0);
        }

        let bytes = tokio::fs::read(path).await.map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let recipes: Vec<Recipe> =
            serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
                path: path.display().to_string(),
                source,
            })?;

        let count = recipes.len();
        for recipe in recipes {
            self.recipes.insert_one(recipe).await?;
        }

        tracing::info!("Seeded {} recipes from {}", count, path.display());
        Ok(count)
    }

    /// Writes every collection to the data directory. No-op for a volatile store.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };

        save_collection(&self.recipes, dir).await?;
        save_collection(&self.users, dir).await?;
        save_collection(&self.likes, dir).await?;
        save_collection(&self.searches, dir).await?;
        Ok(())
    }

    pub async fn close(&self) -> Result<(), StoreError> {
        if !self.is_open() {
            return Ok(());
        }

        let flushed = self.flush().await;
        self.lifecycle.close();
        tracing::info!("Document store closed");
        flushed
    }
}

async fn restore_collection<T>(collection: &Collection<T>, dir: &Path) -> Result<(), StoreError>
where
    T: Clone + Send + Sync + DeserializeOwned,
{
    let docs = snapshot::load::<T>(dir, collection.name()).await?;
    tracing::info!("Restored {} documents into '{}'", docs.len(), collection.name());
    collection.restore(docs);
    Ok(())
}

async fn save_collection<T>(collection: &Collection<T>, dir: &Path) -> Result<(), StoreError>
where
    T: Clone + Send + Sync + Serialize,
{
    snapshot::save(dir, collection.name(), &collection.dump()).await
}
