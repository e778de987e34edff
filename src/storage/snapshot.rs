//! JSON snapshots of whole collections.
//!
//! One file per collection, `<dir>/<collection>.json`, holding the dumped
//! documents in insertion order. Writes go to a temporary file first and are
//! renamed into place so a crash mid-write never truncates the last snapshot.

use super::types::{Document, StoreError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub fn snapshot_path(dir: &Path, collection: &str) -> PathBuf {
    dir.join(format!("{}.json", collection))
}

/// Reads a collection snapshot. A missing file is an empty collection.
pub async fn load<T: DeserializeOwned>(
    dir: &Path,
    collection: &str,
) -> Result<Vec<Document<T>>, StoreError> {
    let path = snapshot_path(dir, collection);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::info!("No snapshot for '{}' at {}", collection, path.display());
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed {
        path: path.display().to_string(),
        source,
    })
}

pub async fn save<T: Serialize>(
    dir: &Path,
    collection: &str,
    docs: &[Document<T>],
) -> Result<(), StoreError> {
    let path = snapshot_path(dir, collection);
    let tmp_path = path.with_extension("json.tmp");
    let io_err = |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    };

    let json = serde_json::to_vec_pretty(docs).map_err(|source| StoreError::Malformed {
        path: path.display().to_string(),
        source,
    })?;

    tokio::fs::create_dir_all(dir).await.map_err(io_err)?;
    tokio::fs::write(&tmp_path, json).await.map_err(io_err)?;
    tokio::fs::rename(&tmp_path, &path).await.map_err(io_err)?;

    tracing::info!(
        "Saved {} documents of '{}' to {}",
        docs.len(),
        collection,
        path.display()
    );
    Ok(())
}
