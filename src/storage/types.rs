use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier for a document within a collection.
///
/// Wrapper around a UUID v4 string. Ids are opaque to callers and are only
/// compared for equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl DocumentId {
    /// Generates a new random UUID v4-based DocumentId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A document as handed out by a collection read.
///
/// `seq` is the store-assigned insertion sequence number. It is strictly
/// increasing per collection and breaks ties between documents whose own
/// timestamps collide.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub id: DocumentId,
    pub seq: u64,
    pub body: T,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store is closed")]
    Closed,

    #[error("timed out waiting for exclusive access to '{0}'")]
    Timeout(String),

    #[error("snapshot I/O failed for {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed snapshot {path}: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
