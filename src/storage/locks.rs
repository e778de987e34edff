//! Per-key async serialization.
//!
//! Read-modify-write sequences against the store (trim search history to its
//! cap, toggle a like) are not atomic on their own. Callers take the lock for
//! the owning user before starting such a sequence; different users never
//! contend.

use super::types::StoreError;

use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, OwnedMutexGuard};

const PRUNE_THRESHOLD: usize = 10_000;

#[derive(Clone)]
pub struct KeyedLocks {
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
    timeout: Duration,
}

impl KeyedLocks {
    pub fn new(timeout: Duration) -> Self {
        Self {
            locks: Arc::new(DashMap::new()),
            timeout,
        }
    }

    /// Waits for exclusive access to `key`, at most for the configured timeout.
    ///
    /// The returned guard releases the key when dropped.
    pub async fn acquire(&self, key: &str) -> Result<OwnedMutexGuard<()>, StoreError> {
        if self.locks.len() > PRUNE_THRESHOLD {
            self.prune();
        }

        let lock = self
            .locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(self.timeout, lock.lock_owned())
            .await
            .map_err(|_| {
                tracing::warn!("Timed out after {:?} waiting for lock '{}'", self.timeout, key);
                StoreError::Timeout(key.to_string())
            })
    }

    /// Drops the entries nobody is holding or waiting on.
    pub fn prune(&self) {
        self.locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}
