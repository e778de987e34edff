use super::types::{Document, DocumentId, StoreError};

use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Open/closed flag shared by every collection of one store.
#[derive(Debug)]
pub struct Lifecycle {
    open: AtomicBool,
}

impl Lifecycle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            open: AtomicBool::new(true),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }
}

struct Stored<T> {
    seq: u64,
    body: T,
}

/// A named, schema-less collection of documents of one type.
///
/// Reads return clones, so no map guard ever outlives a call. Every operation
/// fails with [`StoreError::Closed`] once the owning store has been closed.
pub struct Collection<T> {
    name: &'static str,
    docs: DashMap<DocumentId, Stored<T>>,
    next_seq: AtomicU64,
    lifecycle: Arc<Lifecycle>,
}

impl<T> Collection<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(name: &'static str, lifecycle: Arc<Lifecycle>) -> Self {
        Self {
            name,
            docs: DashMap::new(),
            next_seq: AtomicU64::new(0),
            lifecycle,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.lifecycle.is_open() {
            Ok(())
        } else {
            tracing::warn!("Rejected operation on closed collection '{}'", self.name);
            Err(StoreError::Closed)
        }
    }

    fn to_document(id: &DocumentId, stored: &Stored<T>) -> Document<T> {
        Document {
            id: id.clone(),
            seq: stored.seq,
            body: stored.body.clone(),
        }
    }

    pub async fn insert_one(&self, body: T) -> Result<DocumentId, StoreError> {
        self.ensure_open()?;

        let id = DocumentId::new();
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.docs.insert(id.clone(), Stored { seq, body });

        tracing::debug!("Inserted {} into '{}' (seq {})", id, self.name, seq);
        Ok(id)
    }

    pub async fn get(&self, id: &DocumentId) -> Result<Option<Document<T>>, StoreError> {
        self.ensure_open()?;

        Ok(self
            .docs
            .get(id)
            .map(|entry| Self::to_document(entry.key(), entry.value())))
    }

    /// Returns every document accepted by `filter`, in insertion order.
    pub async fn find<F>(&self, filter: F) -> Result<Vec<Document<T>>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        self.ensure_open()?;

        let mut found: Vec<Document<T>> = self
            .docs
            .iter()
            .filter(|entry| filter(&entry.value().body))
            .map(|entry| Self::to_document(entry.key(), entry.value()))
            .collect();
        found.sort_by_key(|doc| doc.seq);

        Ok(found)
    }

    /// Returns the earliest inserted document accepted by `filter`.
    pub async fn find_one<F>(&self, filter: F) -> Result<Option<Document<T>>, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.find(filter).await?.into_iter().next())
    }

    pub async fn count<F>(&self, filter: F) -> Result<usize, StoreError>
    where
        F: Fn(&T) -> bool,
    {
        self.ensure_open()?;

        Ok(self
            .docs
            .iter()
            .filter(|entry| filter(&entry.value().body))
            .count())
    }

    /// Applies `apply` to the document in place and returns the updated copy.
    ///
    /// Returns `Ok(None)` when no document has the given id.
    pub async fn update<F>(&self, id: &DocumentId, apply: F) -> Result<Option<Document<T>>, StoreError>
    where
        F: FnOnce(&mut T),
    {
        self.ensure_open()?;

        match self.docs.get_mut(id) {
            Some(mut entry) => {
                apply(&mut entry.value_mut().body);
                Ok(Some(Self::to_document(id, entry.value())))
            }
            None => Ok(None),
        }
    }

    pub async fn delete_one(&self, id: &DocumentId) -> Result<bool, StoreError> {
        self.ensure_open()?;

        Ok(self.docs.remove(id).is_some())
    }

    /// Deletes every listed id and returns how many documents were removed.
    pub async fn delete_many(&self, ids: &[DocumentId]) -> Result<usize, StoreError> {
        self.ensure_open()?;

        let deleted = ids
            .iter()
            .filter(|id| self.docs.remove(*id).is_some())
            .count();

        if deleted > 0 {
            tracing::debug!("Deleted {} documents from '{}'", deleted, self.name);
        }
        Ok(deleted)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Copies out the whole collection in insertion order.
    pub fn dump(&self) -> Vec<Document<T>> {
        let mut docs: Vec<Document<T>> = self
            .docs
            .iter()
            .map(|entry| Self::to_document(entry.key(), entry.value()))
            .collect();
        docs.sort_by_key(|doc| doc.seq);
        docs
    }

    /// Loads previously dumped documents, keeping their ids and sequence
    /// numbers. Later inserts are sequenced after the highest restored one.
    pub fn restore(&self, docs: Vec<Document<T>>) {
        for doc in docs {
            self.next_seq.fetch_max(doc.seq + 1, Ordering::SeqCst);
            self.docs.insert(
                doc.id,
                Stored {
                    seq: doc.seq,
                    body: doc.body,
                },
            );
        }
    }
}
