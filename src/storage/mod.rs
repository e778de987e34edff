//! Document Storage Module
//!
//! An embedded document store: named collections of serde documents held in
//! concurrent in-memory maps, optionally snapshotted to JSON files.
//!
//! ## Core Concepts
//! - **Collection**: `Collection<T>` supports find/insert/update/delete by id or predicate.
//!   Every document carries a store-assigned insertion sequence number used as a
//!   stable tie-breaker.
//! - **Lifecycle**: `DocumentStore` is opened once at startup and closed at shutdown;
//!   operations on a closed store fail with `StoreError::Closed`.
//! - **Snapshots**: with a data directory configured, collections are restored on open
//!   and written back on close.
//! - **Keyed locks**: `KeyedLocks` serializes read-modify-write sequences per user.

pub mod locks;
pub mod memory;
pub mod snapshot;
pub mod store;
pub mod types;

pub use locks::KeyedLocks;
pub use memory::Collection;
pub use store::DocumentStore;
pub use types::{Document, DocumentId, StoreError};

#[cfg(test)]
mod tests;
