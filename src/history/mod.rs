//! Search History Module
//!
//! Per-user recent-search history, capped at seven entries.
//!
//! ## Submodules
//! - **`tracker`**: `RecentSearchTracker`, recording with eviction and newest-first listing.
//! - **`handlers`**: HTTP handlers for `/api/users/:userId/searches`.
//! - **`types`**: `SearchHistoryEntry` and request DTOs.

pub mod handlers;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod tests;
