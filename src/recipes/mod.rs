//! Recipes Module
//!
//! Recipe CRUD over the `recipes` collection.
//!
//! ## Submodules
//! - **`types`**: The canonical `Recipe`, legacy-record normalization, and client views.
//! - **`service`**: List, fetch, create and owner-checked delete.
//! - **`handlers`**: HTTP handlers under `/api/recipes`.

pub mod handlers;
pub mod service;
pub mod types;
