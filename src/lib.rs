//! Cookbook Recipe Service Library
//!
//! This library crate defines the modules of the recipe-sharing backend.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//!
//! - **`search`**: Ingredient search. Splits a free-text query into ingredient
//!   terms and returns the recipes whose ingredient list matches every term.
//! - **`history`**: Per-user recent searches, capped at the seven newest entries.
//! - **`recipes`**: Recipe catalogue, including normalization of legacy records
//!   and image URL resolution.
//! - **`auth`** / **`users`**: Accounts, bearer tokens, profiles and statistics.
//! - **`likes`**: Per-user liked recipes.
//! - **`uploads`**: Image files stored on disk and served under `/uploads`.
//! - **`storage`**: The embedded document store every other module persists to.
//! - **`app`**, **`state`**, **`config`**, **`error`**: HTTP wiring and shared plumbing.

pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod history;
pub mod likes;
pub mod recipes;
pub mod search;
pub mod state;
pub mod storage;
pub mod uploads;
pub mod users;
