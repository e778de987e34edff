//! Users Module
//!
//! Profiles, profile pictures, and per-user listings (own recipes, liked
//! recipes, counts). Account creation and sign-in live in `auth`.

pub mod handlers;
pub mod service;
pub mod types;
