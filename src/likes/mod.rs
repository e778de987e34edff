//! Likes Module
//!
//! A like links a user to a recipe. Toggling runs under the user's keyed lock
//! so a double click cannot produce two likes.

pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
