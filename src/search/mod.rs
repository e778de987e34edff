//! Recipe Search Module
//!
//! Ingredient-based recipe search.
//!
//! ## Pipeline
//! 1. **Tokenization**: the raw query is split on runs of commas and whitespace.
//! 2. **Query construction**: each term becomes a case-insensitive substring predicate
//!    over a recipe's ingredients; predicates are combined with AND.
//! 3. **Retrieval**: one filtered read of the recipes collection. No ranking, no pagination.
//!
//! ## Submodules
//! - **`tokenizer`**: Query string splitting.
//! - **`query`**: `IngredientQuery`, the conjunctive predicate builder.
//! - **`engine`**: Runs a query against the document store.
//! - **`handlers`**: HTTP request handler for `/api/recipes/search`.
//! - **`types`**: Request/response DTOs.

pub mod engine;
pub mod handlers;
pub mod query;
pub mod tokenizer;
pub mod types;
