//! Ingredient Query Builder
//!
//! Turns a raw search string into a conjunction of case-insensitive
//! substring predicates, one per term. Terms are escaped before compiling,
//! so user input never acts as a pattern.

use super::tokenizer::tokenize_query;
use crate::error::AppError;

use regex::{Regex, RegexBuilder};

#[derive(Debug, Clone)]
pub struct IngredientQuery {
    terms: Vec<String>,
    predicates: Vec<Regex>,
}

impl IngredientQuery {
    /// Builds the query, rejecting a missing or blank string and a string
    /// made only of separators.
    pub fn parse(raw: Option<&str>) -> Result<Self, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|query| !query.is_empty())
            .ok_or_else(|| AppError::InvalidArgument("Search query is required".to_string()))?;

        let terms = tokenize_query(raw);
        if terms.is_empty() {
            return Err(AppError::InvalidArgument(
                "Search query must contain at least one ingredient".to_string(),
            ));
        }

        let predicates = terms
            .iter()
            .map(|term| {
                RegexBuilder::new(&regex::escape(term))
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        AppError::InvalidArgument(format!("Invalid search term '{}': {}", term, e))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { terms, predicates })
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when every term occurs in at least one ingredient.
    pub fn matches(&self, ingredients: &[String]) -> bool {
        self.predicates
            .iter()
            .all(|predicate| ingredients.iter().any(|item| predicate.is_match(item)))
    }
}
