use serde::{Deserialize, Serialize};

use crate::recipes::types::RecipeView;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub terms: Vec<String>,
    pub count: usize,
    pub recipes: Vec<RecipeView>,
}
