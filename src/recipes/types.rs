//! Recipe Data Types
//!
//! `Recipe` is the one canonical shape used past the store boundary. Older
//! records use several spellings for the same fields (`Title`,
//! `Cleaned_Ingredients`, `Image_Name`, ...) and sometimes store ingredients
//! as a single string; they are folded into `Recipe` while deserializing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::Document;

/// A stored recipe.
///
/// `ingredients` is the only field searched. A recipe with no ingredients
/// never matches a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "LegacyRecipe", rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub instructions: String,
    pub ingredients: Vec<String>,
    pub image: Option<String>,
    /// Legacy recipes imported from the original dataset have no owner.
    pub user_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Ingredients are stored either as a list or as one free-text string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientField {
    List(Vec<String>),
    Text(String),
}

impl IngredientField {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            IngredientField::List(items) => items,
            IngredientField::Text(text) if text.trim().is_empty() => Vec::new(),
            IngredientField::Text(text) => vec![text],
        }
    }
}

#[derive(Deserialize)]
struct LegacyRecipe {
    title: Option<String>,
    #[serde(rename = "Title")]
    title_legacy: Option<String>,

    instructions: Option<String>,
    #[serde(rename = "Instructions")]
    instructions_legacy: Option<String>,

    #[serde(rename = "Cleaned_Ingredients")]
    cleaned_ingredients_legacy: Option<IngredientField>,
    cleaned_ingredients: Option<IngredientField>,
    ingredients: Option<IngredientField>,
    #[serde(rename = "Ingredients")]
    ingredients_legacy: Option<IngredientField>,

    image: Option<String>,
    #[serde(rename = "Image_Name")]
    image_name: Option<String>,

    #[serde(rename = "userId", alias = "user_id")]
    user_id: Option<String>,

    #[serde(rename = "createdAt", alias = "created_at")]
    created_at: Option<String>,
}

impl From<LegacyRecipe> for Recipe {
    fn from(raw: LegacyRecipe) -> Self {
        let ingredients = raw
            .cleaned_ingredients_legacy
            .or(raw.cleaned_ingredients)
            .or(raw.ingredients)
            .or(raw.ingredients_legacy)
            .map(IngredientField::into_vec)
            .unwrap_or_default();

        let created_at = raw
            .created_at
            .as_deref()
            .and_then(|value| DateTime::parse_from_rfc3339(value).ok())
            .map(|value| value.with_timezone(&Utc));

        Recipe {
            title: raw.title.or(raw.title_legacy).unwrap_or_default(),
            instructions: raw
                .instructions
                .or(raw.instructions_legacy)
                .unwrap_or_default(),
            ingredients,
            image: raw
                .image
                .or(raw.image_name)
                .filter(|image| !image.trim().is_empty()),
            user_id: raw.user_id.filter(|id| !id.is_empty()),
            created_at,
        }
    }
}

/// A recipe as returned to clients: the stored fields plus its id and an
/// absolute image URL (empty when the recipe has no image).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeView {
    pub id: String,
    #[serde(flatten)]
    pub recipe: Recipe,
    pub image_url: String,
}

impl RecipeView {
    pub fn from_document(doc: Document<Recipe>, public_url: &str) -> Self {
        let image_url = image_url(doc.body.image.as_deref(), public_url);
        Self {
            id: doc.id.0,
            recipe: doc.body,
            image_url,
        }
    }
}

/// Prefix for image references that predate the upload endpoint.
pub const LEGACY_IMAGE_DIR: &str = "/uploads/images/FoodImages/";

/// Builds the public URL of a recipe image.
///
/// References under `/uploads/` are served as-is, absolute URLs are passed
/// through, and bare file names point into the legacy image directory.
pub fn image_url(image: Option<&str>, public_url: &str) -> String {
    let Some(image) = image.map(str::trim).filter(|image| !image.is_empty()) else {
        return String::new();
    };

    if image.starts_with("http://") || image.starts_with("https://") {
        return image.to_string();
    }

    let base = public_url.trim_end_matches('/');
    if image.starts_with("/uploads/") {
        format!("{}{}", base, image)
    } else {
        format!("{}{}{}", base, LEGACY_IMAGE_DIR, image.trim_start_matches('/'))
    }
}

/// Body of a recipe creation request. Accepts both the current and the
/// legacy field names.
#[derive(Debug, Deserialize)]
pub struct NewRecipe {
    #[serde(alias = "Title")]
    pub title: Option<String>,
    #[serde(alias = "Cleaned_Ingredients")]
    pub ingredients: Option<IngredientField>,
    #[serde(alias = "Instructions")]
    pub instructions: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRecipeResponse {
    pub message: String,
    pub recipe_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckLikesRequest {
    pub recipe_ids: Option<Vec<String>>,
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckLikesResponse {
    pub liked_recipe_ids: Vec<String>,
}
