use serde::{Deserialize, Serialize};

/// One instruction of a recipe
///
/// `(recipe_id, step_number)` is unique; steps are read back in ascending
/// step_number order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub id: i64,
    pub recipe_id: String,
    pub step_number: u32,
    pub step_description: String,
}

/// One ingredient line; no ordering or uniqueness guarantee
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub id: i64,
    pub recipe_id: String,
    pub name: String,
    pub volume: f64,
    pub volume_measure: String,
}

/// Free-text tag; `(recipe_id, tag_text)` is unique
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeTag {
    pub id: i64,
    pub recipe_id: String,
    pub tag_text: String,
}
