use serde::Serialize;

use super::{Recipe, RecipeIngredient, RecipeStep, RecipeTag};

/// A recipe together with its children, as shown on the details page
///
/// Steps are ordered by step number; ingredients and tags by insertion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeDetails {
    pub recipe: Recipe,
    pub steps: Vec<RecipeStep>,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<RecipeTag>,
}
