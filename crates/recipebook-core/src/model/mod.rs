pub mod children;
pub mod details;
pub mod fields;
pub mod recipe;

pub use children::{RecipeIngredient, RecipeStep, RecipeTag};
pub use details::RecipeDetails;
pub use fields::{IngredientFields, RecipeFields, StepFields, TagFields};
pub use recipe::{ImageRef, Recipe, IMAGE_SLOTS};

use serde::{Deserialize, Serialize};

/// The three child collections owned by a recipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildKind {
    Step,
    Ingredient,
    Tag,
}

impl ChildKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChildKind::Step => "step",
            ChildKind::Ingredient => "ingredient",
            ChildKind::Tag => "tag",
        }
    }
}

impl std::fmt::Display for ChildKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
