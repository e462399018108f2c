use recipebook_core::model::{
    IngredientFields, RecipeFields, RecipeIngredient, RecipeStep, RecipeTag, StepFields, TagFields,
};
use recipebook_core::reconcile::CurrentChildren;
use recipebook_core::RecipeSubmission;

pub const RECIPE_ID: &str = "r-test";

/// The "Test" recipe used across scenarios: apple 100 g, pear 1 pcs,
/// steps "step 1" and "step 2", tags "tag 1" and "tag 2"
#[allow(dead_code)]
pub fn test_submission() -> RecipeSubmission {
    RecipeSubmission::new(
        RecipeFields::new("Test", "test recipe", 10, "test"),
        vec![StepFields::new("step 1"), StepFields::new("step 2")],
        vec![
            IngredientFields::new("apple", 100.0, "g"),
            IngredientFields::new("pear", 1.0, "pcs"),
        ],
        vec![TagFields::new("tag 1"), TagFields::new("tag 2")],
    )
}

/// Stored state of the "Test" recipe after create (ids 1..)
#[allow(dead_code)]
pub fn stored_test_recipe() -> CurrentChildren {
    CurrentChildren::for_recipe(
        RECIPE_ID,
        vec![step(1, 0, "step 1"), step(2, 1, "step 2")],
        vec![
            ingredient(1, "apple", 100.0, "g"),
            ingredient(2, "pear", 1.0, "pcs"),
        ],
        vec![tag(1, "tag 1"), tag(2, "tag 2")],
    )
}

#[allow(dead_code)]
pub fn step(id: i64, step_number: u32, text: &str) -> RecipeStep {
    RecipeStep {
        id,
        recipe_id: RECIPE_ID.to_string(),
        step_number,
        step_description: text.to_string(),
    }
}

#[allow(dead_code)]
pub fn ingredient(id: i64, name: &str, volume: f64, measure: &str) -> RecipeIngredient {
    RecipeIngredient {
        id,
        recipe_id: RECIPE_ID.to_string(),
        name: name.to_string(),
        volume,
        volume_measure: measure.to_string(),
    }
}

#[allow(dead_code)]
pub fn tag(id: i64, text: &str) -> RecipeTag {
    RecipeTag {
        id,
        recipe_id: RECIPE_ID.to_string(),
        tag_text: text.to_string(),
    }
}

/// Submission that keeps the recipe fields and touches no children
#[allow(dead_code)]
pub fn unchanged_submission() -> RecipeSubmission {
    RecipeSubmission::new(
        RecipeFields::new("Test", "test recipe", 10, "test"),
        vec![],
        vec![],
        vec![],
    )
}
