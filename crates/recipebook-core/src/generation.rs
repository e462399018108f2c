//! AI-assisted recipe drafts
//!
//! The generator collaborator returns a raw JSON payload. This module owns
//! the request validation, the prompt, and the conversion of that payload
//! into an ordinary create submission, which then goes through the same
//! validators as a hand-written recipe.

use serde::{Deserialize, Serialize};

use crate::commands::RecipeSubmission;
use crate::errors::{RecipeBookError, Result};
use crate::model::{IngredientFields, RecipeFields, StepFields};
use crate::rules::ValidationReport;

/// What the user asked the generator for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    ingredients_description: String,
    recipe_description: String,
}

impl GenerationRequest {
    /// Both descriptions are trimmed and must be non-empty
    ///
    /// # Errors
    /// `InvalidInput` naming the first missing description.
    pub fn new(ingredients_description: &str, recipe_description: &str) -> Result<Self> {
        let ingredients_description = ingredients_description.trim();
        let recipe_description = recipe_description.trim();

        if ingredients_description.is_empty() {
            return Err(RecipeBookError::InvalidInput {
                reason: "ingredients_description is required".to_string(),
            });
        }
        if recipe_description.is_empty() {
            return Err(RecipeBookError::InvalidInput {
                reason: "recipe_description is required".to_string(),
            });
        }

        Ok(Self {
            ingredients_description: ingredients_description.to_string(),
            recipe_description: recipe_description.to_string(),
        })
    }

    pub fn ingredients_description(&self) -> &str {
        &self.ingredients_description
    }

    pub fn recipe_description(&self) -> &str {
        &self.recipe_description
    }

    /// Natural-language instruction sent to the model
    pub fn prompt(&self) -> String {
        format!(
            "Create a recipe whose ingredients can be described as \"{}\" and which itself \
             can be described as \"{}\". Cooking steps must not carry list item numbers.",
            self.ingredients_description, self.recipe_description
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedIngredient {
    pub name: String,
    pub volume: f64,
    pub volume_measure: String,
}

/// Payload shape the generator is asked to produce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRecipe {
    pub name: String,
    pub description: String,
    pub cooking_time_in_minutes: i64,
    pub category: String,
    pub steps: Vec<String>,
    pub ingredients: Vec<GeneratedIngredient>,
}

impl GeneratedRecipe {
    /// Parse the collaborator's raw answer
    ///
    /// # Errors
    /// `Collaborator` if the payload is not valid JSON of the expected shape.
    pub fn parse(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|err| RecipeBookError::Collaborator {
            message: format!("malformed generation payload: {}", err),
        })
    }

    /// Create submission carrying the generated values untouched
    pub fn into_submission(self) -> RecipeSubmission {
        let recipe = RecipeFields {
            name: self.name,
            description: self.description,
            cooking_time: Some(self.cooking_time_in_minutes),
            category: self.category,
        };
        let steps = self.steps.into_iter().map(StepFields::new).collect();
        let ingredients = self
            .ingredients
            .into_iter()
            .map(|i| IngredientFields::new(i.name, i.volume, i.volume_measure))
            .collect();

        RecipeSubmission::new(recipe, steps, ingredients, Vec::new())
    }
}

/// A generated, validated, not yet saved recipe
///
/// The user reviews the draft and saves it as a normal create. A draft whose
/// generated values break a rule is still returned, with the report attached,
/// so the user can fix it by hand.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeDraft {
    pub submission: RecipeSubmission,
    pub report: ValidationReport,
}

impl RecipeDraft {
    pub fn is_valid(&self) -> bool {
        self.report.is_empty()
    }
}
