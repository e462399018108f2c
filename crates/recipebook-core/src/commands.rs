//! Mutation requests
//!
//! A save request carries the recipe fields plus, per child kind, an ordered
//! edit-set for the stored items and a list of items to append. Image slot
//! edits travel alongside but are resolved by the engine, since they involve
//! the image collaborator.

use serde::{Deserialize, Serialize};

use crate::model::{IngredientFields, RecipeFields, StepFields, TagFields, IMAGE_SLOTS};

/// Instruction for one stored child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExistingEdit<F> {
    Keep,
    /// Overwrite the item's fields in place
    Update(F),
    /// Remove the item; any field edits are discarded
    Delete,
}

// Keep carries no fields, so no `F: Default` bound
impl<F> Default for ExistingEdit<F> {
    fn default() -> Self {
        ExistingEdit::Keep
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
pub struct ExistingItemEdit<F> {
    pub id: i64,
    #[serde(default)]
    pub edit: ExistingEdit<F>,
}

impl<F> ExistingItemEdit<F> {
    pub fn keep(id: i64) -> Self {
        Self {
            id,
            edit: ExistingEdit::Keep,
        }
    }

    pub fn update(id: i64, fields: F) -> Self {
        Self {
            id,
            edit: ExistingEdit::Update(fields),
        }
    }

    pub fn delete(id: i64) -> Self {
        Self {
            id,
            edit: ExistingEdit::Delete,
        }
    }
}

/// Edit-set for one child collection
///
/// Stored items absent from `existing` are kept untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: Deserialize<'de>"))]
pub struct ChildEdits<F> {
    #[serde(default)]
    pub existing: Vec<ExistingItemEdit<F>>,
    /// Items to append, in submission order
    #[serde(default)]
    pub new: Vec<F>,
}

impl<F> Default for ChildEdits<F> {
    fn default() -> Self {
        Self {
            existing: Vec::new(),
            new: Vec::new(),
        }
    }
}

impl<F> ChildEdits<F> {
    /// Append-only edit-set, as used on create
    pub fn appending(new: Vec<F>) -> Self {
        Self {
            existing: Vec::new(),
            new,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.existing.is_empty() && self.new.is_empty()
    }
}

/// An uploaded image, bytes still in memory
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Lower-cased extension of the original file name, `bin` when absent
    pub fn extension(&self) -> String {
        std::path::Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .filter(|ext| !ext.is_empty() && ext.chars().all(|c| c.is_ascii_alphanumeric()))
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_else(|| "bin".to_string())
    }
}

/// Instruction for one image slot
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ImageEdit {
    #[default]
    Keep,
    Replace(ImageUpload),
    Clear,
}

/// A create or edit request
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecipeSubmission {
    pub recipe: RecipeFields,
    #[serde(default)]
    pub steps: ChildEdits<StepFields>,
    #[serde(default)]
    pub ingredients: ChildEdits<IngredientFields>,
    #[serde(default)]
    pub tags: ChildEdits<TagFields>,
    /// Per-slot image instructions; bytes never go through JSON
    #[serde(skip)]
    pub images: [ImageEdit; IMAGE_SLOTS],
}

impl RecipeSubmission {
    /// A submission that only appends children, the shape of every create
    pub fn new(
        recipe: RecipeFields,
        steps: Vec<StepFields>,
        ingredients: Vec<IngredientFields>,
        tags: Vec<TagFields>,
    ) -> Self {
        Self {
            recipe,
            steps: ChildEdits::appending(steps),
            ingredients: ChildEdits::appending(ingredients),
            tags: ChildEdits::appending(tags),
            images: Default::default(),
        }
    }

    /// True if any existing-item edit is present
    pub fn edits_existing_items(&self) -> bool {
        !self.steps.existing.is_empty()
            || !self.ingredients.existing.is_empty()
            || !self.tags.existing.is_empty()
    }
}

/// Top-level mutation commands dispatched by the engine
#[derive(Debug, Clone)]
pub enum Command {
    CreateRecipe {
        submission: RecipeSubmission,
    },
    EditRecipe {
        recipe_id: String,
        submission: RecipeSubmission,
    },
    DeleteRecipe {
        recipe_id: String,
    },
}
