//! Per-entity validators
//!
//! Each validator is a pure function of one candidate field set. On success
//! it returns the cleaned values (surrounding whitespace trimmed, numbers
//! narrowed to their stored types); on failure it returns the first violated
//! constraint in field declaration order.

use serde::Serialize;

use crate::model::{IngredientFields, RecipeFields, StepFields, TagFields};

pub const RECIPE_NAME_MAX: usize = 128;
pub const RECIPE_CATEGORY_MAX: usize = 128;
pub const STEP_DESCRIPTION_MAX: usize = 512;
pub const INGREDIENT_NAME_MAX: usize = 128;
pub const INGREDIENT_MEASURE_MAX: usize = 12;
pub const TAG_TEXT_MAX: usize = 80;

/// What went wrong with a single field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationKind {
    /// Missing, or empty after trimming
    Required,
    /// Longer than allowed, counted in characters
    MaxLength { max: usize, actual: usize },
    OutOfRange { constraint: &'static str },
    WrongType { expected: &'static str },
    /// Same value already present in the collection
    Duplicate,
    ControlCharacter,
}

/// A violated constraint on a named field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    pub field: &'static str,
    #[serde(flatten)]
    pub kind: ViolationKind,
}

impl Violation {
    pub fn new(field: &'static str, kind: ViolationKind) -> Self {
        Self { field, kind }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::Required => write!(f, "{}: this field is required", self.field),
            ViolationKind::MaxLength { max, actual } => write!(
                f,
                "{}: at most {} characters allowed (got {})",
                self.field, max, actual
            ),
            ViolationKind::OutOfRange { constraint } => {
                write!(f, "{}: value must be {}", self.field, constraint)
            }
            ViolationKind::WrongType { expected } => {
                write!(f, "{}: expected {}", self.field, expected)
            }
            ViolationKind::Duplicate => write!(f, "{}: duplicate value", self.field),
            ViolationKind::ControlCharacter => {
                write!(f, "{}: control characters are not allowed", self.field)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidRecipe {
    pub name: String,
    pub description: String,
    pub cooking_time: u32,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidStep {
    pub step_description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidIngredient {
    pub name: String,
    pub volume: f64,
    pub volume_measure: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidTag {
    pub tag_text: String,
}

fn required_text(field: &'static str, value: &str, max: Option<usize>) -> Result<String, Violation> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Violation::new(field, ViolationKind::Required));
    }
    if let Some(max) = max {
        let actual = trimmed.chars().count();
        if actual > max {
            return Err(Violation::new(field, ViolationKind::MaxLength { max, actual }));
        }
    }
    Ok(trimmed.to_string())
}

/// Validate recipe metadata
///
/// # Errors
/// The first violation among name, description, cooking_time, category.
pub fn validate_recipe(fields: &RecipeFields) -> Result<ValidRecipe, Violation> {
    let name = required_text("name", &fields.name, Some(RECIPE_NAME_MAX))?;
    let description = required_text("description", &fields.description, None)?;

    let cooking_time = match fields.cooking_time {
        None => return Err(Violation::new("cooking_time", ViolationKind::Required)),
        Some(minutes) if minutes <= 0 => {
            return Err(Violation::new(
                "cooking_time",
                ViolationKind::OutOfRange {
                    constraint: "greater than 0",
                },
            ))
        }
        Some(minutes) => u32::try_from(minutes).map_err(|_| {
            Violation::new(
                "cooking_time",
                ViolationKind::OutOfRange {
                    constraint: "at most 4294967295",
                },
            )
        })?,
    };

    let category = required_text("category", &fields.category, Some(RECIPE_CATEGORY_MAX))?;

    Ok(ValidRecipe {
        name,
        description,
        cooking_time,
        category,
    })
}

/// Validate a step candidate (existing or new)
///
/// # Errors
/// `Required` or `MaxLength` on step_description.
pub fn validate_step(fields: &StepFields) -> Result<ValidStep, Violation> {
    let step_description = required_text(
        "step_description",
        &fields.step_description,
        Some(STEP_DESCRIPTION_MAX),
    )?;
    Ok(ValidStep { step_description })
}

/// Validate an ingredient candidate (existing or new)
///
/// # Errors
/// The first violation among name, volume, volume_measure.
pub fn validate_ingredient(fields: &IngredientFields) -> Result<ValidIngredient, Violation> {
    let name = required_text("name", &fields.name, Some(INGREDIENT_NAME_MAX))?;

    let volume = match fields.volume {
        None => return Err(Violation::new("volume", ViolationKind::Required)),
        Some(v) if !v.is_finite() => {
            return Err(Violation::new(
                "volume",
                ViolationKind::WrongType {
                    expected: "a finite number",
                },
            ))
        }
        Some(v) if v < 0.0 => {
            return Err(Violation::new(
                "volume",
                ViolationKind::OutOfRange {
                    constraint: "0 or greater",
                },
            ))
        }
        // normalises -0.0
        Some(v) => v + 0.0,
    };

    let volume_measure = required_text(
        "volume_measure",
        &fields.volume_measure,
        Some(INGREDIENT_MEASURE_MAX),
    )?;

    Ok(ValidIngredient {
        name,
        volume,
        volume_measure,
    })
}

/// Validate a tag candidate (existing or new)
///
/// Uniqueness within the recipe is a collection-level rule checked by the
/// reconciliation planner, not here.
///
/// Control characters are rejected; the store relies on no valid tag
/// starting with NUL when it renames tags in two passes.
///
/// # Errors
/// `Required`, `MaxLength` or `ControlCharacter` on tag_text.
pub fn validate_tag(fields: &TagFields) -> Result<ValidTag, Violation> {
    let tag_text = required_text("tag_text", &fields.tag_text, Some(TAG_TEXT_MAX))?;
    if tag_text.chars().any(char::is_control) {
        return Err(Violation::new("tag_text", ViolationKind::ControlCharacter));
    }
    Ok(ValidTag { tag_text })
}
