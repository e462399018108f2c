//! Candidate field sets as submitted by a caller
//!
//! Nothing here is trusted: every field set goes through `rules::validation`
//! before it can reach the store. Missing JSON fields deserialize to empty
//! values so that they surface as `Required` violations instead of parse
//! errors.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecipeFields {
    pub name: String,
    pub description: String,
    pub cooking_time: Option<i64>,
    pub category: String,
}

impl RecipeFields {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        cooking_time: i64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            cooking_time: Some(cooking_time),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StepFields {
    pub step_description: String,
}

impl StepFields {
    pub fn new(step_description: impl Into<String>) -> Self {
        Self {
            step_description: step_description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IngredientFields {
    pub name: String,
    pub volume: Option<f64>,
    pub volume_measure: String,
}

impl IngredientFields {
    pub fn new(name: impl Into<String>, volume: f64, volume_measure: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            volume: Some(volume),
            volume_measure: volume_measure.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TagFields {
    pub tag_text: String,
}

impl TagFields {
    pub fn new(tag_text: impl Into<String>) -> Self {
        Self {
            tag_text: tag_text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_json_fields_default_to_empty() {
        let fields: IngredientFields = serde_json::from_str(r#"{"name":"salt"}"#).unwrap();
        assert_eq!(fields.name, "salt");
        assert_eq!(fields.volume, None);
        assert!(fields.volume_measure.is_empty());
    }
}
