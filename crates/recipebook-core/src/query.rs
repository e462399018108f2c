//! Recipe list and search requests
//!
//! These types describe *what* to fetch; the store crate turns them into SQL.
//! Both shapes are always scoped to the acting user by the engine.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{RecipeBookError, Result};

/// Recipe columns a list can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Name,
    CookingTime,
    Category,
    CreatedAt,
    UpdatedAt,
}

impl SortField {
    pub const ALL: [SortField; 5] = [
        SortField::Name,
        SortField::CookingTime,
        SortField::Category,
        SortField::CreatedAt,
        SortField::UpdatedAt,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::CookingTime => "cooking_time",
            SortField::Category => "category",
            SortField::CreatedAt => "created_at",
            SortField::UpdatedAt => "updated_at",
        }
    }
}

impl FromStr for SortField {
    type Err = RecipeBookError;

    fn from_str(s: &str) -> Result<Self> {
        SortField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| RecipeBookError::InvalidSortField {
                field: s.to_string(),
            })
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl FromStr for SortDirection {
    type Err = RecipeBookError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(RecipeBookError::InvalidInput {
                reason: format!("unknown sort direction '{}'", other),
            }),
        }
    }
}

/// Ordering for a recipe list; ties fall back to insertion order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    pub fn ascending(field: SortField) -> Self {
        Self::new(field, SortDirection::Ascending)
    }

    pub fn descending(field: SortField) -> Self {
        Self::new(field, SortDirection::Descending)
    }
}

/// Which parts of a recipe a search looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchScopes {
    pub in_names: bool,
    pub in_descriptions: bool,
    pub in_categories: bool,
    pub in_ingredients: bool,
    pub in_tags: bool,
}

impl SearchScopes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            in_names: true,
            in_descriptions: true,
            in_categories: true,
            in_ingredients: true,
            in_tags: true,
        }
    }

    pub fn names_only() -> Self {
        Self {
            in_names: true,
            ..Self::none()
        }
    }

    pub fn any_enabled(&self) -> bool {
        self.in_names
            || self.in_descriptions
            || self.in_categories
            || self.in_ingredients
            || self.in_tags
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    text: String,
    pub scopes: SearchScopes,
}

impl SearchQuery {
    /// The search text is trimmed on construction
    pub fn new(text: impl AsRef<str>, scopes: SearchScopes) -> Self {
        Self {
            text: text.as_ref().trim().to_string(),
            scopes,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether this query can only ever match nothing
    pub fn is_vacuous(&self) -> bool {
        self.text.is_empty() || !self.scopes.any_enabled()
    }
}

/// Window applied after ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Page {
    /// `None` means no upper bound
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: Some(limit),
            offset,
        }
    }
}

/// Case-insensitive substring test using full Unicode lowercasing
///
/// SQLite's own `LIKE` only folds ASCII, so the store registers this as a
/// scalar function and every search scope goes through it.
pub fn contains_case_insensitive(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
