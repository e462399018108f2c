//! Per-category validation report
//!
//! A save request can fail in several categories at once and every failed
//! category is reported together. Within one category only the first
//! violation encountered is kept.

use std::collections::BTreeMap;

use serde::Serialize;

use super::validation::Violation;
use crate::model::ChildKind;

/// Validation failure bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Recipe metadata
    Info,
    Step,
    Ingredient,
    Tag,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Info,
        Category::Step,
        Category::Ingredient,
        Category::Tag,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Info => "info",
            Category::Step => "step",
            Category::Ingredient => "ingredient",
            Category::Tag => "tag",
        }
    }
}

impl From<ChildKind> for Category {
    fn from(kind: ChildKind) -> Self {
        match kind {
            ChildKind::Step => Category::Step,
            ChildKind::Ingredient => Category::Ingredient,
            ChildKind::Tag => Category::Tag,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which submitted item a failure points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "item", content = "ref", rename_all = "snake_case")]
pub enum ItemRef {
    Recipe,
    /// Stored child, by id
    Existing(i64),
    /// Position in the new-item list
    New(usize),
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ItemRef::Recipe => f.write_str("recipe"),
            ItemRef::Existing(id) => write!(f, "existing #{}", id),
            ItemRef::New(index) => write!(f, "new item {}", index + 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryFailure {
    pub category: Category,
    pub item: ItemRef,
    pub violation: Violation,
}

impl std::fmt::Display for CategoryFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.category, self.item, self.violation)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct ValidationReport {
    failures: BTreeMap<Category, CategoryFailure>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure unless its category already failed
    ///
    /// Returns `true` if the failure was kept.
    pub fn record(&mut self, failure: CategoryFailure) -> bool {
        if self.failures.contains_key(&failure.category) {
            return false;
        }
        self.failures.insert(failure.category, failure);
        true
    }

    pub fn has_failed(&self, category: Category) -> bool {
        self.failures.contains_key(&category)
    }

    pub fn get(&self, category: Category) -> Option<&CategoryFailure> {
        self.failures.get(&category)
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Failures in category order (info, step, ingredient, tag)
    pub fn failures(&self) -> impl Iterator<Item = &CategoryFailure> {
        self.failures.values()
    }

    pub fn categories(&self) -> Vec<Category> {
        self.failures.keys().copied().collect()
    }

    /// Comma separated failed categories, e.g. `info, tag`
    pub fn category_list(&self) -> String {
        self.failures
            .keys()
            .map(Category::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
