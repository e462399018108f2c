//! Recipebook Core - recipe domain kernel
//!
//! Pure, storage-agnostic logic for a personal recipe catalog:
//! - Recipe, step, ingredient and tag models plus the submitted field sets
//! - Per-entity validators and the per-category validation report
//! - The reconciliation planner that turns one save request into row changes
//! - Sort/search request types and the plain-text export renderer
//! - Parsing of AI-generated recipe payloads into create submissions
//!
//! Nothing in this crate touches the database or the network; the store and
//! engine crates do.

pub mod commands;
pub mod errors;
pub mod generation;
pub mod logging_facility;
pub mod model;
pub mod query;
pub mod reconcile;
pub mod render;
pub mod rules;

// Used by the logging macros through `$crate`
pub use recipebook_core_types as core_types;

pub use commands::{Command, RecipeSubmission};
pub use errors::{ExError, ExErrorKind, RecipeBookError, Result};
pub use model::{ChildKind, Recipe, RecipeIngredient, RecipeStep, RecipeTag};
pub use query::{Page, SearchQuery, SearchScopes, SortDirection, SortField, SortSpec};
pub use reconcile::{plan_save, ReconcilePlan, StepNumberScope, STEP_NUMBER_SCOPE};
