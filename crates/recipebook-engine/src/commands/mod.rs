//! Command orchestration layer
//!
//! Each command opens its own transaction when it writes, logs one start
//! and one end event, and returns errors annotated with the operation and
//! request id.

mod access;
mod image_cleanup;

pub mod engine_command;
pub mod generate;
pub mod read_tools;
pub mod recipe_delete;
pub mod recipe_save;

pub use engine_command::{apply_command, CommandResult};
pub use generate::generate_recipe_draft;
pub use read_tools::{
    export_recipe, get_recipe_details, list_recipes, search_recipes, validate_recipe_submission,
};
pub use recipe_delete::delete_recipe;
pub use recipe_save::{create_recipe, edit_recipe, SaveOutcome};
