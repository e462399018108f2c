//! Single entry point for mutating commands

use recipebook_core::commands::Command;
use recipebook_core_types::RequestContext;
use recipebook_store::{ImageStore, Result};
use rusqlite::Connection;

use crate::commands::recipe_delete::delete_recipe;
use crate::commands::recipe_save::{create_recipe, edit_recipe, SaveOutcome};

/// Result of applying a mutating command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandResult {
    Saved(SaveOutcome),
    Deleted { recipe_id: String },
}

/// Apply a create, edit or delete on behalf of `ctx.user`
///
/// # Errors
/// Whatever the dispatched command returns.
pub fn apply_command(
    cmd: Command,
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
) -> Result<CommandResult> {
    match cmd {
        Command::CreateRecipe { submission } => {
            create_recipe(conn, images, ctx, &submission).map(CommandResult::Saved)
        }
        Command::EditRecipe {
            recipe_id,
            submission,
        } => edit_recipe(conn, images, ctx, &recipe_id, &submission).map(CommandResult::Saved),
        Command::DeleteRecipe { recipe_id } => {
            delete_recipe(conn, images, ctx, &recipe_id)?;
            Ok(CommandResult::Deleted { recipe_id })
        }
    }
}
