//! Ownership checks and error annotation shared by every command

use recipebook_core::errors::{ExError, RecipeBookError};
use recipebook_core::model::Recipe;
use recipebook_core_types::RequestContext;
use recipebook_store::{Result, SqliteRepo};
use rusqlite::Connection;

/// Reject requests made without an acting user
pub(crate) fn ensure_user(ctx: &RequestContext) -> Result<()> {
    if ctx.user.is_blank() {
        return Err(RecipeBookError::InvalidInput {
            reason: "user id is required".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Load a recipe the acting user owns
///
/// A missing recipe is `NotFound`; another user's recipe is `Forbidden` and
/// the error carries nothing beyond the requested id.
pub(crate) fn load_owned(conn: &Connection, ctx: &RequestContext, recipe_id: &str) -> Result<Recipe> {
    let recipe = SqliteRepo::get_recipe(conn, recipe_id)?.ok_or_else(|| {
        ExError::from(RecipeBookError::RecipeNotFound {
            recipe_id: recipe_id.to_string(),
        })
    })?;

    if !recipe.is_owned_by(&ctx.user) {
        return Err(RecipeBookError::Forbidden {
            recipe_id: recipe_id.to_string(),
        }
        .into());
    }
    Ok(recipe)
}

/// Stamp the operation and request correlation onto an error
///
/// An operation already named by a lower layer is kept.
pub(crate) fn annotate(err: ExError, op: &str, ctx: &RequestContext) -> ExError {
    let mut err = err.with_request_id(ctx.request_id.clone());
    if err.op().is_none() {
        err = err.with_op(op);
    }
    match &ctx.trace_id {
        Some(trace_id) => err.with_trace_id(trace_id.clone()),
        None => err,
    }
}
