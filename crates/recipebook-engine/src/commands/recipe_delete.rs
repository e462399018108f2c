//! Delete a recipe with its children

use std::time::Instant;

use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_core_types::RequestContext;
use recipebook_store::errors::from_rusqlite;
use recipebook_store::{ImageStore, Result, SqliteRepo};
use rusqlite::{Connection, TransactionBehavior};

use super::access::{annotate, ensure_user, load_owned};
use super::image_cleanup::release_orphans;

/// Delete an owned recipe; steps, ingredients and tags go with it
///
/// The recipe's images are released after commit unless another recipe
/// still uses them.
///
/// # Errors
/// - `NotFound` if the recipe does not exist
/// - `Forbidden` if the acting user does not own it
/// - `Persistence` from the store
pub fn delete_recipe(
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    recipe_id: &str,
) -> Result<()> {
    let start = Instant::now();
    log_op_start!(
        "recipe_delete",
        request_id = %ctx.request_id,
        user_id = %ctx.user,
        recipe_id = recipe_id,
    );

    let result = delete(conn, images, ctx, recipe_id).map_err(|e| annotate(e, "recipe_delete", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(()) => {
            log_op_end!(
                "recipe_delete",
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
                recipe_id = recipe_id,
            );
        }
        Err(e) => {
            log_op_error!(
                "recipe_delete",
                e.clone(),
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
            );
        }
    }
    result
}

fn delete(
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    recipe_id: &str,
) -> Result<()> {
    ensure_user(ctx)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;
    let recipe = load_owned(&tx, ctx, recipe_id)?;
    SqliteRepo::delete_recipe(&tx, &recipe.id)?;
    tx.commit().map_err(from_rusqlite)?;

    release_orphans(conn, images, &recipe.images, &[]);
    Ok(())
}
