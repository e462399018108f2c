//! Read-only commands
//!
//! None of these open a write transaction. Every lookup is scoped to the
//! acting user: lists and searches only ever see the user's own recipes,
//! and direct reads of another user's recipe fail with `Forbidden`.

use std::time::Instant;

use recipebook_core::commands::RecipeSubmission;
use recipebook_core::errors::RecipeBookError;
use recipebook_core::model::{Recipe, RecipeDetails};
use recipebook_core::query::{Page, SearchQuery, SortSpec};
use recipebook_core::reconcile::{validate_submission, CurrentChildren};
use recipebook_core::render::{render_recipe_text, ExportDocument};
use recipebook_core::rules::ValidationReport;
use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_core_types::RequestContext;
use recipebook_store::repo::{load_current_children, load_details};
use recipebook_store::{query, Result};
use rusqlite::Connection;

use super::access::{annotate, ensure_user, load_owned};

/// Recipe with steps by number and ingredients and tags by insertion
///
/// # Errors
/// `NotFound`, or `Forbidden` for another user's recipe.
pub fn get_recipe_details(
    conn: &Connection,
    ctx: &RequestContext,
    recipe_id: &str,
) -> Result<RecipeDetails> {
    let start = Instant::now();
    log_op_start!("recipe_show", request_id = %ctx.request_id, recipe_id = recipe_id);

    let result = owned_details(conn, ctx, recipe_id).map_err(|e| annotate(e, "recipe_show", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(details) => {
            log_op_end!(
                "recipe_show",
                duration_ms = duration_ms,
                step_count = details.steps.len(),
                ingredient_count = details.ingredients.len(),
                tag_count = details.tags.len(),
            );
        }
        Err(e) => {
            log_op_error!("recipe_show", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// The acting user's recipes in the requested order
///
/// # Errors
/// `InvalidInput` for a blank user; `Persistence` from the store.
pub fn list_recipes(
    conn: &Connection,
    ctx: &RequestContext,
    sort: &SortSpec,
    page: &Page,
) -> Result<Vec<Recipe>> {
    let start = Instant::now();
    log_op_start!(
        "recipe_list",
        request_id = %ctx.request_id,
        sort_field = %sort.field,
        sort_direction = ?sort.direction,
    );

    let result = ensure_user(ctx)
        .and_then(|()| query::list_recipes(conn, &ctx.user, sort, page))
        .map_err(|e| annotate(e, "recipe_list", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(recipes) => {
            log_op_end!("recipe_list", duration_ms = duration_ms, result_len = recipes.len());
        }
        Err(e) => {
            log_op_error!("recipe_list", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// Recipes of the acting user matching the query in any enabled scope
///
/// Results are ordered by name. Empty text or no enabled scope yields an
/// empty list.
///
/// # Errors
/// `InvalidInput` for a blank user; `Persistence` from the store.
pub fn search_recipes(
    conn: &Connection,
    ctx: &RequestContext,
    search: &SearchQuery,
    page: &Page,
) -> Result<Vec<Recipe>> {
    let start = Instant::now();
    log_op_start!("recipe_search", request_id = %ctx.request_id, scopes = ?search.scopes);

    let result = ensure_user(ctx)
        .and_then(|()| query::search_recipes(conn, &ctx.user, search, page))
        .map_err(|e| annotate(e, "recipe_search", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(recipes) => {
            log_op_end!("recipe_search", duration_ms = duration_ms, result_len = recipes.len());
        }
        Err(e) => {
            log_op_error!("recipe_search", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// Plain-text export of an owned recipe
///
/// # Errors
/// `NotFound`, or `Forbidden` for another user's recipe.
pub fn export_recipe(
    conn: &Connection,
    ctx: &RequestContext,
    recipe_id: &str,
) -> Result<ExportDocument> {
    let start = Instant::now();
    log_op_start!("recipe_export", request_id = %ctx.request_id, recipe_id = recipe_id);

    let result = owned_details(conn, ctx, recipe_id)
        .map(|details| {
            let text = render_recipe_text(
                &details.recipe,
                &details.ingredients,
                &details.steps,
                &details.tags,
            );
            ExportDocument::new(&details.recipe, text)
        })
        .map_err(|e| annotate(e, "recipe_export", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(document) => {
            log_op_end!(
                "recipe_export",
                duration_ms = duration_ms,
                file_name = %document.file_name,
                bytes = document.bytes.len(),
            );
        }
        Err(e) => {
            log_op_error!("recipe_export", e.clone(), duration_ms = duration_ms);
        }
    }
    result
}

/// Run every validator against a submission without writing anything
///
/// `recipe_id` selects the stored recipe an edit would apply to; `None`
/// validates a create. Repeating the call on an unchanged store gives the
/// same report.
///
/// # Errors
/// `NotFound` / `Forbidden` for the target recipe, `NotFound` for unknown
/// child ids, `InvalidInput` for malformed edit-sets.
pub fn validate_recipe_submission(
    conn: &Connection,
    ctx: &RequestContext,
    recipe_id: Option<&str>,
    submission: &RecipeSubmission,
) -> Result<ValidationReport> {
    let run = || -> Result<ValidationReport> {
        ensure_user(ctx)?;
        let current = match recipe_id {
            Some(id) => {
                load_owned(conn, ctx, id)?;
                load_current_children(conn, id)?
            }
            None => CurrentChildren::for_create(),
        };
        Ok(validate_submission(&current, submission)?)
    };
    run().map_err(|e| annotate(e, "recipe_validate", ctx))
}

fn owned_details(conn: &Connection, ctx: &RequestContext, recipe_id: &str) -> Result<RecipeDetails> {
    ensure_user(ctx)?;
    let recipe = load_owned(conn, ctx, recipe_id)?;
    load_details(conn, &recipe.id)?.ok_or_else(|| {
        RecipeBookError::RecipeNotFound {
            recipe_id: recipe_id.to_string(),
        }
        .into()
    })
}
