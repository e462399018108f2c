//! Create and edit
//!
//! Both commands run the same pipeline inside one `IMMEDIATE` transaction:
//!
//! 1. Check the acting user and, for edits, ownership
//! 2. Load the stored children and plan the save (validate before mutate)
//! 3. Store uploaded images, remembering which ones are new to the store
//! 4. Write the recipe row and every child change, then commit
//!
//! If anything fails the transaction rolls back and the newly stored images
//! are released again. After a successful commit, images the recipe no
//! longer points at are released if nothing else uses them.

use std::time::Instant;

use chrono::Utc;
use recipebook_core::commands::{ImageEdit, RecipeSubmission};
use recipebook_core::errors::{ExError, ExErrorKind};
use recipebook_core::model::{ChildKind, ImageRef, Recipe, RecipeDetails, IMAGE_SLOTS};
use recipebook_core::reconcile::{
    plan_save, CurrentChildren, PlanCounts, ReconcilePlan, STEP_NUMBER_SCOPE,
};
use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_core_types::RequestContext;
use recipebook_store::errors::from_rusqlite;
use recipebook_store::repo::{load_current_children, load_details};
use recipebook_store::{ImageStore, Result, SqliteRepo};
use rusqlite::{Connection, TransactionBehavior};

use super::access::{annotate, ensure_user, load_owned};
use super::image_cleanup::{release_orphans, release_unused};

type ImageSlots = [Option<ImageRef>; IMAGE_SLOTS];

/// What a successful save wrote
#[derive(Debug, Clone, PartialEq)]
pub struct SaveOutcome {
    pub recipe_id: String,
    pub created: bool,
    pub steps: PlanCounts,
    pub ingredients: PlanCounts,
    pub tags: PlanCounts,
    /// The recipe as stored after commit
    pub details: RecipeDetails,
}

/// Create a recipe owned by the acting user
///
/// # Errors
/// - `InvalidInput` for a blank user or a submission that edits existing items
/// - `ValidationFailed` with the per-category report; nothing is written
/// - `Persistence` / `Io` from the store or the image collaborator
pub fn create_recipe(
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    submission: &RecipeSubmission,
) -> Result<SaveOutcome> {
    run_save("recipe_create", conn, images, ctx, None, submission)
}

/// Reconcile an existing recipe with a submission
///
/// # Errors
/// - `NotFound` if the recipe or a referenced child does not exist
/// - `Forbidden` if the acting user does not own the recipe
/// - `ValidationFailed` with the per-category report; nothing is written
/// - `Persistence` / `Io` from the store or the image collaborator
pub fn edit_recipe(
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    recipe_id: &str,
    submission: &RecipeSubmission,
) -> Result<SaveOutcome> {
    run_save("recipe_edit", conn, images, ctx, Some(recipe_id), submission)
}

fn run_save(
    op: &'static str,
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    recipe_id: Option<&str>,
    submission: &RecipeSubmission,
) -> Result<SaveOutcome> {
    let start = Instant::now();
    log_op_start!(
        op,
        request_id = %ctx.request_id,
        user_id = %ctx.user,
        recipe_id = recipe_id.unwrap_or_default(),
    );

    let result = save(conn, images, ctx, recipe_id, submission).map_err(|e| annotate(e, op, ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(outcome) => {
            log_op_end!(
                op,
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
                recipe_id = %outcome.recipe_id,
                step_count = outcome.details.steps.len(),
                ingredient_count = outcome.details.ingredients.len(),
                tag_count = outcome.details.tags.len(),
            );
        }
        Err(e) => {
            log_op_error!(op, e.clone(), duration_ms = duration_ms, request_id = %ctx.request_id);
        }
    }
    result
}

fn save(
    conn: &mut Connection,
    images: &dyn ImageStore,
    ctx: &RequestContext,
    recipe_id: Option<&str>,
    submission: &RecipeSubmission,
) -> Result<SaveOutcome> {
    ensure_user(ctx)?;

    let tx = conn
        .transaction_with_behavior(TransactionBehavior::Immediate)
        .map_err(from_rusqlite)?;

    let (existing, current) = match recipe_id {
        Some(id) => {
            let recipe = load_owned(&tx, ctx, id)?;
            let current = load_current_children(&tx, id)?;
            (Some(recipe), current)
        }
        None => (None, CurrentChildren::for_create()),
    };
    let created = existing.is_none();
    let target_id = match &existing {
        Some(recipe) => recipe.id.clone(),
        None => Recipe::generate_id(),
    };

    // read before any of this request's deletions apply
    let max_step_number = SqliteRepo::max_step_number(&tx, STEP_NUMBER_SCOPE, &target_id)?;
    let plan = plan_save(&current, submission, max_step_number)?;

    let previous_images: ImageSlots = existing
        .as_ref()
        .map(|recipe| recipe.images.clone())
        .unwrap_or_default();

    let mut fresh = Vec::new();
    let written = stage_images(&tx, images, &submission.images, &previous_images, &mut fresh)
        .and_then(|slots| {
            let recipe = build_recipe(existing, &target_id, ctx, &plan, slots);
            write_plan(&tx, &recipe, &plan, created)?;
            tx.commit().map_err(from_rusqlite)?;
            Ok(recipe)
        });

    let recipe = match written {
        Ok(recipe) => recipe,
        Err(err) => {
            release_unused(conn, images, &fresh);
            return Err(err);
        }
    };

    release_orphans(conn, images, &previous_images, &recipe.images);

    let details = load_details(conn, &recipe.id)?.ok_or_else(|| {
        ExError::new(ExErrorKind::Internal)
            .with_entity_id(recipe.id.clone())
            .with_message("Saved recipe could not be read back")
    })?;

    Ok(SaveOutcome {
        recipe_id: recipe.id,
        created,
        steps: plan.counts(ChildKind::Step),
        ingredients: plan.counts(ChildKind::Ingredient),
        tags: plan.counts(ChildKind::Tag),
        details,
    })
}

/// Resolve slot edits into the final slot contents
///
/// Every upload not referenced by any recipe before this save is pushed to
/// `fresh`, so a failed save can release exactly those.
fn stage_images(
    conn: &Connection,
    images: &dyn ImageStore,
    edits: &[ImageEdit; IMAGE_SLOTS],
    previous: &ImageSlots,
    fresh: &mut Vec<ImageRef>,
) -> Result<ImageSlots> {
    let mut slots = previous.clone();

    for (slot, edit) in slots.iter_mut().zip(edits) {
        match edit {
            ImageEdit::Keep => {}
            ImageEdit::Clear => *slot = None,
            ImageEdit::Replace(upload) => {
                let image = images.store(upload)?;
                if !fresh.contains(&image) && !SqliteRepo::image_ref_in_use(conn, &image)? {
                    fresh.push(image.clone());
                }
                *slot = Some(image);
            }
        }
    }

    Ok(slots)
}

fn build_recipe(
    existing: Option<Recipe>,
    recipe_id: &str,
    ctx: &RequestContext,
    plan: &ReconcilePlan,
    images: ImageSlots,
) -> Recipe {
    let fields = &plan.recipe;
    let mut recipe = match existing {
        Some(mut recipe) => {
            recipe.name = fields.name.clone();
            recipe.description = fields.description.clone();
            recipe.cooking_time = fields.cooking_time;
            recipe.category = fields.category.clone();
            recipe.updated_at = Utc::now();
            recipe
        }
        None => Recipe::new(
            recipe_id.to_string(),
            ctx.user.clone(),
            fields.name.clone(),
            fields.description.clone(),
            fields.cooking_time,
            fields.category.clone(),
        ),
    };
    recipe.images = images;
    recipe
}

/// Deletes first, then in-place updates, then appends
///
/// Removing and renaming rows before inserting keeps the per-recipe unique
/// indexes satisfied at every statement.
fn write_plan(conn: &Connection, recipe: &Recipe, plan: &ReconcilePlan, created: bool) -> Result<()> {
    if created {
        SqliteRepo::insert_recipe(conn, recipe)?;
    } else {
        SqliteRepo::update_recipe(conn, recipe)?;
    }
    let recipe_id = recipe.id.as_str();

    for step_id in &plan.steps.deletes {
        SqliteRepo::delete_step(conn, recipe_id, *step_id)?;
    }
    for ingredient_id in &plan.ingredients.deletes {
        SqliteRepo::delete_ingredient(conn, recipe_id, *ingredient_id)?;
    }
    for tag_id in &plan.tags.deletes {
        SqliteRepo::delete_tag(conn, recipe_id, *tag_id)?;
    }

    for (step_id, step) in &plan.steps.updates {
        SqliteRepo::update_step(conn, recipe_id, *step_id, &step.step_description)?;
    }
    for (ingredient_id, ingredient) in &plan.ingredients.updates {
        SqliteRepo::update_ingredient(
            conn,
            recipe_id,
            *ingredient_id,
            &ingredient.name,
            ingredient.volume,
            &ingredient.volume_measure,
        )?;
    }
    let renames: Vec<(i64, &str)> = plan
        .tags
        .updates
        .iter()
        .map(|(tag_id, tag)| (*tag_id, tag.tag_text.as_str()))
        .collect();
    SqliteRepo::update_tags(conn, recipe_id, &renames)?;

    for numbered in &plan.steps.appends {
        SqliteRepo::insert_step(
            conn,
            recipe_id,
            numbered.step_number,
            &numbered.step.step_description,
        )?;
    }
    for ingredient in &plan.ingredients.appends {
        SqliteRepo::insert_ingredient(
            conn,
            recipe_id,
            &ingredient.name,
            ingredient.volume,
            &ingredient.volume_measure,
        )?;
    }
    for tag in &plan.tags.appends {
        SqliteRepo::insert_tag(conn, recipe_id, &tag.tag_text)?;
    }

    Ok(())
}
