//! AI-assisted recipe drafts

use std::time::Instant;

use recipebook_core::generation::{GeneratedRecipe, GenerationRequest, RecipeDraft};
use recipebook_core::reconcile::{validate_submission, CurrentChildren};
use recipebook_core::{log_op_end, log_op_error, log_op_start};
use recipebook_core_types::RequestContext;
use recipebook_store::Result;

use super::access::{annotate, ensure_user};
use crate::generator::RecipeGenerator;

/// Ask the generator for a recipe and validate it as a create submission
///
/// Nothing is stored. The caller reviews the draft and saves it through
/// `create_recipe`; a draft that breaks a rule comes back with its report.
///
/// # Errors
/// - `InvalidInput` if either description is blank
/// - `ExternalService` if the generator fails or answers malformed JSON
/// - `Timeout` if the generator does not answer in time
pub fn generate_recipe_draft(
    generator: &dyn RecipeGenerator,
    ctx: &RequestContext,
    ingredients_description: &str,
    recipe_description: &str,
) -> Result<RecipeDraft> {
    let start = Instant::now();
    log_op_start!("recipe_generate", request_id = %ctx.request_id, user_id = %ctx.user);

    let result = build_draft(generator, ctx, ingredients_description, recipe_description)
        .map_err(|e| annotate(e, "recipe_generate", ctx));

    let duration_ms = start.elapsed().as_millis() as u64;
    match &result {
        Ok(draft) => {
            log_op_end!(
                "recipe_generate",
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
                valid = draft.is_valid(),
                step_count = draft.submission.steps.new.len(),
                ingredient_count = draft.submission.ingredients.new.len(),
            );
        }
        Err(e) => {
            log_op_error!(
                "recipe_generate",
                e.clone(),
                duration_ms = duration_ms,
                request_id = %ctx.request_id,
            );
        }
    }
    result
}

fn build_draft(
    generator: &dyn RecipeGenerator,
    ctx: &RequestContext,
    ingredients_description: &str,
    recipe_description: &str,
) -> Result<RecipeDraft> {
    ensure_user(ctx)?;
    let request = GenerationRequest::new(ingredients_description, recipe_description)?;

    let payload = generator.generate(&request)?;
    let submission = GeneratedRecipe::parse(&payload)?.into_submission();
    let report = validate_submission(&CurrentChildren::for_create(), &submission)?;

    Ok(RecipeDraft { submission, report })
}
