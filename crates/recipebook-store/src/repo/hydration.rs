//! Loads a recipe together with its child collections

use recipebook_core::model::RecipeDetails;
use recipebook_core::reconcile::CurrentChildren;
use rusqlite::Connection;

use crate::errors::Result;
use crate::repo::SqliteRepo;

/// Recipe plus children in display order, or `None` if the id is unknown
pub fn load_details(conn: &Connection, recipe_id: &str) -> Result<Option<RecipeDetails>> {
    let Some(recipe) = SqliteRepo::get_recipe(conn, recipe_id)? else {
        return Ok(None);
    };

    Ok(Some(RecipeDetails {
        steps: SqliteRepo::list_steps(conn, &recipe.id)?,
        ingredients: SqliteRepo::list_ingredients(conn, &recipe.id)?,
        tags: SqliteRepo::list_tags(conn, &recipe.id)?,
        recipe,
    }))
}

/// Snapshot of the stored children the reconciliation planner works against
pub fn load_current_children(conn: &Connection, recipe_id: &str) -> Result<CurrentChildren> {
    Ok(CurrentChildren::for_recipe(
        recipe_id,
        SqliteRepo::list_steps(conn, recipe_id)?,
        SqliteRepo::list_ingredients(conn, recipe_id)?,
        SqliteRepo::list_tags(conn, recipe_id)?,
    ))
}
