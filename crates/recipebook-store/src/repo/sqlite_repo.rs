//! Row-level persistence for recipes and their children
//!
//! Every function takes a `&Connection`; pass `&tx` to run inside a
//! transaction. Child mutations are always scoped by `recipe_id` so a row
//! owned by another recipe is never touched.

use chrono::{DateTime, Utc};
use recipebook_core::model::{ImageRef, Recipe, RecipeIngredient, RecipeStep, RecipeTag};
use recipebook_core::reconcile::StepNumberScope;
use recipebook_core_types::UserId;
use rusqlite::{Connection, OptionalExtension, Row};

use crate::errors::{from_rusqlite, Result};

/// Recipe columns in the order `recipe_from_row` expects
pub(crate) const RECIPE_COLUMNS: &str = "r.id, r.user_id, r.name, r.description, \
     r.cooking_time, r.category, r.image_1, r.image_2, r.image_3, r.created_at, r.updated_at";

/// SQLite repository for recipes, steps, ingredients and tags
pub struct SqliteRepo;

impl SqliteRepo {
    pub fn insert_recipe(conn: &Connection, recipe: &Recipe) -> Result<()> {
        let [image_1, image_2, image_3] = image_columns(recipe);
        conn.execute(
            "INSERT INTO recipes (id, user_id, name, description, cooking_time, category,
                                  image_1, image_2, image_3, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            rusqlite::params![
                recipe.id,
                recipe.user_id.as_str(),
                recipe.name,
                recipe.description,
                recipe.cooking_time,
                recipe.category,
                image_1,
                image_2,
                image_3,
                recipe.created_at.timestamp_millis(),
                recipe.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    /// Overwrite the mutable recipe columns; owner and created_at never change
    pub fn update_recipe(conn: &Connection, recipe: &Recipe) -> Result<()> {
        let [image_1, image_2, image_3] = image_columns(recipe);
        conn.execute(
            "UPDATE recipes SET name = ?2, description = ?3, cooking_time = ?4, category = ?5,
                                image_1 = ?6, image_2 = ?7, image_3 = ?8, updated_at = ?9
             WHERE id = ?1",
            rusqlite::params![
                recipe.id,
                recipe.name,
                recipe.description,
                recipe.cooking_time,
                recipe.category,
                image_1,
                image_2,
                image_3,
                recipe.updated_at.timestamp_millis(),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(())
    }

    pub fn get_recipe(conn: &Connection, recipe_id: &str) -> Result<Option<Recipe>> {
        let sql = format!("SELECT {} FROM recipes r WHERE r.id = ?", RECIPE_COLUMNS);
        conn.query_row(&sql, [recipe_id], recipe_from_row)
            .optional()
            .map_err(from_rusqlite)
    }

    /// Delete a recipe; children go with it through `ON DELETE CASCADE`
    ///
    /// Returns whether a row was removed.
    pub fn delete_recipe(conn: &Connection, recipe_id: &str) -> Result<bool> {
        let removed = conn
            .execute("DELETE FROM recipes WHERE id = ?", [recipe_id])
            .map_err(from_rusqlite)?;
        Ok(removed > 0)
    }

    /// Steps in ascending step_number order
    pub fn list_steps(conn: &Connection, recipe_id: &str) -> Result<Vec<RecipeStep>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, recipe_id, step_number, step_description FROM recipe_steps
                 WHERE recipe_id = ? ORDER BY step_number, id",
            )
            .map_err(from_rusqlite)?;

        let steps = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeStep {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    step_number: row.get(2)?,
                    step_description: row.get(3)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(steps)
    }

    /// Ingredients in insertion order
    pub fn list_ingredients(conn: &Connection, recipe_id: &str) -> Result<Vec<RecipeIngredient>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, recipe_id, name, volume, volume_measure FROM recipe_ingredients
                 WHERE recipe_id = ? ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let ingredients = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeIngredient {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    name: row.get(2)?,
                    volume: row.get(3)?,
                    volume_measure: row.get(4)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(ingredients)
    }

    /// Tags in insertion order
    pub fn list_tags(conn: &Connection, recipe_id: &str) -> Result<Vec<RecipeTag>> {
        let mut stmt = conn
            .prepare("SELECT id, recipe_id, tag_text FROM recipe_tags WHERE recipe_id = ? ORDER BY id")
            .map_err(from_rusqlite)?;

        let tags = stmt
            .query_map([recipe_id], |row| {
                Ok(RecipeTag {
                    id: row.get(0)?,
                    recipe_id: row.get(1)?,
                    tag_text: row.get(2)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(tags)
    }

    pub fn insert_step(
        conn: &Connection,
        recipe_id: &str,
        step_number: u32,
        step_description: &str,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipe_steps (recipe_id, step_number, step_description) VALUES (?1, ?2, ?3)",
            rusqlite::params![recipe_id, step_number, step_description],
        )
        .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    /// Rewrite a step's text; its number is kept
    pub fn update_step(
        conn: &Connection,
        recipe_id: &str,
        step_id: i64,
        step_description: &str,
    ) -> Result<()> {
        conn.execute(
            "UPDATE recipe_steps SET step_description = ?3 WHERE id = ?1 AND recipe_id = ?2",
            rusqlite::params![step_id, recipe_id, step_description],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn delete_step(conn: &Connection, recipe_id: &str, step_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM recipe_steps WHERE id = ?1 AND recipe_id = ?2",
            rusqlite::params![step_id, recipe_id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn insert_ingredient(
        conn: &Connection,
        recipe_id: &str,
        name: &str,
        volume: f64,
        volume_measure: &str,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipe_ingredients (recipe_id, name, volume, volume_measure)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![recipe_id, name, volume, volume_measure],
        )
        .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_ingredient(
        conn: &Connection,
        recipe_id: &str,
        ingredient_id: i64,
        name: &str,
        volume: f64,
        volume_measure: &str,
    ) -> Result<()> {
        conn.execute(
            "UPDATE recipe_ingredients SET name = ?3, volume = ?4, volume_measure = ?5
             WHERE id = ?1 AND recipe_id = ?2",
            rusqlite::params![ingredient_id, recipe_id, name, volume, volume_measure],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn delete_ingredient(conn: &Connection, recipe_id: &str, ingredient_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM recipe_ingredients WHERE id = ?1 AND recipe_id = ?2",
            rusqlite::params![ingredient_id, recipe_id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    pub fn insert_tag(conn: &Connection, recipe_id: &str, tag_text: &str) -> Result<i64> {
        conn.execute(
            "INSERT INTO recipe_tags (recipe_id, tag_text) VALUES (?1, ?2)",
            rusqlite::params![recipe_id, tag_text],
        )
        .map_err(from_rusqlite)?;
        Ok(conn.last_insert_rowid())
    }

    /// Rename several tags at once
    ///
    /// Renamed rows are first parked on a per-row placeholder, so exchanging
    /// two texts never trips the `(recipe_id, tag_text)` unique index halfway.
    /// The placeholder starts with NUL, which tag validation never accepts.
    pub fn update_tags(conn: &Connection, recipe_id: &str, renames: &[(i64, &str)]) -> Result<()> {
        for (tag_id, _) in renames {
            conn.execute(
                "UPDATE recipe_tags SET tag_text = char(0) || id WHERE id = ?1 AND recipe_id = ?2",
                rusqlite::params![tag_id, recipe_id],
            )
            .map_err(from_rusqlite)?;
        }
        for (tag_id, tag_text) in renames {
            conn.execute(
                "UPDATE recipe_tags SET tag_text = ?3 WHERE id = ?1 AND recipe_id = ?2",
                rusqlite::params![tag_id, recipe_id, tag_text],
            )
            .map_err(from_rusqlite)?;
        }
        Ok(())
    }

    pub fn delete_tag(conn: &Connection, recipe_id: &str, tag_id: i64) -> Result<()> {
        conn.execute(
            "DELETE FROM recipe_tags WHERE id = ?1 AND recipe_id = ?2",
            rusqlite::params![tag_id, recipe_id],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Highest stored step number in the given scope, `None` if there is none
    ///
    /// `recipe_id` is ignored for `StepNumberScope::Global`.
    pub fn max_step_number(
        conn: &Connection,
        scope: StepNumberScope,
        recipe_id: &str,
    ) -> Result<Option<u32>> {
        let max = match scope {
            StepNumberScope::PerRecipe => conn.query_row(
                "SELECT MAX(step_number) FROM recipe_steps WHERE recipe_id = ?",
                [recipe_id],
                |row| row.get(0),
            ),
            StepNumberScope::Global => {
                conn.query_row("SELECT MAX(step_number) FROM recipe_steps", [], |row| {
                    row.get(0)
                })
            }
        }
        .map_err(from_rusqlite)?;

        Ok(max)
    }

    /// Whether any recipe, of any user, still points at this image
    pub fn image_ref_in_use(conn: &Connection, image: &ImageRef) -> Result<bool> {
        let in_use = conn
            .query_row(
                "SELECT EXISTS (SELECT 1 FROM recipes
                                WHERE image_1 = ?1 OR image_2 = ?1 OR image_3 = ?1)",
                [image.as_str()],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(in_use)
    }

    pub fn count_recipes(conn: &Connection, user: &UserId) -> Result<i64> {
        conn.query_row(
            "SELECT COUNT(*) FROM recipes WHERE user_id = ?",
            [user.as_str()],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)
    }
}

fn image_columns(recipe: &Recipe) -> [Option<&str>; 3] {
    let [a, b, c] = &recipe.images;
    [
        a.as_ref().map(ImageRef::as_str),
        b.as_ref().map(ImageRef::as_str),
        c.as_ref().map(ImageRef::as_str),
    ]
}

fn timestamp(millis: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(millis).unwrap_or_default()
}

/// Map a row selected with [`RECIPE_COLUMNS`]
pub(crate) fn recipe_from_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    let image = |idx: usize| -> rusqlite::Result<Option<ImageRef>> {
        Ok(row.get::<_, Option<String>>(idx)?.map(ImageRef::new))
    };

    Ok(Recipe {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        name: row.get(2)?,
        description: row.get(3)?,
        cooking_time: row.get(4)?,
        category: row.get(5)?,
        images: [image(6)?, image(7)?, image(8)?],
        created_at: timestamp(row.get(9)?),
        updated_at: timestamp(row.get(10)?),
    })
}
