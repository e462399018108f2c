//! SQL for recipe lists and searches
//!
//! Column names only ever come from the closed `SortField` enum; user text is
//! always bound as a parameter. Every query is filtered by owner and ordered
//! with `seq` as the final key, so ties keep insertion order.

use recipebook_core::model::Recipe;
use recipebook_core::query::{Page, SearchQuery, SearchScopes, SortDirection, SortSpec};
use recipebook_core_types::UserId;
use rusqlite::Connection;

use crate::db::CONTAINS_FN;
use crate::errors::{from_rusqlite, Result};
use crate::repo::sqlite_repo::{recipe_from_row, RECIPE_COLUMNS};

/// `SELECT` for a sorted, owner-scoped recipe list
///
/// Parameters: `?1` owner, `?2` limit, `?3` offset.
pub fn sort_sql(sort: &SortSpec) -> String {
    let direction = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };
    format!(
        "SELECT {} FROM recipes r WHERE r.user_id = ?1 \
         ORDER BY r.{} {}, r.seq ASC LIMIT ?2 OFFSET ?3",
        RECIPE_COLUMNS,
        sort.field.as_str(),
        direction
    )
}

/// `SELECT` for a search over the enabled scopes, `None` if none is enabled
///
/// Parameters: `?1` owner, `?2` search text, `?3` limit, `?4` offset.
/// Child scopes use `EXISTS` so a recipe with several matching ingredients
/// or tags is returned once.
pub fn search_sql(scopes: &SearchScopes) -> Option<String> {
    let column = |col: &str| format!("{}(r.{}, ?2)", CONTAINS_FN, col);
    let child = |table: &str, col: &str| {
        format!(
            "EXISTS (SELECT 1 FROM {table} c WHERE c.recipe_id = r.id AND {f}(c.{col}, ?2))",
            table = table,
            f = CONTAINS_FN,
            col = col
        )
    };

    let mut clauses = Vec::new();
    if scopes.in_names {
        clauses.push(column("name"));
    }
    if scopes.in_descriptions {
        clauses.push(column("description"));
    }
    if scopes.in_categories {
        clauses.push(column("category"));
    }
    if scopes.in_ingredients {
        clauses.push(child("recipe_ingredients", "name"));
    }
    if scopes.in_tags {
        clauses.push(child("recipe_tags", "tag_text"));
    }

    if clauses.is_empty() {
        return None;
    }

    Some(format!(
        "SELECT {} FROM recipes r WHERE r.user_id = ?1 AND ({}) \
         ORDER BY r.name ASC, r.seq ASC LIMIT ?3 OFFSET ?4",
        RECIPE_COLUMNS,
        clauses.join(" OR ")
    ))
}

fn limit_param(page: &Page) -> i64 {
    // SQLite reads a negative LIMIT as "no limit"
    page.limit.map(i64::from).unwrap_or(-1)
}

/// The owner's recipes in the requested order
pub fn list_recipes(
    conn: &Connection,
    owner: &UserId,
    sort: &SortSpec,
    page: &Page,
) -> Result<Vec<Recipe>> {
    let mut stmt = conn.prepare(&sort_sql(sort)).map_err(from_rusqlite)?;
    let recipes = stmt
        .query_map(
            rusqlite::params![owner.as_str(), limit_param(page), page.offset],
            recipe_from_row,
        )
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(recipes)
}

/// The owner's recipes matching the query, ordered by name
///
/// An empty search text or an empty scope set matches nothing.
pub fn search_recipes(
    conn: &Connection,
    owner: &UserId,
    query: &SearchQuery,
    page: &Page,
) -> Result<Vec<Recipe>> {
    if query.text().is_empty() {
        return Ok(Vec::new());
    }
    let Some(sql) = search_sql(&query.scopes) else {
        return Ok(Vec::new());
    };

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let recipes = stmt
        .query_map(
            rusqlite::params![owner.as_str(), query.text(), limit_param(page), page.offset],
            recipe_from_row,
        )
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(recipes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebook_core::query::SortField;

    #[test]
    fn test_sort_sql_whitelists_column_and_breaks_ties() {
        let sql = sort_sql(&SortSpec::descending(SortField::CookingTime));
        assert!(sql.contains("ORDER BY r.cooking_time DESC, r.seq ASC"));
    }

    #[test]
    fn test_search_sql_only_enabled_scopes() {
        assert!(search_sql(&SearchScopes::none()).is_none());

        let sql = search_sql(&SearchScopes {
            in_tags: true,
            in_names: true,
            ..SearchScopes::none()
        })
        .unwrap();
        assert!(sql.contains("recipebook_contains(r.name, ?2)"));
        assert!(sql.contains("FROM recipe_tags c"));
        assert!(!sql.contains("recipe_ingredients"));
        assert!(!sql.contains("recipebook_contains(r.description"));
        assert!(!sql.contains("recipebook_contains(r.category"));
    }
}
