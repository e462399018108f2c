//! Owner-scoped list and search queries

mod builder;

pub use builder::{list_recipes, search_recipes, search_sql, sort_sql};
