//! Recipebook Store - SQLite persistence and image files
//!
//! Provides:
//! - SQLite schema managed by checksummed, embedded migrations
//! - `SqliteRepo` row-level CRUD for recipes and their children
//! - Hydration of a recipe with its ordered child collections
//! - Sort and search queries, with Unicode-aware case-insensitive matching
//! - `FsImageStore`, a content-addressed image directory

pub mod db;
pub mod errors;
pub mod images;
pub mod migrations;
pub mod query;
pub mod repo;

pub use errors::Result;
pub use images::{FsImageStore, ImageStore};
pub use repo::SqliteRepo;
