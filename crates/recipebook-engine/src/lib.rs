//! Recipebook Engine - Orchestration layer
//!
//! Coordinates the pure domain logic in `recipebook-core` with the SQLite
//! store, the image store and the recipe generator. Every command takes its
//! connection, collaborators and [`RequestContext`](recipebook_core_types::RequestContext)
//! explicitly and returns a `Result` carrying the structured `ExError`.

pub mod commands;
pub mod config;
pub mod generator;

pub use config::AppConfig;
pub use generator::{FakeGenerator, GeminiGenerator, RecipeGenerator};
