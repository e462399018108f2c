//! Plain-text renderings of stored recipes

pub mod export;

pub use export::{export_file_name, render_recipe_text, ExportDocument};
