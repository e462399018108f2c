use std::path::Path;

use recipebook_core::commands::ImageUpload;
use recipebook_core::model::{IngredientFields, RecipeFields, StepFields, TagFields};
use recipebook_core::RecipeSubmission;
use recipebook_core_types::{RequestContext, UserId};
use recipebook_store::{db, migrations, FsImageStore};
use rusqlite::Connection;
use tempfile::TempDir;

/// In-memory database plus an image directory that lives as long as the test
pub struct Harness {
    pub conn: Connection,
    pub images: FsImageStore,
    // keeps the directory alive; only the image tests look inside
    #[allow(dead_code)]
    pub media: TempDir,
}

pub fn setup() -> Harness {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    let media = TempDir::new().unwrap();
    let images = FsImageStore::new(media.path());
    Harness {
        conn,
        images,
        media,
    }
}

#[allow(dead_code)]
pub fn alice() -> RequestContext {
    RequestContext::for_user(UserId::new("alice"))
}

#[allow(dead_code)]
pub fn bob() -> RequestContext {
    RequestContext::for_user(UserId::new("bob"))
}

/// The "Test" recipe: apple 100 g, pear 1 pcs, "step 1", "step 2",
/// tags "tag 1" and "tag 2"
#[allow(dead_code)]
pub fn test_submission() -> RecipeSubmission {
    RecipeSubmission::new(
        RecipeFields::new("Test", "test recipe", 10, "test"),
        vec![StepFields::new("step 1"), StepFields::new("step 2")],
        vec![
            IngredientFields::new("apple", 100.0, "g"),
            IngredientFields::new("pear", 1.0, "pcs"),
        ],
        vec![TagFields::new("tag 1"), TagFields::new("tag 2")],
    )
}

/// A recipe with only its metadata
#[allow(dead_code)]
pub fn named_submission(name: &str, cooking_time: i64, category: &str) -> RecipeSubmission {
    RecipeSubmission::new(
        RecipeFields::new(name, format!("{} description", name), cooking_time, category),
        vec![],
        vec![],
        vec![],
    )
}

#[allow(dead_code)]
pub fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

/// Every row of every recipe table, rendered for equality checks
#[allow(dead_code)]
pub fn dump(conn: &Connection) -> Vec<String> {
    let mut out = Vec::new();
    for table in ["recipes", "recipe_steps", "recipe_ingredients", "recipe_tags"] {
        let mut stmt = conn
            .prepare(&format!("SELECT * FROM {} ORDER BY 1", table))
            .unwrap();
        let columns = stmt.column_count();
        let mut rows = stmt.query([]).unwrap();
        while let Some(row) = rows.next().unwrap() {
            let values: Vec<String> = (0..columns)
                .map(|i| format!("{:?}", row.get_ref(i).unwrap()))
                .collect();
            out.push(format!("{}: {}", table, values.join(", ")));
        }
    }
    out
}

/// Number of regular files below `dir`
#[allow(dead_code)]
pub fn file_count(dir: &Path) -> usize {
    let mut count = 0;
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            count += file_count(&path);
        } else {
            count += 1;
        }
    }
    count
}
