// Integration tests for SqliteRepo and hydration

use recipebook_core::model::{ImageRef, Recipe};
use recipebook_core::reconcile::StepNumberScope;
use recipebook_core_types::UserId;
use recipebook_store::repo::{load_current_children, load_details};
use recipebook_store::{db, migrations, SqliteRepo};
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = db::open_in_memory().unwrap();
    migrations::apply_migrations(&mut conn).unwrap();
    conn
}

fn recipe(id: &str, owner: &str, name: &str) -> Recipe {
    Recipe::new(
        id.to_string(),
        UserId::new(owner),
        name.to_string(),
        "description".to_string(),
        15,
        "category".to_string(),
    )
}

#[test]
fn test_recipe_roundtrip_with_children() {
    // Given: a recipe with steps inserted out of number order
    let conn = setup();
    let mut stored = recipe("r1", "alice", "Pancakes");
    stored.images[1] = Some(ImageRef::new("ab/abcd.jpg"));
    SqliteRepo::insert_recipe(&conn, &stored).unwrap();
    SqliteRepo::insert_step(&conn, "r1", 5, "flip").unwrap();
    SqliteRepo::insert_step(&conn, "r1", 2, "mix").unwrap();
    SqliteRepo::insert_ingredient(&conn, "r1", "flour", 200.0, "g").unwrap();
    SqliteRepo::insert_ingredient(&conn, "r1", "milk", 0.5, "l").unwrap();
    SqliteRepo::insert_tag(&conn, "r1", "breakfast").unwrap();

    // When: the details are loaded
    let details = load_details(&conn, "r1").unwrap().unwrap();

    // Then: fields survive and children come back in display order
    assert_eq!(details.recipe.name, "Pancakes");
    assert_eq!(details.recipe.user_id, UserId::new("alice"));
    assert_eq!(details.recipe.images[1], Some(ImageRef::new("ab/abcd.jpg")));
    assert_eq!(
        details.recipe.created_at.timestamp_millis(),
        stored.created_at.timestamp_millis()
    );
    let steps: Vec<&str> = details.steps.iter().map(|s| s.step_description.as_str()).collect();
    assert_eq!(steps, vec!["mix", "flip"]);
    let ingredients: Vec<&str> = details.ingredients.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(ingredients, vec!["flour", "milk"]);
    assert_eq!(details.tags[0].tag_text, "breakfast");
}

#[test]
fn test_missing_recipe_loads_as_none() {
    let conn = setup();
    assert!(load_details(&conn, "nope").unwrap().is_none());
}

#[test]
fn test_delete_cascades_to_children() {
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "Soup")).unwrap();
    SqliteRepo::insert_step(&conn, "r1", 0, "boil").unwrap();
    SqliteRepo::insert_tag(&conn, "r1", "hot").unwrap();

    assert!(SqliteRepo::delete_recipe(&conn, "r1").unwrap());
    assert!(!SqliteRepo::delete_recipe(&conn, "r1").unwrap());

    let orphans: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM recipe_steps) + (SELECT COUNT(*) FROM recipe_tags)",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn test_child_mutations_are_scoped_to_recipe() {
    // Given: two recipes, each with a step
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "A")).unwrap();
    SqliteRepo::insert_recipe(&conn, &recipe("r2", "alice", "B")).unwrap();
    let foreign = SqliteRepo::insert_step(&conn, "r2", 0, "keep me").unwrap();

    // When: r1 tries to update and delete r2's step
    SqliteRepo::update_step(&conn, "r1", foreign, "hijacked").unwrap();
    SqliteRepo::delete_step(&conn, "r1", foreign).unwrap();

    // Then: r2's step is untouched
    let steps = SqliteRepo::list_steps(&conn, "r2").unwrap();
    assert_eq!(steps.len(), 1);
    assert_eq!(steps[0].step_description, "keep me");
}

#[test]
fn test_max_step_number_scopes() {
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "A")).unwrap();
    SqliteRepo::insert_recipe(&conn, &recipe("r2", "bob", "B")).unwrap();
    SqliteRepo::insert_step(&conn, "r1", 3, "a").unwrap();
    SqliteRepo::insert_step(&conn, "r2", 9, "b").unwrap();

    let per_recipe = SqliteRepo::max_step_number(&conn, StepNumberScope::PerRecipe, "r1").unwrap();
    let global = SqliteRepo::max_step_number(&conn, StepNumberScope::Global, "r1").unwrap();
    let empty = SqliteRepo::max_step_number(&conn, StepNumberScope::PerRecipe, "r3").unwrap();

    assert_eq!(per_recipe, Some(3));
    assert_eq!(global, Some(9));
    assert_eq!(empty, None);
}

#[test]
fn test_tag_texts_can_be_swapped() {
    // Given: tags "a" and "b"
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "A")).unwrap();
    let a = SqliteRepo::insert_tag(&conn, "r1", "a").unwrap();
    let b = SqliteRepo::insert_tag(&conn, "r1", "b").unwrap();

    // When: their texts are exchanged in one call
    SqliteRepo::update_tags(&conn, "r1", &[(a, "b"), (b, "a")]).unwrap();

    // Then: the unique index did not fire and the texts are swapped
    let tags = SqliteRepo::list_tags(&conn, "r1").unwrap();
    assert_eq!(tags[0].tag_text, "b");
    assert_eq!(tags[1].tag_text, "a");
}

#[test]
fn test_duplicate_tag_is_integrity_failure() {
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "A")).unwrap();
    SqliteRepo::insert_tag(&conn, "r1", "soup").unwrap();

    let err = SqliteRepo::insert_tag(&conn, "r1", "soup").unwrap_err();
    assert_eq!(err.code(), "ERR_PERSISTENCE");
    assert!(err.message().contains("UNIQUE"));
}

#[test]
fn test_image_ref_in_use() {
    let conn = setup();
    let image = ImageRef::new("ab/abcd.jpg");
    let mut with_image = recipe("r1", "alice", "A");
    with_image.images[2] = Some(image.clone());
    SqliteRepo::insert_recipe(&conn, &with_image).unwrap();

    assert!(SqliteRepo::image_ref_in_use(&conn, &image).unwrap());
    assert!(!SqliteRepo::image_ref_in_use(&conn, &ImageRef::new("cd/cdef.jpg")).unwrap());
}

#[test]
fn test_current_children_snapshot() {
    let conn = setup();
    SqliteRepo::insert_recipe(&conn, &recipe("r1", "alice", "A")).unwrap();
    SqliteRepo::insert_step(&conn, "r1", 4, "x").unwrap();

    let current = load_current_children(&conn, "r1").unwrap();
    assert_eq!(current.recipe_id.as_deref(), Some("r1"));
    assert_eq!(current.max_step_number(), Some(4));
}
