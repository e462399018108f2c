// Owner-scoped reads, export, validation and delete

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{alice, bob, dump, named_submission, setup, test_submission};
use recipebook_core::errors::ExErrorKind;
use recipebook_core::model::TagFields;
use recipebook_core::query::{Page, SearchQuery, SearchScopes, SortField, SortSpec};
use recipebook_core::rules::Category;
use recipebook_engine::commands::{
    create_recipe, delete_recipe, export_recipe, get_recipe_details, list_recipes, search_recipes,
    validate_recipe_submission,
};

fn names(recipes: &[recipebook_core::Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_details_are_owner_only() {
    let mut h = setup();
    let created = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();

    let details = get_recipe_details(&h.conn, &alice(), &created.recipe_id).unwrap();
    assert_eq!(details, created.details);

    let err = get_recipe_details(&h.conn, &bob(), &created.recipe_id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);

    let err = get_recipe_details(&h.conn, &alice(), "missing").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_list_is_scoped_and_sorted() {
    // GIVEN: recipes of two users
    let mut h = setup();
    for (name, minutes) in [("Borscht", 90), ("Apple pie", 60), ("Crepes", 20)] {
        create_recipe(
            &mut h.conn,
            &h.images,
            &alice(),
            &named_submission(name, minutes, "x"),
        )
        .unwrap();
    }
    create_recipe(
        &mut h.conn,
        &h.images,
        &bob(),
        &named_submission("Bob's stew", 30, "x"),
    )
    .unwrap();

    // WHEN: alice lists by name and by cooking time descending
    let by_name = list_recipes(&h.conn, &alice(), &SortSpec::default(), &Page::all()).unwrap();
    let by_time = list_recipes(
        &h.conn,
        &alice(),
        &SortSpec::descending(SortField::CookingTime),
        &Page::all(),
    )
    .unwrap();

    // THEN: only her recipes, in the requested order
    assert_eq!(names(&by_name), vec!["Apple pie", "Borscht", "Crepes"]);
    assert_eq!(names(&by_time), vec!["Borscht", "Apple pie", "Crepes"]);

    let page = list_recipes(&h.conn, &alice(), &SortSpec::default(), &Page::new(1, 1)).unwrap();
    assert_eq!(names(&page), vec!["Borscht"]);
}

#[test]
fn test_search_unions_enabled_scopes() {
    // GIVEN: one recipe matching by name, one by tag
    let mut h = setup();
    create_recipe(
        &mut h.conn,
        &h.images,
        &alice(),
        &named_submission("Chicken soup", 40, "soups"),
    )
    .unwrap();
    let mut tagged = named_submission("Stew", 120, "mains");
    tagged.tags.new.push(TagFields::new("chicken"));
    create_recipe(&mut h.conn, &h.images, &alice(), &tagged).unwrap();
    create_recipe(
        &mut h.conn,
        &h.images,
        &bob(),
        &named_submission("Chicken wings", 30, "snacks"),
    )
    .unwrap();

    // WHEN / THEN: names only finds one, names+tags finds both
    let names_only = SearchQuery::new("CHICKEN", SearchScopes::names_only());
    let found = search_recipes(&h.conn, &alice(), &names_only, &Page::all()).unwrap();
    assert_eq!(names(&found), vec!["Chicken soup"]);

    let scopes = SearchScopes {
        in_names: true,
        in_tags: true,
        ..SearchScopes::none()
    };
    let both = SearchQuery::new("chicken", scopes);
    let found = search_recipes(&h.conn, &alice(), &both, &Page::all()).unwrap();
    assert_eq!(names(&found), vec!["Chicken soup", "Stew"]);

    // no scope enabled: nothing, even though the text matches
    let none = SearchQuery::new("chicken", SearchScopes::none());
    assert!(search_recipes(&h.conn, &alice(), &none, &Page::all())
        .unwrap()
        .is_empty());
}

#[test]
fn test_export_document() {
    let mut h = setup();
    let created = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();

    let document = export_recipe(&h.conn, &alice(), &created.recipe_id).unwrap();

    assert_eq!(document.file_name, "Test.txt");
    let text = String::from_utf8(document.bytes).unwrap();
    assert!(text.starts_with("Test\n=====\n"));
    assert!(text.contains("- apple: 100 g\n"));
    assert!(text.contains("1) step 1\n2) step 2\n"));
    assert!(text.contains("- tag 2"));

    let err = export_recipe(&h.conn, &bob(), &created.recipe_id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
}

#[test]
fn test_validation_is_repeatable_and_side_effect_free() {
    // GIVEN: a stored recipe and a submission clashing with one of its tags
    let mut h = setup();
    let created = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();
    let before = dump(&h.conn);
    let mut submission = named_submission("Test", 10, "test");
    submission.tags.new.push(TagFields::new("tag 1"));

    // WHEN: it is validated twice
    let first =
        validate_recipe_submission(&h.conn, &alice(), Some(&created.recipe_id), &submission)
            .unwrap();
    let second =
        validate_recipe_submission(&h.conn, &alice(), Some(&created.recipe_id), &submission)
            .unwrap();

    // THEN: identical reports, store untouched
    assert_eq!(first, second);
    assert_eq!(first.categories(), vec![Category::Tag]);
    assert_eq!(dump(&h.conn), before);

    // a create with the same tag is fine
    let create = validate_recipe_submission(&h.conn, &alice(), None, &submission).unwrap();
    assert!(create.is_empty());
}

#[test]
fn test_delete_cascades_children() {
    // GIVEN: two recipes of alice
    let mut h = setup();
    let doomed = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();
    let kept = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();

    // WHEN: one is deleted
    delete_recipe(&mut h.conn, &h.images, &alice(), &doomed.recipe_id).unwrap();

    // THEN: its children are gone, the other recipe is complete
    let rows = dump(&h.conn);
    assert!(rows.iter().all(|row| !row.contains(&doomed.recipe_id)));
    let details = get_recipe_details(&h.conn, &alice(), &kept.recipe_id).unwrap();
    assert_eq!(details.steps.len(), 2);
    assert_eq!(
        get_recipe_details(&h.conn, &alice(), &doomed.recipe_id)
            .unwrap_err()
            .kind(),
        ExErrorKind::NotFound
    );
}

#[test]
fn test_delete_checks_ownership() {
    let mut h = setup();
    let created = create_recipe(&mut h.conn, &h.images, &alice(), &test_submission()).unwrap();
    let before = dump(&h.conn);

    let err = delete_recipe(&mut h.conn, &h.images, &bob(), &created.recipe_id).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Forbidden);
    assert_eq!(dump(&h.conn), before);

    let err = delete_recipe(&mut h.conn, &h.images, &alice(), "missing").unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}
