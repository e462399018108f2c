#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{stored_test_recipe, test_submission, unchanged_submission, RECIPE_ID};
use recipebook_core::commands::ExistingItemEdit;
use recipebook_core::model::{ChildKind, IngredientFields, RecipeFields, StepFields, TagFields};
use recipebook_core::reconcile::{plan_save, validate_submission, CurrentChildren};
use recipebook_core::rules::{Category, ItemRef, ViolationKind};
use recipebook_core::RecipeBookError;

#[test]
fn test_create_plans_every_child_in_order() {
    // GIVEN the Test recipe submission and an empty store
    let submission = test_submission();

    // WHEN planning the create
    let plan = plan_save(&CurrentChildren::for_create(), &submission, None).unwrap();

    // THEN steps are numbered 0, 1 and everything else is appended in order
    let steps: Vec<(u32, &str)> = plan
        .steps
        .appends
        .iter()
        .map(|s| (s.step_number, s.step.step_description.as_str()))
        .collect();
    assert_eq!(steps, vec![(0, "step 1"), (1, "step 2")]);

    let ingredients: Vec<&str> = plan
        .ingredients
        .appends
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(ingredients, vec!["apple", "pear"]);
    assert_eq!(plan.tags.appends.len(), 2);
    assert!(plan.steps.updates.is_empty() && plan.steps.deletes.is_empty());
}

#[test]
fn test_edit_matches_end_to_end_scenario() {
    // GIVEN the stored Test recipe
    let current = stored_test_recipe();

    // WHEN apple goes to 200 g, pear is deleted, strawberry appended,
    // step 2 is deleted, step 3 appended and tag 1 is renamed
    let mut submission = unchanged_submission();
    submission.ingredients.existing = vec![
        ExistingItemEdit::update(1, IngredientFields::new("apple", 200.0, "g")),
        ExistingItemEdit::delete(2),
    ];
    submission.ingredients.new = vec![IngredientFields::new("strawberry", 1.0, "pcs")];
    submission.steps.existing = vec![ExistingItemEdit::keep(1), ExistingItemEdit::delete(2)];
    submission.steps.new = vec![StepFields::new("step 3")];
    submission.tags.existing = vec![ExistingItemEdit::update(1, TagFields::new("tag 1 updated"))];

    let plan = plan_save(&current, &submission, current.max_step_number()).unwrap();

    // THEN the plan carries exactly those row changes
    assert_eq!(plan.ingredients.updates.len(), 1);
    assert_eq!(plan.ingredients.updates[0].0, 1);
    assert_eq!(plan.ingredients.updates[0].1.volume, 200.0);
    assert_eq!(plan.ingredients.deletes, vec![2]);
    assert_eq!(plan.ingredients.appends[0].name, "strawberry");

    assert_eq!(plan.steps.deletes, vec![2]);
    // AND the new step continues after the max stored number, even though
    // that step is deleted by this same request
    assert_eq!(plan.steps.appends[0].step_number, 2);

    assert_eq!(plan.tags.updates[0].1.tag_text, "tag 1 updated");
    assert_eq!(plan.counts(ChildKind::Tag).deleted, 0);
}

#[test]
fn test_deletion_discards_field_edits() {
    // GIVEN a stored step and an edit-set that deletes it
    let current = stored_test_recipe();
    let mut submission = unchanged_submission();
    submission.steps.existing = vec![ExistingItemEdit::delete(1)];

    // WHEN planning
    let plan = plan_save(&current, &submission, current.max_step_number()).unwrap();

    // THEN the step is deleted and never updated
    assert_eq!(plan.steps.deletes, vec![1]);
    assert!(plan.steps.updates.is_empty());
}

#[test]
fn test_new_steps_numbered_consecutively_after_max() {
    // GIVEN a recipe whose highest step number is 7
    let current = CurrentChildren::for_recipe(
        RECIPE_ID,
        vec![common::step(1, 3, "a"), common::step(2, 7, "b")],
        vec![],
        vec![],
    );
    let mut submission = unchanged_submission();
    submission.steps.new = vec![
        StepFields::new("x"),
        StepFields::new("y"),
        StepFields::new("z"),
    ];

    // WHEN planning with the recipe's own max
    let plan = plan_save(&current, &submission, current.max_step_number()).unwrap();

    // THEN the new steps get 8, 9, 10 in submission order
    let numbers: Vec<u32> = plan.steps.appends.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![8, 9, 10]);
}

#[test]
fn test_global_scope_max_is_respected() {
    // GIVEN a fresh recipe but a store whose global max step number is 41
    let submission = test_submission();

    // WHEN planning with the global max
    let plan = plan_save(&CurrentChildren::for_create(), &submission, Some(41)).unwrap();

    // THEN numbering continues from there
    let numbers: Vec<u32> = plan.steps.appends.iter().map(|s| s.step_number).collect();
    assert_eq!(numbers, vec![42, 43]);
}

#[test]
fn test_every_failed_category_is_reported() {
    // GIVEN a submission with a bad name, a bad ingredient and a bad tag
    let mut submission = test_submission();
    submission.recipe = RecipeFields::new("", "test recipe", 10, "test");
    submission.ingredients.new[1] = IngredientFields::new("pear", -1.0, "pcs");
    submission.tags.new.push(TagFields::new(""));

    // WHEN planning
    let err = plan_save(&CurrentChildren::for_create(), &submission, None).unwrap_err();

    // THEN info, ingredient and tag all fail; steps do not
    let RecipeBookError::Validation { report } = err else {
        panic!("expected validation failure");
    };
    assert_eq!(
        report.categories(),
        vec![Category::Info, Category::Ingredient, Category::Tag]
    );
    assert_eq!(
        report.get(Category::Ingredient).unwrap().item,
        ItemRef::New(1)
    );
}

#[test]
fn test_first_violation_per_category_wins() {
    // GIVEN two invalid new steps
    let mut submission = test_submission();
    submission.steps.new = vec![StepFields::new(""), StepFields::new("x".repeat(600))];

    // WHEN planning
    let err = plan_save(&CurrentChildren::for_create(), &submission, None).unwrap_err();

    // THEN only the first step's violation is reported
    let RecipeBookError::Validation { report } = err else {
        panic!("expected validation failure");
    };
    let failure = report.get(Category::Step).unwrap();
    assert_eq!(failure.item, ItemRef::New(0));
    assert_eq!(failure.violation.kind, ViolationKind::Required);
}

#[test]
fn test_existing_items_checked_before_new_ones() {
    // GIVEN an invalid update to a stored tag and an invalid new tag
    let current = stored_test_recipe();
    let mut submission = unchanged_submission();
    submission.tags.existing = vec![ExistingItemEdit::update(2, TagFields::new("  "))];
    submission.tags.new = vec![TagFields::new("y".repeat(81))];

    // WHEN planning
    let err = plan_save(&current, &submission, None).unwrap_err();

    // THEN the stored tag is the one reported
    let RecipeBookError::Validation { report } = err else {
        panic!("expected validation failure");
    };
    assert_eq!(report.get(Category::Tag).unwrap().item, ItemRef::Existing(2));
}

#[test]
fn test_duplicate_new_tags_fail_tag_category() {
    // GIVEN two identical new tags
    let mut submission = test_submission();
    submission.tags.new = vec![TagFields::new("soup"), TagFields::new("soup")];

    // WHEN planning
    let err = plan_save(&CurrentChildren::for_create(), &submission, None).unwrap_err();

    // THEN the second one is a duplicate
    let RecipeBookError::Validation { report } = err else {
        panic!("expected validation failure");
    };
    let failure = report.get(Category::Tag).unwrap();
    assert_eq!(failure.item, ItemRef::New(1));
    assert_eq!(failure.violation.kind, ViolationKind::Duplicate);
}

#[test]
fn test_new_tag_clashing_with_stored_tag_fails() {
    // GIVEN the stored Test recipe and a new tag equal to a kept one
    let current = stored_test_recipe();
    let mut submission = unchanged_submission();
    submission.tags.new = vec![TagFields::new("tag 2")];

    // WHEN planning
    let err = plan_save(&current, &submission, None).unwrap_err();

    // THEN the tag category fails
    assert!(matches!(err, RecipeBookError::Validation { .. }));
}

#[test]
fn test_deleted_tag_text_can_be_reused() {
    // GIVEN a stored tag deleted and re-added in the same request
    let current = stored_test_recipe();
    let mut submission = unchanged_submission();
    submission.tags.existing = vec![ExistingItemEdit::delete(2)];
    submission.tags.new = vec![TagFields::new("tag 2")];

    // WHEN planning
    let plan = plan_save(&current, &submission, None).unwrap();

    // THEN the request is accepted
    assert_eq!(plan.tags.deletes, vec![2]);
    assert_eq!(plan.tags.appends[0].tag_text, "tag 2");
}

#[test]
fn test_foreign_child_id_is_not_found() {
    // GIVEN an edit-set naming an ingredient this recipe does not own
    let current = stored_test_recipe();
    let mut submission = unchanged_submission();
    submission.ingredients.existing = vec![ExistingItemEdit::delete(99)];

    // WHEN planning
    let err = plan_save(&current, &submission, None).unwrap_err();

    // THEN the reference is rejected before any validation
    assert_eq!(
        err,
        RecipeBookError::ChildNotFound {
            kind: ChildKind::Ingredient,
            child_id: 99,
            recipe_id: RECIPE_ID.to_string(),
        }
    );
}

#[test]
fn test_validate_submission_reports_without_planning() {
    let mut submission = test_submission();
    assert!(validate_submission(&CurrentChildren::for_create(), &submission)
        .unwrap()
        .is_empty());

    submission.recipe.cooking_time = None;
    let report = validate_submission(&CurrentChildren::for_create(), &submission).unwrap();
    assert_eq!(report.categories(), vec![Category::Info]);
}
