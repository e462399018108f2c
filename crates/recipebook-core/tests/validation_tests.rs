#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use proptest::prelude::*;
use recipebook_core::model::{IngredientFields, RecipeFields, StepFields, TagFields};
use recipebook_core::reconcile::{validate_submission, CurrentChildren};
use recipebook_core::rules::{
    validate_ingredient, validate_recipe, validate_step, validate_tag, ViolationKind,
    INGREDIENT_MEASURE_MAX, RECIPE_NAME_MAX, STEP_DESCRIPTION_MAX,
};

#[test]
fn test_cleaned_values_validate_to_themselves() {
    let fields = RecipeFields::new("  Borscht\t", " beet soup ", 90, " soups ");
    let first = validate_recipe(&fields).unwrap();
    let again = validate_recipe(&RecipeFields::new(
        first.name.clone(),
        first.description.clone(),
        i64::from(first.cooking_time),
        first.category.clone(),
    ))
    .unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_boundary_lengths() {
    let name_ok = RecipeFields::new("n".repeat(RECIPE_NAME_MAX), "d", 1, "c");
    assert!(validate_recipe(&name_ok).is_ok());

    let step_too_long = StepFields::new("s".repeat(STEP_DESCRIPTION_MAX + 1));
    let violation = validate_step(&step_too_long).unwrap_err();
    assert!(matches!(violation.kind, ViolationKind::MaxLength { .. }));

    let measure_ok = IngredientFields::new("flour", 1.5, "m".repeat(INGREDIENT_MEASURE_MAX));
    assert!(validate_ingredient(&measure_ok).is_ok());
}

#[test]
fn test_cooking_time_beyond_u32_rejected() {
    let fields = RecipeFields::new("Stew", "slow", i64::from(u32::MAX) + 1, "mains");
    let violation = validate_recipe(&fields).unwrap_err();
    assert_eq!(violation.field, "cooking_time");
}

#[test]
fn test_missing_volume_is_required() {
    let fields = IngredientFields {
        name: "salt".into(),
        volume: None,
        volume_measure: "g".into(),
    };
    let violation = validate_ingredient(&fields).unwrap_err();
    assert_eq!(violation.field, "volume");
    assert_eq!(violation.kind, ViolationKind::Required);
}

proptest! {
    #[test]
    fn prop_tag_validation_is_idempotent(text in "\\PC{0,100}") {
        let first = validate_tag(&TagFields::new(text.clone()));
        let second = validate_tag(&TagFields::new(text));
        prop_assert_eq!(&first, &second);

        if let Ok(valid) = first {
            let revalidated = validate_tag(&TagFields::new(valid.tag_text.clone())).unwrap();
            prop_assert_eq!(revalidated, valid);
        }
    }

    #[test]
    fn prop_ingredient_volume_accepts_exactly_non_negative(volume in proptest::num::f64::ANY) {
        let result = validate_ingredient(&IngredientFields::new("x", volume, "g"));
        prop_assert_eq!(result.is_ok(), volume.is_finite() && volume >= 0.0);
    }

    #[test]
    fn prop_submission_report_is_stable(
        name in "\\PC{0,140}",
        minutes in -5i64..500,
        step in "\\PC{0,20}",
    ) {
        let mut submission = common::test_submission();
        submission.recipe.name = name;
        submission.recipe.cooking_time = Some(minutes);
        submission.steps.new.push(StepFields::new(step));

        let first = validate_submission(&CurrentChildren::for_create(), &submission).unwrap();
        let second = validate_submission(&CurrentChildren::for_create(), &submission).unwrap();
        prop_assert_eq!(first, second);
    }
}
