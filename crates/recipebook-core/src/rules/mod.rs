pub mod report;
pub mod validation;

pub use report::{Category, CategoryFailure, ItemRef, ValidationReport};
pub use validation::{
    validate_ingredient, validate_recipe, validate_step, validate_tag, ValidIngredient,
    ValidRecipe, ValidStep, ValidTag, Violation, ViolationKind, INGREDIENT_MEASURE_MAX,
    INGREDIENT_NAME_MAX, RECIPE_CATEGORY_MAX, RECIPE_NAME_MAX, STEP_DESCRIPTION_MAX, TAG_TEXT_MAX,
};
