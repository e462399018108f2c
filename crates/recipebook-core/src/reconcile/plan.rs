use std::collections::{HashMap, HashSet};

use super::current::CurrentChildren;
use super::next_step_number;
use crate::commands::{ChildEdits, ExistingEdit, RecipeSubmission};
use crate::errors::{RecipeBookError, Result};
use crate::model::ChildKind;
use crate::rules::{
    validate_ingredient, validate_recipe, validate_step, validate_tag, Category, CategoryFailure,
    ItemRef, ValidIngredient, ValidRecipe, ValidStep, ValidTag, ValidationReport, Violation,
    ViolationKind,
};

/// A new step with its assigned number
#[derive(Debug, Clone, PartialEq)]
pub struct NumberedStep {
    pub step_number: u32,
    pub step: ValidStep,
}

/// Row-level changes for one child collection
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPlan<V, A = V> {
    /// Stored items to overwrite in place, by id
    pub updates: Vec<(i64, V)>,
    pub deletes: Vec<i64>,
    /// Items to insert, in submission order
    pub appends: Vec<A>,
}

impl<V, A> Default for ChildPlan<V, A> {
    fn default() -> Self {
        Self {
            updates: Vec::new(),
            deletes: Vec::new(),
            appends: Vec::new(),
        }
    }
}

impl<V, A> ChildPlan<V, A> {
    fn map_appends<B>(self, f: impl FnMut(A) -> Result<B>) -> Result<ChildPlan<V, B>> {
        Ok(ChildPlan {
            updates: self.updates,
            deletes: self.deletes,
            appends: self.appends.into_iter().map(f).collect::<Result<_>>()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.deletes.is_empty() && self.appends.is_empty()
    }
}

/// Row counts touched by a plan, for logging and save summaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanCounts {
    pub updated: usize,
    pub deleted: usize,
    pub appended: usize,
}

impl PlanCounts {
    fn of<V, A>(plan: &ChildPlan<V, A>) -> Self {
        Self {
            updated: plan.updates.len(),
            deleted: plan.deletes.len(),
            appended: plan.appends.len(),
        }
    }
}

/// Everything the engine needs to write for one save
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcilePlan {
    pub recipe: ValidRecipe,
    pub steps: ChildPlan<ValidStep, NumberedStep>,
    pub ingredients: ChildPlan<ValidIngredient>,
    pub tags: ChildPlan<ValidTag>,
}

impl ReconcilePlan {
    pub fn counts(&self, kind: ChildKind) -> PlanCounts {
        match kind {
            ChildKind::Step => PlanCounts::of(&self.steps),
            ChildKind::Ingredient => PlanCounts::of(&self.ingredients),
            ChildKind::Tag => PlanCounts::of(&self.tags),
        }
    }
}

/// Plan a create or edit
///
/// `max_step_number` is the maximum stored step number in the configured
/// numbering scope, looked up before any of this request's deletions apply.
///
/// # Errors
/// - `InvalidInput` if a create carries existing-item edits, an edit-set
///   lists the same id twice, or step numbers would overflow
/// - `ChildNotFound` if an edit-set references a child the recipe does not own
/// - `Validation` with every failed category when any candidate is invalid
pub fn plan_save(
    current: &CurrentChildren,
    submission: &RecipeSubmission,
    max_step_number: Option<u32>,
) -> Result<ReconcilePlan> {
    if current.recipe_id.is_none() && submission.edits_existing_items() {
        return Err(RecipeBookError::InvalidInput {
            reason: "a new recipe has no existing items to edit".to_string(),
        });
    }

    check_references(current, ChildKind::Step, &submission.steps)?;
    check_references(current, ChildKind::Ingredient, &submission.ingredients)?;
    check_references(current, ChildKind::Tag, &submission.tags)?;

    let mut report = ValidationReport::new();

    let recipe = match validate_recipe(&submission.recipe) {
        Ok(recipe) => Some(recipe),
        Err(violation) => {
            report.record(CategoryFailure {
                category: Category::Info,
                item: ItemRef::Recipe,
                violation,
            });
            None
        }
    };

    let steps = plan_children(ChildKind::Step, &submission.steps, validate_step, &mut report);
    let ingredients = plan_children(
        ChildKind::Ingredient,
        &submission.ingredients,
        validate_ingredient,
        &mut report,
    );
    let tags = plan_children(ChildKind::Tag, &submission.tags, validate_tag, &mut report);

    if !report.has_failed(Category::Tag) {
        check_tag_uniqueness(current, &tags, &mut report);
    }

    let recipe = match recipe {
        Some(recipe) if report.is_empty() => recipe,
        _ => return Err(RecipeBookError::Validation { report }),
    };

    let first = next_step_number(max_step_number).ok_or_else(step_overflow)?;
    let mut offset: u32 = 0;
    let steps = steps.map_appends(|step| {
        let step_number = first.checked_add(offset).ok_or_else(step_overflow)?;
        offset += 1;
        Ok(NumberedStep { step_number, step })
    })?;

    Ok(ReconcilePlan {
        recipe,
        steps,
        ingredients,
        tags,
    })
}

/// Run every validator without producing a plan
///
/// Returns an empty report when the submission would save cleanly. Reference
/// errors (unknown ids, duplicate ids) are returned as errors, not reported.
///
/// # Errors
/// Same non-validation errors as [`plan_save`].
pub fn validate_submission(
    current: &CurrentChildren,
    submission: &RecipeSubmission,
) -> Result<ValidationReport> {
    match plan_save(current, submission, current.max_step_number()) {
        Ok(_) => Ok(ValidationReport::new()),
        Err(RecipeBookError::Validation { report }) => Ok(report),
        Err(err) => Err(err),
    }
}

fn step_overflow() -> RecipeBookError {
    RecipeBookError::InvalidInput {
        reason: "step numbers exhausted".to_string(),
    }
}

fn check_references<F>(
    current: &CurrentChildren,
    kind: ChildKind,
    edits: &ChildEdits<F>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for item in &edits.existing {
        if !current.contains(kind, item.id) {
            return Err(RecipeBookError::ChildNotFound {
                kind,
                child_id: item.id,
                recipe_id: current.recipe_label(),
            });
        }
        if !seen.insert(item.id) {
            return Err(RecipeBookError::InvalidInput {
                reason: format!("{} {} listed more than once", kind, item.id),
            });
        }
    }
    Ok(())
}

fn plan_children<F, V>(
    kind: ChildKind,
    edits: &ChildEdits<F>,
    validate: fn(&F) -> std::result::Result<V, Violation>,
    report: &mut ValidationReport,
) -> ChildPlan<V> {
    let category = Category::from(kind);
    let mut plan = ChildPlan::default();

    for item in &edits.existing {
        match &item.edit {
            ExistingEdit::Keep => {}
            ExistingEdit::Delete => plan.deletes.push(item.id),
            ExistingEdit::Update(fields) => match validate(fields) {
                Ok(valid) => plan.updates.push((item.id, valid)),
                Err(violation) => {
                    report.record(CategoryFailure {
                        category,
                        item: ItemRef::Existing(item.id),
                        violation,
                    });
                }
            },
        }
    }

    for (index, fields) in edits.new.iter().enumerate() {
        match validate(fields) {
            Ok(valid) => plan.appends.push(valid),
            Err(violation) => {
                report.record(CategoryFailure {
                    category,
                    item: ItemRef::New(index),
                    violation,
                });
            }
        }
    }

    plan
}

/// Tag texts must be unique across the recipe's final tag set
///
/// The final set is the surviving stored tags in stored order followed by the
/// appended tags; the later of two equal texts is reported.
fn check_tag_uniqueness(
    current: &CurrentChildren,
    tags: &ChildPlan<ValidTag>,
    report: &mut ValidationReport,
) {
    let deleted: HashSet<i64> = tags.deletes.iter().copied().collect();
    let updated: HashMap<i64, &str> = tags
        .updates
        .iter()
        .map(|(id, tag)| (*id, tag.tag_text.as_str()))
        .collect();

    let surviving = current
        .tags
        .iter()
        .filter(|tag| !deleted.contains(&tag.id))
        .map(|tag| {
            let text = updated
                .get(&tag.id)
                .copied()
                .unwrap_or(tag.tag_text.as_str());
            (ItemRef::Existing(tag.id), text)
        });
    let appended = tags
        .appends
        .iter()
        .enumerate()
        .map(|(index, tag)| (ItemRef::New(index), tag.tag_text.as_str()));

    let mut seen = HashSet::new();
    for (item, text) in surviving.chain(appended) {
        if !seen.insert(text) {
            report.record(CategoryFailure {
                category: Category::Tag,
                item,
                violation: Violation::new("tag_text", ViolationKind::Duplicate),
            });
            return;
        }
    }
}
