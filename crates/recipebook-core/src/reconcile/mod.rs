//! Multi-collection reconciliation
//!
//! Saving a recipe reconciles the recipe row with its three child
//! collections in one request. This module is the pure half of that work:
//! it checks references, validates every candidate and produces a
//! [`ReconcilePlan`] describing exactly which rows to insert, overwrite and
//! delete. The engine executes the plan inside a single store transaction.
//!
//! ## Contract
//!
//! - **Validate before mutate**: `plan_save` either returns a complete plan
//!   or an error; it never has side effects.
//! - **All categories reported**: a failed plan carries a
//!   [`ValidationReport`](crate::rules::ValidationReport) naming every failed
//!   category with its first violation.
//! - **Deletion wins**: `ExistingEdit::Delete` carries no fields, so there is
//!   nothing to merge.

mod current;
mod plan;

pub use current::CurrentChildren;
pub use plan::{
    plan_save, validate_submission, ChildPlan, NumberedStep, PlanCounts, ReconcilePlan,
};

/// Where the "max existing step number" for new steps is taken from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepNumberScope {
    /// Maximum over the steps of the recipe being saved
    PerRecipe,
    /// Maximum over every step in the store, whichever recipe owns it
    Global,
}

/// Step numbering scope used by the engine
///
/// New steps continue from the recipe's own maximum. `Global` reproduces the
/// older behaviour where numbering continued from the highest step number of
/// any recipe; it stays selectable for stores migrated from that system.
pub const STEP_NUMBER_SCOPE: StepNumberScope = StepNumberScope::PerRecipe;

/// First number to hand out after `max`, or 0 for an empty collection
///
/// Returns `None` when the numbering space is exhausted.
pub fn next_step_number(max: Option<u32>) -> Option<u32> {
    match max {
        None => Some(0),
        Some(max) => max.checked_add(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_step_number() {
        assert_eq!(next_step_number(None), Some(0));
        assert_eq!(next_step_number(Some(0)), Some(1));
        assert_eq!(next_step_number(Some(41)), Some(42));
        assert_eq!(next_step_number(Some(u32::MAX)), None);
    }

    #[test]
    fn test_default_scope_is_per_recipe() {
        assert_eq!(STEP_NUMBER_SCOPE, StepNumberScope::PerRecipe);
    }
}
