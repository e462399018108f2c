use crate::model::{ChildKind, RecipeIngredient, RecipeStep, RecipeTag};

/// Children stored for a recipe at the moment a save is planned
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CurrentChildren {
    /// `None` while creating a recipe
    pub recipe_id: Option<String>,
    pub steps: Vec<RecipeStep>,
    pub ingredients: Vec<RecipeIngredient>,
    pub tags: Vec<RecipeTag>,
}

impl CurrentChildren {
    /// Snapshot for a recipe that does not exist yet
    pub fn for_create() -> Self {
        Self::default()
    }

    pub fn for_recipe(
        recipe_id: impl Into<String>,
        steps: Vec<RecipeStep>,
        ingredients: Vec<RecipeIngredient>,
        tags: Vec<RecipeTag>,
    ) -> Self {
        Self {
            recipe_id: Some(recipe_id.into()),
            steps,
            ingredients,
            tags,
        }
    }

    pub fn contains(&self, kind: ChildKind, id: i64) -> bool {
        match kind {
            ChildKind::Step => self.steps.iter().any(|s| s.id == id),
            ChildKind::Ingredient => self.ingredients.iter().any(|i| i.id == id),
            ChildKind::Tag => self.tags.iter().any(|t| t.id == id),
        }
    }

    /// Highest step number among this recipe's stored steps
    pub fn max_step_number(&self) -> Option<u32> {
        self.steps.iter().map(|s| s.step_number).max()
    }

    pub(crate) fn recipe_label(&self) -> String {
        self.recipe_id.clone().unwrap_or_else(|| "<new>".to_string())
    }
}
