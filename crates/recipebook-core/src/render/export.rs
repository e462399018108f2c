use crate::model::{Recipe, RecipeIngredient, RecipeStep, RecipeTag};

const TITLE_RULE: &str = "=====";
const SECTION_RULE: &str = "-----";

/// A rendered recipe ready to be downloaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportDocument {
    pub fn new(recipe: &Recipe, text: String) -> Self {
        Self {
            file_name: export_file_name(&recipe.name),
            bytes: text.into_bytes(),
        }
    }
}

/// Render a recipe as a plain-text document
///
/// Ingredients and tags are written in the order given. Steps are sorted by
/// step number and renumbered from 1, so gaps left by deletions never show.
pub fn render_recipe_text(
    recipe: &Recipe,
    ingredients: &[RecipeIngredient],
    steps: &[RecipeStep],
    tags: &[RecipeTag],
) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n{}\n\n", recipe.name, TITLE_RULE));

    section(&mut output, "Information");
    output.push_str(&format!("Description: {}\n", recipe.description));
    output.push_str(&format!("Cooking time, min: {}\n", recipe.cooking_time));
    output.push_str(&format!("Category: {}\n", recipe.category));

    output.push('\n');
    section(&mut output, "Ingredients");
    for ingredient in ingredients {
        output.push_str(&format!(
            "- {}: {} {}\n",
            ingredient.name, ingredient.volume, ingredient.volume_measure
        ));
    }

    let mut ordered: Vec<&RecipeStep> = steps.iter().collect();
    ordered.sort_by_key(|step| step.step_number);

    output.push('\n');
    section(&mut output, "Steps");
    for (number, step) in ordered.iter().enumerate() {
        output.push_str(&format!("{}) {}\n", number + 1, step.step_description));
    }

    output.push('\n');
    section(&mut output, "Tags");
    for tag in tags {
        output.push_str(&format!("- {}\n", tag.tag_text));
    }

    output
}

fn section(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(SECTION_RULE);
    output.push('\n');
}

/// Suggested download name: `<name>.txt` with path-hostile characters replaced
pub fn export_file_name(recipe_name: &str) -> String {
    let sanitised: String = recipe_name
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let sanitised = sanitised.trim();

    if sanitised.is_empty() {
        "recipe.txt".to_string()
    } else {
        format!("{}.txt", sanitised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_sanitised() {
        assert_eq!(export_file_name("Apple pie"), "Apple pie.txt");
        assert_eq!(export_file_name("a/b\\c:d"), "a_b_c_d.txt");
        assert_eq!(export_file_name("Борщ"), "Борщ.txt");
        assert_eq!(export_file_name("  "), "recipe.txt");
    }
}
