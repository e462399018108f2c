//! AI-assisted drafts

use clap::Args;
use recipebook_engine::commands::{create_recipe, generate_recipe_draft};
use recipebook_engine::GeminiGenerator;

use crate::session::{load_config, request_context, CliResult, GlobalArgs, Session};

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Ingredients you have at hand
    #[arg(long)]
    pub ingredients: String,

    /// The kind of dish you want
    #[arg(long)]
    pub description: String,

    /// Save the draft right away instead of printing it
    #[arg(long)]
    pub save: bool,
}

pub fn execute(globals: &GlobalArgs, args: GenerateArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let config = load_config(globals)?;
    let generator = GeminiGenerator::from_config(&config.ai)?;

    let draft = generate_recipe_draft(&generator, &ctx, &args.ingredients, &args.description)?;
    for failure in draft.report.failures() {
        eprintln!("warning: {}", failure);
    }

    if !args.save {
        println!("{}", serde_json::to_string_pretty(&draft.submission)?);
        return Ok(());
    }
    if !draft.is_valid() {
        return Err(format!(
            "draft not saved, it breaks the {} rules",
            draft.report.category_list()
        )
        .into());
    }

    let mut session = Session::open(globals)?;
    let outcome = create_recipe(&mut session.conn, &session.images, &ctx, &draft.submission)?;
    eprintln!("Created recipe {}", outcome.recipe_id);
    println!("{}", serde_json::to_string_pretty(&outcome.details)?);
    Ok(())
}
