//! Recipebook CLI
//!
//! Command-line front end for a personal recipe catalog

use clap::{Parser, Subcommand};

mod commands;
mod session;

#[derive(Debug, Parser)]
#[command(name = "recipebook")]
#[command(about = "Recipebook - personal recipe catalog", long_about = None)]
struct Cli {
    #[command(flatten)]
    globals: session::GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the database and image directory
    Init,
    /// Create a recipe from a JSON submission
    Create(commands::recipe::CreateArgs),
    /// Edit a recipe with a JSON submission
    Edit(commands::recipe::EditArgs),
    /// Show a recipe with its steps, ingredients and tags
    Show(commands::recipe::ShowArgs),
    /// Delete a recipe
    Delete(commands::recipe::DeleteArgs),
    /// List your recipes
    List(commands::browse::ListArgs),
    /// Search your recipes
    Search(commands::browse::SearchArgs),
    /// Export a recipe as plain text
    Export(commands::export::ExportArgs),
    /// Generate a recipe draft with the AI provider
    Generate(commands::generate::GenerateArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli.globals),
        Commands::Create(args) => commands::recipe::execute_create(&cli.globals, args),
        Commands::Edit(args) => commands::recipe::execute_edit(&cli.globals, args),
        Commands::Show(args) => commands::recipe::execute_show(&cli.globals, args),
        Commands::Delete(args) => commands::recipe::execute_delete(&cli.globals, args),
        Commands::List(args) => commands::browse::execute_list(&cli.globals, args),
        Commands::Search(args) => commands::browse::execute_search(&cli.globals, args),
        Commands::Export(args) => commands::export::execute(&cli.globals, args),
        Commands::Generate(args) => commands::generate::execute(&cli.globals, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
