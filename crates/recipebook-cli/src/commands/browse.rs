//! List and search, one recipe per line

use clap::Args;
use recipebook_core::query::{Page, SearchQuery, SearchScopes, SortDirection, SortField, SortSpec};
use recipebook_core::Recipe;
use recipebook_engine::commands::{list_recipes, search_recipes};

use crate::session::{request_context, CliResult, GlobalArgs, Session};

#[derive(Debug, Args)]
pub struct PageArgs {
    /// Maximum number of recipes to print
    #[arg(long)]
    pub limit: Option<u32>,

    #[arg(long, default_value_t = 0)]
    pub offset: u32,
}

impl PageArgs {
    fn page(&self) -> Page {
        Page {
            limit: self.limit,
            offset: self.offset,
        }
    }
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// name, cooking_time, category, created_at or updated_at
    #[arg(long, default_value = "name")]
    pub sort: String,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    pub text: String,

    #[arg(long)]
    pub in_names: bool,

    #[arg(long)]
    pub in_descriptions: bool,

    #[arg(long)]
    pub in_categories: bool,

    #[arg(long)]
    pub in_ingredients: bool,

    #[arg(long)]
    pub in_tags: bool,

    /// Search every field
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

impl SearchArgs {
    /// Names only unless a scope is given
    fn scopes(&self) -> SearchScopes {
        if self.all {
            return SearchScopes::all();
        }
        let scopes = SearchScopes {
            in_names: self.in_names,
            in_descriptions: self.in_descriptions,
            in_categories: self.in_categories,
            in_ingredients: self.in_ingredients,
            in_tags: self.in_tags,
        };
        if scopes.any_enabled() {
            scopes
        } else {
            SearchScopes::names_only()
        }
    }
}

pub fn execute_list(globals: &GlobalArgs, args: ListArgs) -> CliResult {
    let field: SortField = args.sort.parse()?;
    let direction = if args.desc {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let ctx = request_context(globals)?;
    let session = Session::open(globals)?;

    let recipes = list_recipes(
        &session.conn,
        &ctx,
        &SortSpec::new(field, direction),
        &args.page.page(),
    )?;
    print_rows(&recipes);
    Ok(())
}

pub fn execute_search(globals: &GlobalArgs, args: SearchArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let session = Session::open(globals)?;

    let query = SearchQuery::new(&args.text, args.scopes());
    let recipes = search_recipes(&session.conn, &ctx, &query, &args.page.page())?;
    print_rows(&recipes);
    Ok(())
}

fn print_rows(recipes: &[Recipe]) {
    for recipe in recipes {
        println!("{}", row(recipe));
    }
}

fn row(recipe: &Recipe) -> String {
    format!(
        "{}\t{}\t{} min\t{}",
        recipe.id, recipe.name, recipe.cooking_time, recipe.category
    )
}
