//! Create, edit, show and delete a single recipe

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::Args;
use recipebook_core::commands::{ImageEdit, ImageUpload, RecipeSubmission};
use recipebook_core::model::IMAGE_SLOTS;
use recipebook_engine::commands::{
    create_recipe, delete_recipe, edit_recipe, get_recipe_details, SaveOutcome,
};

use crate::session::{request_context, CliResult, GlobalArgs, Session};

/// `--image <slot>=<path>`
#[derive(Debug, Clone, PartialEq)]
pub struct ImageArg {
    pub slot: usize,
    pub path: PathBuf,
}

fn parse_image_arg(value: &str) -> Result<ImageArg, String> {
    let (slot, path) = value
        .split_once('=')
        .ok_or_else(|| format!("expected <slot>=<path>, got '{}'", value))?;
    let slot: usize = slot
        .trim()
        .parse()
        .map_err(|_| format!("image slot must be a number, got '{}'", slot))?;
    if !(1..=IMAGE_SLOTS).contains(&slot) {
        return Err(format!("image slot must be between 1 and {}", IMAGE_SLOTS));
    }
    if path.is_empty() {
        return Err("image path is empty".to_string());
    }
    Ok(ImageArg {
        slot,
        path: PathBuf::from(path),
    })
}

fn parse_slot(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(slot) if (1..=IMAGE_SLOTS).contains(&slot) => Ok(slot),
        _ => Err(format!("image slot must be between 1 and {}", IMAGE_SLOTS)),
    }
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Submission JSON file, `-` reads stdin
    #[arg(long)]
    pub file: PathBuf,

    /// Attach an image as `<slot>=<path>` (slot 1-3, repeatable)
    #[arg(long = "image", value_parser = parse_image_arg)]
    pub images: Vec<ImageArg>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    pub recipe_id: String,

    /// Submission JSON file, `-` reads stdin
    #[arg(long)]
    pub file: PathBuf,

    /// Replace an image as `<slot>=<path>` (slot 1-3, repeatable)
    #[arg(long = "image", value_parser = parse_image_arg)]
    pub images: Vec<ImageArg>,

    /// Remove the image in a slot
    #[arg(long = "clear-image", value_parser = parse_slot)]
    pub clear: Vec<usize>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    pub recipe_id: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    pub recipe_id: String,
}

pub fn execute_create(globals: &GlobalArgs, args: CreateArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let mut submission = read_submission(&args.file)?;
    attach_images(&mut submission, &args.images, &[])?;

    let mut session = Session::open(globals)?;
    let outcome = create_recipe(&mut session.conn, &session.images, &ctx, &submission)?;
    print_outcome(&outcome)
}

pub fn execute_edit(globals: &GlobalArgs, args: EditArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let mut submission = read_submission(&args.file)?;
    attach_images(&mut submission, &args.images, &args.clear)?;

    let mut session = Session::open(globals)?;
    let outcome = edit_recipe(
        &mut session.conn,
        &session.images,
        &ctx,
        &args.recipe_id,
        &submission,
    )?;
    print_outcome(&outcome)
}

pub fn execute_show(globals: &GlobalArgs, args: ShowArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let session = Session::open(globals)?;

    let details = get_recipe_details(&session.conn, &ctx, &args.recipe_id)?;
    println!("{}", serde_json::to_string_pretty(&details)?);
    Ok(())
}

pub fn execute_delete(globals: &GlobalArgs, args: DeleteArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let mut session = Session::open(globals)?;

    delete_recipe(&mut session.conn, &session.images, &ctx, &args.recipe_id)?;
    println!("Deleted recipe {}", args.recipe_id);
    Ok(())
}

fn read_submission(path: &Path) -> CliResult<RecipeSubmission> {
    let text = if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        text
    } else {
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// Clears go first so `--clear-image 1 --image 1=x` ends with the new image
fn attach_images(
    submission: &mut RecipeSubmission,
    images: &[ImageArg],
    clear: &[usize],
) -> CliResult {
    for slot in clear {
        submission.images[slot - 1] = ImageEdit::Clear;
    }
    for image in images {
        let bytes = std::fs::read(&image.path)?;
        let file_name = image
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("image")
            .to_string();
        submission.images[image.slot - 1] = ImageEdit::Replace(ImageUpload { file_name, bytes });
    }
    Ok(())
}

fn print_outcome(outcome: &SaveOutcome) -> CliResult {
    eprintln!(
        "{} recipe {} (steps +{} ~{} -{})",
        if outcome.created { "Created" } else { "Updated" },
        outcome.recipe_id,
        outcome.steps.appended,
        outcome.steps.updated,
        outcome.steps.deleted,
    );
    println!("{}", serde_json::to_string_pretty(&outcome.details)?);
    Ok(())
}
