//! Plain-text export

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use recipebook_engine::commands::export_recipe;

use crate::session::{request_context, CliResult, GlobalArgs, Session};

#[derive(Debug, Args)]
pub struct ExportArgs {
    pub recipe_id: String,

    /// Output file or directory; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn execute(globals: &GlobalArgs, args: ExportArgs) -> CliResult {
    let ctx = request_context(globals)?;
    let session = Session::open(globals)?;
    let document = export_recipe(&session.conn, &ctx, &args.recipe_id)?;

    match args.out {
        Some(out) => {
            let path = if out.is_dir() {
                out.join(&document.file_name)
            } else {
                out
            };
            std::fs::write(&path, &document.bytes)?;
            println!("Exported to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&document.bytes)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
