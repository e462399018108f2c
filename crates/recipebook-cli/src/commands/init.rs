//! Database and image directory setup

use crate::session::{CliResult, GlobalArgs, Session};

pub fn execute(globals: &GlobalArgs) -> CliResult {
    let session = Session::open(globals)?;
    std::fs::create_dir_all(&session.config.media_dir)?;

    println!(
        "Initialized recipe book at {} (images in {})",
        session.config.database_path.display(),
        session.config.media_dir.display()
    );
    Ok(())
}
