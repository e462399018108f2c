use std::fs;
use std::path::Path;

use crate::errors::{io_error, Result};

/// Write `content` to `target_path` via a sibling temp file and a rename
///
/// Readers see either no file or the complete file, never a partial one.
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| io_error("create_image_dir", e))?;
    }

    let temp_path = target_path.with_extension("tmp");

    fs::write(&temp_path, content).map_err(|e| io_error("write_image_temp", e))?;
    fs::rename(&temp_path, target_path).map_err(|e| io_error("rename_image_temp", e))?;

    Ok(())
}
