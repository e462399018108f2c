//! Image release after a save or delete
//!
//! Usage is checked and files are removed while holding the database write
//! lock. Saves store their uploads under the same lock, so a concurrent save
//! that reuses identical bytes either commits first (and the file is kept) or
//! starts after the file is gone (and writes it again).
//!
//! Failures are logged and swallowed: the recipe change already happened and
//! a leftover file is harmless.

use recipebook_core::model::ImageRef;
use recipebook_store::{ImageStore, SqliteRepo};
use rusqlite::{Connection, TransactionBehavior};

/// Release the candidates that no recipe references
pub(crate) fn release_unused(conn: &mut Connection, images: &dyn ImageStore, candidates: &[ImageRef]) {
    if candidates.is_empty() {
        return;
    }

    let tx = match conn.transaction_with_behavior(TransactionBehavior::Immediate) {
        Ok(tx) => tx,
        Err(e) => {
            tracing::warn!(count = candidates.len(), error = %e, "image release skipped");
            return;
        }
    };

    let mut unused: Vec<ImageRef> = Vec::new();
    for image in candidates {
        if unused.contains(image) {
            continue;
        }
        match SqliteRepo::image_ref_in_use(&tx, image) {
            Ok(false) => unused.push(image.clone()),
            Ok(true) => {}
            Err(e) => tracing::warn!(image_ref = %image, error = %e, "image usage check failed"),
        }
    }

    if !unused.is_empty() {
        if let Err(e) = images.release(&unused) {
            tracing::warn!(count = unused.len(), error = %e, "image release failed");
        }
    }
    // read-only; ends the lock
    if let Err(e) = tx.commit() {
        tracing::warn!(error = %e, "image release lock not released cleanly");
    }
}

/// Release images that were in `previous`, are not in `current` and that no
/// recipe references any more
pub(crate) fn release_orphans(
    conn: &mut Connection,
    images: &dyn ImageStore,
    previous: &[Option<ImageRef>],
    current: &[Option<ImageRef>],
) {
    let dropped: Vec<ImageRef> = previous
        .iter()
        .flatten()
        .filter(|image| !current.iter().flatten().any(|kept| kept == *image))
        .cloned()
        .collect();

    release_unused(conn, images, &dropped);
}
