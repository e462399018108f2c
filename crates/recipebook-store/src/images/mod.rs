//! Image storage collaborator
//!
//! Recipes hold only [`ImageRef`]s. The default store keeps one file per
//! distinct image content, named by its SHA-256 digest and sharded by the
//! first two hex characters, so identical uploads share a file.

mod atomic;
mod fs_store;
mod sharding;

use recipebook_core::commands::ImageUpload;
use recipebook_core::model::ImageRef;

use crate::errors::Result;

pub use fs_store::FsImageStore;

/// Where uploaded image bytes live
pub trait ImageStore {
    /// Persist an upload and return the reference to record on the recipe
    ///
    /// # Errors
    /// Io errors from the backing storage.
    fn store(&self, upload: &ImageUpload) -> Result<ImageRef>;

    /// Drop images no recipe references any more
    ///
    /// Releasing a reference that is already gone is not an error.
    ///
    /// # Errors
    /// Io errors from the backing storage.
    fn release(&self, refs: &[ImageRef]) -> Result<()>;
}
