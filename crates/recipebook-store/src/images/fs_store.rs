use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use recipebook_core::commands::ImageUpload;
use recipebook_core::model::ImageRef;
use sha2::{Digest, Sha256};

use super::atomic::atomic_write;
use super::sharding::{resolve, shard_key};
use super::ImageStore;
use crate::errors::{image_collision, image_missing, invalid_image_ref, io_error, Result};

/// Content-addressed image directory
pub struct FsImageStore {
    root: PathBuf,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of a stored image
    ///
    /// # Errors
    /// `InvalidInput` for a malformed reference.
    pub fn path_of(&self, image: &ImageRef) -> Result<PathBuf> {
        resolve(&self.root, image.as_str()).ok_or_else(|| invalid_image_ref(image.as_str()))
    }

    /// # Errors
    /// `NotFound` if the file is gone, `InvalidInput` for a malformed reference.
    pub fn read(&self, image: &ImageRef) -> Result<Vec<u8>> {
        let path = self.path_of(image)?;
        fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => image_missing(image.as_str()),
            _ => io_error("read_image", e),
        })
    }
}

impl ImageStore for FsImageStore {
    /// Idempotent: storing the same bytes twice yields the same reference
    fn store(&self, upload: &ImageUpload) -> Result<ImageRef> {
        let digest = hex::encode(Sha256::digest(&upload.bytes));
        let key = shard_key(&digest, &upload.extension());
        let target = self.root.join(&key);

        if target.exists() {
            let existing = fs::read(&target).map_err(|e| io_error("read_image", e))?;
            if existing != upload.bytes {
                return Err(image_collision(&digest));
            }
        } else {
            atomic_write(&target, &upload.bytes)?;
            tracing::debug!(image_ref = %key, bytes = upload.bytes.len(), "stored image");
        }

        Ok(ImageRef::new(key))
    }

    fn release(&self, refs: &[ImageRef]) -> Result<()> {
        for image in refs {
            let path = self.path_of(image)?;
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!(image_ref = %image, "released image"),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(io_error("release_image", e)),
            }
        }
        Ok(())
    }
}
