// Integration tests for the filesystem image store

use recipebook_core::commands::ImageUpload;
use recipebook_core::model::ImageRef;
use recipebook_store::{FsImageStore, ImageStore};
use tempfile::TempDir;

fn upload(name: &str, bytes: &[u8]) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: bytes.to_vec(),
    }
}

#[test]
fn test_images_are_sharded_by_digest() {
    // Given: an image store
    let dir = TempDir::new().unwrap();
    let store = FsImageStore::new(dir.path());

    // When: an image is stored
    let image = store.store(&upload("dish.jpg", b"jpeg bytes")).unwrap();

    // Then: it lands under <first two hex chars>/<digest>.jpg
    let (shard, file) = image.as_str().split_once('/').unwrap();
    assert_eq!(shard.len(), 2);
    assert!(file.starts_with(shard));
    assert!(file.ends_with(".jpg"));
    assert!(dir.path().join(shard).join(file).exists());
}

#[test]
fn test_release_ignores_missing_files() {
    let dir = TempDir::new().unwrap();
    let store = FsImageStore::new(dir.path());
    let missing = ImageRef::new(format!("00/{}.png", "0".repeat(64)));

    assert!(store.release(&[missing]).is_ok());
}

#[test]
fn test_malformed_reference_is_rejected() {
    let dir = TempDir::new().unwrap();
    let store = FsImageStore::new(dir.path());

    let err = store
        .release(&[ImageRef::new("../../etc/passwd")])
        .unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_INPUT");
}
