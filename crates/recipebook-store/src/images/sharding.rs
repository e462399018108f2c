use std::path::{Path, PathBuf};

/// Relative location of an image: `<first two hex chars>/<digest>.<ext>`
///
/// This string is what recipes store as their `ImageRef`.
pub fn shard_key(digest: &str, extension: &str) -> String {
    let shard = &digest[..2.min(digest.len())];
    format!("{}/{}.{}", shard, digest, extension)
}

/// Resolve a stored key under `root`, refusing anything that is not a
/// well-formed shard key
pub fn resolve(root: &Path, key: &str) -> Option<PathBuf> {
    let (shard, file) = key.split_once('/')?;
    let (digest, extension) = file.split_once('.')?;

    let is_hex = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_hexdigit());
    let well_formed = shard.len() == 2
        && is_hex(shard)
        && is_hex(digest)
        && digest.starts_with(shard)
        && !extension.is_empty()
        && extension.chars().all(|c| c.is_ascii_alphanumeric());

    well_formed.then(|| root.join(shard).join(file))
}
