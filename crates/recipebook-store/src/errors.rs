//! Error helpers for recipebook-store
//!
//! Everything surfaces as the core `ExError`; these build it with the
//! store-specific operation and message.

use recipebook_core::errors::{ExError, ExErrorKind, RecipeBookError};
use rusqlite::ErrorCode;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

pub fn migration_error(migration_id: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::Persistence)
        .with_op("migration")
        .with_message(format!("Migration {} failed: {}", migration_id, reason))
}

/// An applied migration no longer matches the embedded SQL
pub fn checksum_mismatch(migration_id: &str, expected: &str, actual: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("migration_checksum")
        .with_message(format!(
            "Checksum mismatch for migration {}: recorded {}, embedded {}",
            migration_id, expected, actual
        ))
}

/// Two different images hashed to the same digest
pub fn image_collision(digest: &str) -> ExError {
    ExError::new(ExErrorKind::ConstraintViolation)
        .with_op("image_store")
        .with_message(format!("Image collision for digest {}", digest))
}

pub fn image_missing(image_ref: &str) -> ExError {
    ExError::new(ExErrorKind::NotFound)
        .with_op("image_read")
        .with_entity_id(image_ref)
        .with_message("Image not found")
}

/// A reference that does not have the `<shard>/<digest>.<ext>` shape
pub fn invalid_image_ref(image_ref: &str) -> ExError {
    ExError::new(ExErrorKind::InvalidInput)
        .with_op("image_ref")
        .with_entity_id(image_ref)
        .with_message("Malformed image reference")
}

/// Convert a rusqlite error; constraint failures become store integrity errors
pub fn from_rusqlite(err: rusqlite::Error) -> ExError {
    if err.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        let integrity: ExError = RecipeBookError::StoreIntegrity {
            message: err.to_string(),
        }
        .into();
        return integrity.with_op("sqlite");
    }
    ExError::new(ExErrorKind::Persistence)
        .with_op("sqlite")
        .with_message(err.to_string())
}

pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}
