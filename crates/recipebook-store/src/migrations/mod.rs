//! Schema migrations
//!
//! SQL files are embedded at compile time, applied in order inside their
//! own transaction, and recorded in `schema_version` with a SHA-256 of the
//! SQL. Re-running is a no-op; an applied migration whose SQL has since
//! changed is refused.

mod checksums;
mod embedded;
mod runner;

pub use runner::{applied_migrations, apply_migrations};
