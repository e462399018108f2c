//! Repository layer: rows in, domain models out

pub mod hydration;
pub mod sqlite_repo;

pub use hydration::{load_current_children, load_details};
pub use sqlite_repo::SqliteRepo;
