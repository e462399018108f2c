//! Connection management
//!
//! Every connection handed out here has foreign keys enforced and the
//! `recipebook_contains` search function registered, so callers should not
//! open raw `rusqlite::Connection`s themselves.

use std::path::Path;

use recipebook_core::query::contains_case_insensitive;
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};

/// Name of the scalar SQL function used by search
pub const CONTAINS_FN: &str = "recipebook_contains";

/// Open (or create) the database file at `path`
pub fn open<P: AsRef<Path>>(path: P) -> Result<Connection> {
    let conn = Connection::open(path).map_err(from_rusqlite)?;
    configure(&conn)?;
    let _mode: String = conn
        .pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))
        .map_err(from_rusqlite)?;
    Ok(conn)
}

/// Open a private in-memory database (tests, dry runs)
pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory().map_err(from_rusqlite)?;
    configure(&conn)?;
    Ok(conn)
}

/// Per-connection settings
pub fn configure(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "foreign_keys", "ON")
        .map_err(from_rusqlite)?;

    conn.create_scalar_function(
        CONTAINS_FN,
        2,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let haystack: String = ctx.get(0)?;
            let needle: String = ctx.get(1)?;
            Ok(contains_case_insensitive(&haystack, &needle))
        },
    )
    .map_err(from_rusqlite)?;

    Ok(())
}
