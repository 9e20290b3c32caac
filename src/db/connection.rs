//! SQLite connection management
//!
//! Every command opens exactly one connection and hands it down explicitly.

use crate::error::{MovieDbError, Result};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Open a database that `init` has already created.
pub fn open_existing(path: impl AsRef<Path>) -> Result<Connection> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(MovieDbError::DatabaseNotInitialized(path.to_path_buf()));
    }

    debug!("Opening database {}", path.display());
    let conn = Connection::open(path)?;
    Ok(conn)
}

/// Count the rows of a schema table.
///
/// `table` is interpolated into the statement, so callers only pass names from
/// the fixed schema.
pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
        row.get(0)
    })?;
    Ok(count)
}
