//! Schema initialisation
//!
//! `init` always starts from scratch: an existing database file is deleted, a new
//! one is created and the DDL script is executed against it in one batch.

use crate::error::{MovieDbError, Result};
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// The schema shipped with the binary.
pub const BUNDLED_DDL: &str = include_str!("../sql/ddl.sql");

/// Tables created by the bundled schema, in name order.
pub const TABLES: [&str; 8] = [
    "actors",
    "actors_to_awards",
    "actors_to_movies",
    "awards",
    "directors",
    "movies",
    "movies_to_awards",
    "ratings",
];

/// Where the DDL script comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DdlSource {
    Bundled,
    File(PathBuf),
}

impl DdlSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map(DdlSource::File).unwrap_or(DdlSource::Bundled)
    }

    /// Read the whole script into memory.
    pub fn read(&self) -> Result<String> {
        match self {
            DdlSource::Bundled => Ok(BUNDLED_DDL.to_string()),
            DdlSource::File(path) => {
                let script = std::fs::read_to_string(path)?;
                Ok(script)
            }
        }
    }
}

/// What happened to a database file that was already at the target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PreviousDatabase {
    Absent,
    Deleted,
    DeleteFailed,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitOutcome {
    pub previous: PreviousDatabase,
    pub tables: Vec<String>,
}

/// Delete any database at `db_path`, create a new one and run the DDL script.
pub fn initialise(db_path: impl AsRef<Path>, ddl: &DdlSource) -> Result<InitOutcome> {
    let db_path = db_path.as_ref();
    let previous = remove_previous(db_path);

    let script = ddl.read()?;
    let conn = Connection::open(db_path)?;
    conn.execute_batch(&script)
        .map_err(|e| MovieDbError::Schema(format!("Failed to create tables: {}", e)))?;

    let tables = list_tables(&conn)?;
    info!("Created {} tables in {}", tables.len(), db_path.display());

    Ok(InitOutcome { previous, tables })
}

/// Delete whatever is at `db_path`. A failed delete is logged and reported, and the
/// caller carries on.
pub fn remove_previous(db_path: &Path) -> PreviousDatabase {
    if !db_path.exists() {
        return PreviousDatabase::Absent;
    }

    match std::fs::remove_file(db_path) {
        Ok(()) => {
            info!("Deleted existing database {}", db_path.display());
            PreviousDatabase::Deleted
        }
        Err(e) => {
            warn!("Failed to delete database {}: {}", db_path.display(), e);
            PreviousDatabase::DeleteFailed
        }
    }
}

/// User tables in the database, sorted by name.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )?;
    let tables = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(tables)
}
