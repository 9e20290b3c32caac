//! Relationship Resolver - Links entities through their natural keys
//!
//! Association lines name both ends by text. Each end is looked up to its surrogate
//! key and the pair is written to the junction table. Lines where either end is
//! unknown are skipped and counted, never inserted.

use crate::error::{Result, RowError};
use crate::ingestion::csv_source::CsvSource;
use crate::ingestion::descriptor::LinkDescriptor;
use crate::ingestion::record_loader::execute_one;
use crate::ingestion::FileReport;
use rusqlite::{params, Connection};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

const LINK_FIELDS: usize = 2;

/// Load one association file into its junction table.
pub fn link_file(
    conn: &Connection,
    descriptor: &LinkDescriptor,
    file_name: &str,
    path: &Path,
) -> Result<FileReport> {
    let mut stmt = conn.prepare(&descriptor.insert_sql())?;
    let mut source = CsvSource::open(path)?;
    let mut report = FileReport::new(file_name);

    for row in source.rows() {
        let row = row?;
        if row.fields.len() != LINK_FIELDS {
            report.record(
                row.line,
                Err(RowError::Malformed {
                    expected: LINK_FIELDS,
                    found: row.fields.len(),
                }),
            );
            continue;
        }

        let (left, right) = (&row.fields[0], &row.fields[1]);
        if descriptor.is_skip_value(right) {
            report.skipped += 1;
            continue;
        }

        let Some(left_key) = descriptor.left.find(conn, left) else {
            debug!(
                "{} line {}: no {} named {:?}",
                file_name, row.line, descriptor.left.table, left
            );
            report.skipped += 1;
            continue;
        };
        let Some(right_key) = descriptor.right.find(conn, right) else {
            debug!(
                "{} line {}: no {} named {:?}",
                file_name, row.line, descriptor.right.table, right
            );
            report.skipped += 1;
            continue;
        };

        report.record(row.line, execute_one(&mut stmt, params![left_key, right_key]));
    }

    info!(
        "Linked {} rows into {} from {} ({} skipped, {} failed)",
        report.inserted, descriptor.table, file_name, report.skipped, report.failed
    );
    Ok(report)
}

/// Result of pointing each movie at its director
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectorAssignment {
    /// Movie rows touched by the update
    pub updated: usize,

    /// Movies that ended up with a director
    pub linked: i64,
}

impl DirectorAssignment {
    pub fn succeeded(&self) -> bool {
        self.updated > 0
    }
}

/// Set `movies.Director_ID` from the director whose recorded movie title equals the
/// movie's title exactly. Movies with no such director are set to NULL.
pub fn assign_directors(conn: &Connection) -> Result<DirectorAssignment> {
    let updated = conn.execute(
        "UPDATE movies SET Director_ID = \
         (SELECT Director_ID FROM directors WHERE Movie_Title = movies.Title)",
        [],
    )?;
    let linked = conn.query_row(
        "SELECT COUNT(*) FROM movies WHERE Director_ID IS NOT NULL",
        [],
        |row| row.get(0),
    )?;

    info!("Assigned directors: {} movies updated, {} linked", updated, linked);
    Ok(DirectorAssignment { updated, linked })
}
