//! Record Loader - Inserts entity rows straight from their CSV lines

use crate::error::{Result, RowError};
use crate::ingestion::csv_source::CsvSource;
use crate::ingestion::descriptor::EntityDescriptor;
use crate::ingestion::FileReport;
use rusqlite::{params_from_iter, Connection, Params, Statement};
use std::path::Path;
use tracing::info;

/// Execute `stmt` and require that it touched exactly one row.
pub(crate) fn execute_one<P: Params>(
    stmt: &mut Statement<'_>,
    params: P,
) -> std::result::Result<(), RowError> {
    match stmt.execute(params)? {
        1 => Ok(()),
        n => Err(RowError::RowsAffected(n)),
    }
}

/// Bind `fields[0..=last_index]` to the statement's placeholders in order and
/// execute it.
///
/// Fields past `last_index` are ignored. A line with too few fields is rejected
/// without touching the database.
pub fn insert_row(
    stmt: &mut Statement<'_>,
    fields: &[String],
    last_index: usize,
) -> std::result::Result<(), RowError> {
    let bound = last_index + 1;
    if fields.len() < bound {
        return Err(RowError::Malformed {
            expected: bound,
            found: fields.len(),
        });
    }

    execute_one(stmt, params_from_iter(&fields[..bound]))
}

/// Load one entity file into its table.
pub fn load_entities(
    conn: &Connection,
    descriptor: &EntityDescriptor,
    file_name: &str,
    path: &Path,
) -> Result<FileReport> {
    let mut stmt = conn.prepare(&descriptor.insert_sql())?;
    let mut source = CsvSource::open(path)?;
    let mut report = FileReport::new(file_name);

    for row in source.rows() {
        let row = row?;
        let result = insert_row(&mut stmt, &row.fields, descriptor.last_index());
        report.record(row.line, result);
    }

    info!(
        "Loaded {} rows into {} from {} ({} failed)",
        report.inserted, descriptor.table, file_name, report.failed
    );
    Ok(report)
}
