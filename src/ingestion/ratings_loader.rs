//! Ratings Loader - Loads `ratings.csv` (value, source, movie title)
//!
//! Ratings follow the same policy as the association files: an unknown movie title
//! skips the line, a bad value fails the line, and the file keeps going either way.

use crate::db::lookup::MOVIE_BY_TITLE;
use crate::error::{Result, RowError};
use crate::ingestion::csv_source::CsvSource;
use crate::ingestion::record_loader::execute_one;
use crate::ingestion::FileReport;
use rusqlite::{params, Connection};
use std::path::Path;
use tracing::{debug, info};

const RATING_FIELDS: usize = 3;

const INSERT_RATING: &str =
    "INSERT INTO ratings (Rating_Value, Rating_Source, Movie_ID) VALUES (?1, ?2, ?3)";

fn parse_rating(raw: &str) -> std::result::Result<f64, RowError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| RowError::InvalidNumber(raw.to_string()))
}

pub fn load_ratings(conn: &Connection, file_name: &str, path: &Path) -> Result<FileReport> {
    let mut stmt = conn.prepare(INSERT_RATING)?;
    let mut source = CsvSource::open(path)?;
    let mut report = FileReport::new(file_name);

    for row in source.rows() {
        let row = row?;
        if row.fields.len() != RATING_FIELDS {
            report.record(
                row.line,
                Err(RowError::Malformed {
                    expected: RATING_FIELDS,
                    found: row.fields.len(),
                }),
            );
            continue;
        }

        let value = match parse_rating(&row.fields[0]) {
            Ok(value) => value,
            Err(e) => {
                report.record(row.line, Err(e));
                continue;
            }
        };
        let (source_label, title) = (&row.fields[1], &row.fields[2]);

        let Some(movie_id) = MOVIE_BY_TITLE.find(conn, title) else {
            debug!("{} line {}: no movie titled {:?}", file_name, row.line, title);
            report.skipped += 1;
            continue;
        };

        report.record(
            row.line,
            execute_one(&mut stmt, params![value, source_label, movie_id]),
        );
    }

    info!(
        "Loaded {} ratings from {} ({} skipped, {} failed)",
        report.inserted, file_name, report.skipped, report.failed
    );
    Ok(report)
}
