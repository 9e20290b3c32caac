//! Ingestion Module - Loads the CSV data directory into the database
//!
//! Loading runs in two phases:
//! - entity files are inserted row by row (actors, awards, directors, movies)
//! - association and ratings files are resolved against those rows by natural key
//!
//! Lines whose keys do not resolve are skipped; lines that are malformed or fail to
//! insert are counted as failures. Neither stops the file.

pub mod csv_source;
pub mod descriptor;
pub mod orchestrator;
pub mod ratings_loader;
pub mod record_loader;
pub mod relationship_resolver;

pub use csv_source::{CsvRow, CsvSource};
pub use descriptor::{DataFile, EntityDescriptor, FileRole, LinkDescriptor, NO_AWARDS};
pub use orchestrator::populate;
pub use ratings_loader::load_ratings;
pub use record_loader::{insert_row, load_entities};
pub use relationship_resolver::{assign_directors, link_file, DirectorAssignment};

use crate::error::RowError;
use serde::Serialize;
use tracing::warn;

/// Outcome of loading a single data file
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub file: String,

    /// Rows written to the database
    pub inserted: u64,

    /// Rows left out on purpose (unresolved keys, sentinel values)
    pub skipped: u64,

    /// Rows that were malformed or failed to insert
    pub failed: u64,
}

impl FileReport {
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    pub fn succeeded(&self) -> bool {
        self.failed == 0
    }

    pub(crate) fn record(&mut self, line: u64, result: std::result::Result<(), RowError>) {
        match result {
            Ok(()) => self.inserted += 1,
            Err(e) => {
                warn!("{} line {}: {}", self.file, line, e);
                self.failed += 1;
            }
        }
    }
}

/// Ingestion result
#[derive(Clone, Debug, Serialize)]
pub struct IngestionResult {
    /// Ingestion run ID
    pub run_id: String,

    /// Per-file outcomes, in load order
    pub files: Vec<FileReport>,

    /// Director assignment on the movies table
    pub directors: DirectorAssignment,

    pub status: IngestionStatus,
}

impl IngestionResult {
    pub fn file(&self, data_file: DataFile) -> Option<&FileReport> {
        self.files.iter().find(|f| f.file == data_file.file_name())
    }

    /// Whether every association, the director assignment and the ratings loaded
    /// without failures.
    pub fn foreign_keys_succeeded(&self) -> bool {
        self.directors.succeeded()
            && DataFile::ALL
                .iter()
                .filter(|f| !matches!(f.role(), FileRole::Entity(_)))
                .filter_map(|f| self.file(*f))
                .all(FileReport::succeeded)
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub enum IngestionStatus {
    Success,
    Partial,
    Failed,
}

impl IngestionStatus {
    fn from_reports(files: &[FileReport], directors: &DirectorAssignment) -> Self {
        let clean = directors.succeeded() && files.iter().all(FileReport::succeeded);
        let inserted: u64 = files.iter().map(|f| f.inserted).sum();

        if clean {
            IngestionStatus::Success
        } else if inserted == 0 {
            IngestionStatus::Failed
        } else {
            IngestionStatus::Partial
        }
    }
}
