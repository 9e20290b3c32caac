//! Ingestion Orchestrator - Drives a full load of the data directory

use crate::error::{MovieDbError, Result};
use crate::ingestion::descriptor::{DataFile, FileRole};
use crate::ingestion::{
    assign_directors, link_file, load_entities, load_ratings, DirectorAssignment, FileReport,
    IngestionResult, IngestionStatus,
};
use rusqlite::Connection;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

/// Coordinates the two-phase load over a single connection.
pub struct IngestionOrchestrator<'conn> {
    conn: &'conn Connection,
}

impl<'conn> IngestionOrchestrator<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Map every entry of the data directory to its [`DataFile`].
    ///
    /// Anything unrecognised, or any expected file that is absent, aborts the load
    /// before a single row is written.
    pub fn scan(data_dir: &Path) -> Result<BTreeMap<DataFile, PathBuf>> {
        let entries = std::fs::read_dir(data_dir).map_err(|e| {
            MovieDbError::DataDirectory(format!("cannot read {}: {}", data_dir.display(), e))
        })?;

        let mut files = BTreeMap::new();
        for entry in entries {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let data_file = DataFile::from_file_name(&name)
                .filter(|_| entry.path().is_file())
                .ok_or_else(|| MovieDbError::UnexpectedDataFile(name.clone()))?;
            files.insert(data_file, entry.path());
        }

        if let Some(missing) = DataFile::ALL.iter().find(|f| !files.contains_key(*f)) {
            return Err(MovieDbError::MissingDataFile(missing.file_name().to_string()));
        }

        Ok(files)
    }

    /// Load every data file: entities first, then associations, the director
    /// assignment and finally ratings.
    pub fn ingest(&self, data_dir: &Path) -> Result<IngestionResult> {
        let run_id = Uuid::new_v4().to_string();
        info!("Ingestion run {} from {}", run_id, data_dir.display());

        let files = Self::scan(data_dir)?;
        let mut reports: Vec<FileReport> = Vec::with_capacity(files.len());
        let mut directors = None;

        for data_file in DataFile::ALL {
            // Directors are assigned once all associations are in, right before ratings
            if data_file == DataFile::Ratings {
                directors = Some(self.assign_directors());
            }

            let path = &files[&data_file];
            let name = data_file.file_name();
            let report = match data_file.role() {
                FileRole::Entity(descriptor) => load_entities(self.conn, &descriptor, name, path)?,
                FileRole::Link(descriptor) => link_file(self.conn, &descriptor, name, path)?,
                FileRole::Ratings => load_ratings(self.conn, name, path)?,
            };
            reports.push(report);
        }

        let directors = directors.unwrap_or_else(|| self.assign_directors());
        let status = IngestionStatus::from_reports(&reports, &directors);
        info!("Ingestion run {} finished: {:?}", run_id, status);

        Ok(IngestionResult {
            run_id,
            files: reports,
            directors,
            status,
        })
    }

    fn assign_directors(&self) -> DirectorAssignment {
        match assign_directors(self.conn) {
            Ok(assignment) => assignment,
            Err(e) => {
                warn!("Director assignment failed: {}", e);
                DirectorAssignment::default()
            }
        }
    }
}

/// Load the data directory into the database behind `conn`.
pub fn populate(conn: &Connection, data_dir: impl AsRef<Path>) -> Result<IngestionResult> {
    IngestionOrchestrator::new(conn).ingest(data_dir.as_ref())
}
