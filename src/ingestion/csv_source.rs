//! CSV Source - Reads the headerless, comma-split data files line by line

use crate::error::Result;
use csv::ReaderBuilder;
use std::fs::File;
use std::path::Path;

/// One non-empty line of a data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvRow {
    /// 1-based line number in the source file
    pub line: u64,
    pub fields: Vec<String>,
}

/// Reader over a data file.
///
/// The files carry no header and no quoting: every comma separates fields, so a
/// comma inside a title splits it. Lines may have any number of fields; the loaders
/// decide what is acceptable.
pub struct CsvSource<R: std::io::Read> {
    reader: csv::Reader<R>,
}

impl CsvSource<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: std::io::Read> CsvSource<R> {
    pub fn from_reader(reader: R) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(reader);
        Self { reader }
    }

    /// Iterate over the rows. Fields that are not valid UTF-8 are decoded lossily so
    /// a bad byte only affects its own line. An I/O error ends the file for the
    /// caller.
    pub fn rows(&mut self) -> impl Iterator<Item = Result<CsvRow>> + '_ {
        self.reader.byte_records().map(|record| -> Result<CsvRow> {
            let record = record?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            Ok(CsvRow {
                line,
                fields: record
                    .iter()
                    .map(|f| String::from_utf8_lossy(f).into_owned())
                    .collect(),
            })
        })
    }
}
