use serde::Serialize;
use std::fmt;

/// Result of one canned query, ready to print.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub heading: String,
    pub rows: Vec<String>,
    /// Printed instead of the heading and rows when there are no rows
    pub empty_message: String,
}

impl Report {
    pub fn new(heading: impl Into<String>, empty_message: impl Into<String>) -> Self {
        Self {
            heading: heading.into(),
            rows: Vec::new(),
            empty_message: empty_message.into(),
        }
    }

    pub fn with_rows(mut self, rows: Vec<String>) -> Self {
        self.rows = rows;
        self
    }

    /// A report that stopped before running its main query.
    pub fn aborted(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            heading: message.clone(),
            rows: Vec::new(),
            empty_message: message,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "{}", self.empty_message);
        }

        writeln!(f, "{}", self.heading)?;
        for (i, row) in self.rows.iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, row)?;
        }
        Ok(())
    }
}
