//! Control table reader.
//!
//! A control table is a comma-separated file whose first row is a header.
//! Every following row selects one tile: `reach_id, flow, boundary_condition`,
//! with any further columns ignored.

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use fim_common::{ControlRow, FimError, FimResult};
use tracing::debug;

/// Minimum number of columns every data row must have.
pub const MIN_COLUMNS: usize = 3;

/// Parsed control table: the data rows in file order, header dropped.
#[derive(Debug, Clone)]
pub struct ControlTable {
    source: PathBuf,
    rows: Vec<ControlRow>,
}

impl ControlTable {
    /// Read and validate a control table from disk.
    pub fn read(path: impl AsRef<Path>) -> FimResult<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| FimError::read(path, format!("error opening controls file: {}", e)))?;
        Self::from_reader(file, path)
    }

    /// Parse a control table from any reader.
    ///
    /// `source` is only used in error messages and logs.
    pub fn from_reader<R: io::Read>(reader: R, source: impl Into<PathBuf>) -> FimResult<Self> {
        let source = source.into();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);

        let mut records = Vec::new();
        for result in csv_reader.records() {
            let record = result
                .map_err(|e| FimError::read(&source, format!("error reading CSV file: {}", e)))?;
            records.push(record);
        }

        if records.len() < 2 {
            return Err(FimError::shape(&source, "no records in controls file"));
        }

        // Shape is checked for every row before any row is handed out
        let mut rows = Vec::with_capacity(records.len() - 1);
        for record in &records[1..] {
            if record.len() < MIN_COLUMNS {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                return Err(FimError::shape(
                    &source,
                    format!(
                        "not enough columns in controls file, need at least {}; line {} has {}",
                        MIN_COLUMNS,
                        line,
                        record.len()
                    ),
                ));
            }
            rows.push(ControlRow::new(&record[0], &record[1], &record[2]));
        }

        debug!(
            controls = %source.display(),
            rows = rows.len(),
            "Read control table"
        );

        Ok(Self { source, rows })
    }

    /// Path the table was read from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn rows(&self) -> &[ControlRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
