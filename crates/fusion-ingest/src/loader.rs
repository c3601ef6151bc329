//! Batch loading with per-file failure isolation.

use polars::prelude::DataFrame;

use fusion_model::{InputFile, LoadError};

use crate::delimited::{TextEncoding, read_csv_table};
use crate::error::Result;
use crate::spreadsheet::read_spreadsheet;

/// A successfully loaded input file.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub file: InputFile,
    pub table: DataFrame,
    /// Encoding that decoded the file; `None` for spreadsheets.
    pub encoding: Option<TextEncoding>,
}

/// Outcome of loading a batch of files.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Loaded tables, in the order the files were given.
    pub tables: Vec<LoadedTable>,
    /// Files that failed, in the order the files were given.
    pub errors: Vec<LoadError>,
}

impl LoadReport {
    /// Number of files attempted.
    pub fn attempted(&self) -> usize {
        self.tables.len() + self.errors.len()
    }

    /// Failure descriptions (`"<file>: <reason>"`).
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Consumes the report, keeping only the tables.
    pub fn into_tables(self) -> Vec<DataFrame> {
        self.tables.into_iter().map(|loaded| loaded.table).collect()
    }
}

/// Loads one file according to its format.
pub fn load_file(file: &InputFile) -> Result<LoadedTable> {
    let (table, encoding) = if file.format().is_spreadsheet() {
        (read_spreadsheet(file.path())?, None)
    } else {
        let (table, encoding) = read_csv_table(file.path())?;
        (table, Some(encoding))
    };

    Ok(LoadedTable {
        file: file.clone(),
        table,
        encoding,
    })
}

/// Loads every file, recording failures instead of stopping.
///
/// `on_progress(processed, total)` is called after each file, whether it
/// loaded or not.
pub fn load_files<F>(files: &[InputFile], mut on_progress: F) -> LoadReport
where
    F: FnMut(usize, usize),
{
    let total = files.len();
    let mut report = LoadReport::default();

    for (idx, file) in files.iter().enumerate() {
        match load_file(file) {
            Ok(loaded) => {
                tracing::debug!(
                    file = file.name(),
                    encoding = loaded.encoding.map(TextEncoding::label),
                    rows = loaded.table.height(),
                    columns = loaded.table.width(),
                    "loaded file"
                );
                report.tables.push(loaded);
            }
            Err(error) => {
                tracing::warn!(file = file.name(), %error, "skipping unreadable file");
                report.errors.push(LoadError::new(file.clone(), error.to_string()));
            }
        }
        on_progress(idx + 1, total);
    }

    report
}
