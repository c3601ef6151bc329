//! Error types for input discovery and loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while discovering or loading input files.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Discovery Errors ===
    /// Input folder does not exist.
    #[error("the folder '{}' does not exist", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// Input path exists but is not a folder.
    #[error("'{}' is not a directory", path.display())]
    NotADirectory { path: PathBuf },

    /// Folder contains no CSV or spreadsheet files.
    #[error("no CSV or Excel files found in the folder '{}'", path.display())]
    NoCandidateFiles { path: PathBuf },

    /// Failed to read directory entries.
    #[error("failed to read directory {}: {source}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === File Errors ===
    /// Failed to read file.
    #[error("failed to read file {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File has no header row.
    #[error("file is empty: {}", path.display())]
    EmptyFile { path: PathBuf },

    /// No encoding in the fallback chain could decode the file.
    #[error("could not decode {} (tried {tried})", path.display())]
    Decode { path: PathBuf, tried: String },

    /// Decoded text could not be parsed as CSV.
    #[error("failed to parse CSV {}: {message}", path.display())]
    CsvParse { path: PathBuf, message: String },

    /// Workbook could not be opened or read.
    #[error("failed to read spreadsheet {}: {message}", path.display())]
    Spreadsheet { path: PathBuf, message: String },

    /// Workbook has no worksheet.
    #[error("workbook has no worksheet: {}", path.display())]
    NoWorksheet { path: PathBuf },

    /// The component needed for this format was not compiled in.
    #[error("cannot read {}: {component} is required ({remedy})", path.display())]
    MissingDependency {
        path: PathBuf,
        component: &'static str,
        remedy: &'static str,
    },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// True for the discovery failures that mean "nothing to fuse here".
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::DirectoryNotFound { .. } | Self::NotADirectory { .. } | Self::NoCandidateFiles { .. }
        )
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
