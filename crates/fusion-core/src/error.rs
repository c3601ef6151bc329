//! Error taxonomy for a fusion run.

use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

use fusion_ingest::IngestError;
use fusion_output::OutputError;

/// Failures while combining loaded tables.
#[derive(Debug, Error)]
pub enum CombineError {
    /// Nothing to combine.
    #[error("no tables to combine")]
    NoTables,

    /// A table shares no column with the tables merged before it.
    #[error(
        "no common columns to merge table {index} on (merged columns: {left:?}, table columns: {right:?})"
    )]
    NoCommonColumns {
        /// Zero-based position of the table in processing order.
        index: usize,
        left: Vec<String>,
        right: Vec<String>,
    },

    /// A key column has types that cannot be joined (e.g. text and numbers).
    #[error("cannot merge on column '{column}': {left} in the merged table, {right} in the next table")]
    KeyTypeMismatch {
        column: String,
        left: String,
        right: String,
    },

    /// DataFrame operation failed.
    #[error("failed to {operation} tables: {message}")]
    DataFrame {
        operation: &'static str,
        message: String,
    },
}

impl CombineError {
    pub(crate) fn polars(operation: &'static str, err: PolarsError) -> Self {
        Self::DataFrame {
            operation,
            message: err.to_string(),
        }
    }
}

/// Coarse classification of a run failure, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusionErrorKind {
    /// Input folder missing, not a folder, or without candidate files.
    NotFound,
    /// Nothing could be loaded or combined.
    Runtime,
    /// An optional component needed for the output format is absent.
    MissingDependency,
    /// The output file could not be written.
    Write,
}

/// A failure that ends a fusion run.
#[derive(Debug, Error)]
pub enum FusionError {
    /// Discovery failed.
    #[error(transparent)]
    Discovery(IngestError),

    /// Every candidate file failed to load.
    #[error("no files could be read successfully from '{}'. Details: {details}", folder.display())]
    NoReadableFiles { folder: PathBuf, details: String },

    /// Combining the loaded tables failed.
    #[error(transparent)]
    Combine(#[from] CombineError),

    /// Writing the result failed.
    #[error(transparent)]
    Output(#[from] OutputError),
}

impl FusionError {
    pub fn kind(&self) -> FusionErrorKind {
        match self {
            Self::Discovery(err) if err.is_not_found() => FusionErrorKind::NotFound,
            Self::Discovery(_) | Self::NoReadableFiles { .. } | Self::Combine(_) => {
                FusionErrorKind::Runtime
            }
            Self::Output(OutputError::MissingDependency { .. }) => {
                FusionErrorKind::MissingDependency
            }
            Self::Output(OutputError::Write { .. }) => FusionErrorKind::Write,
        }
    }
}

/// Result type for fusion runs.
pub type Result<T> = std::result::Result<T, FusionError>;
