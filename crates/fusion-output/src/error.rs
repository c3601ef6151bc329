//! Error types for output writing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while writing the fused table.
#[derive(Debug, Error)]
pub enum OutputError {
    /// The spreadsheet writer was not compiled in.
    #[error("the '{component}' component is required to write spreadsheet files; {remedy}")]
    MissingDependency {
        component: &'static str,
        remedy: &'static str,
    },

    /// Any other failure while serializing or writing the file.
    #[error("an error occurred while writing to '{}': {message}", path.display())]
    Write { path: PathBuf, message: String },
}

impl OutputError {
    pub(crate) fn write(path: &std::path::Path, message: impl ToString) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            message: message.to_string(),
        }
    }
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, OutputError>;
