//! Fusion job configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building model values from user input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// Unknown fusion mode string.
    #[error("invalid fusion mode '{value}' (expected 'concat' or 'merge')")]
    InvalidMode { value: String },
}

/// Strategy used to combine the loaded tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FusionMode {
    /// Stack rows, union columns by name.
    #[default]
    Concat,
    /// Sequential full outer join on the common column names.
    Merge,
}

impl FusionMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Concat => "concat",
            Self::Merge => "merge",
        }
    }
}

impl fmt::Display for FusionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FusionMode {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concat" => Ok(Self::Concat),
            "merge" => Ok(Self::Merge),
            _ => Err(ModelError::InvalidMode {
                value: s.to_string(),
            }),
        }
    }
}

/// Everything the engine needs to run one fusion job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FusionConfig {
    /// Folder scanned (non-recursively) for input files.
    pub input_folder: PathBuf,
    /// Destination file; its extension selects the output format.
    pub output_file: PathBuf,
    /// Fusion strategy.
    #[serde(default)]
    pub mode: FusionMode,
}

impl FusionConfig {
    pub fn new(
        input_folder: impl Into<PathBuf>,
        output_file: impl Into<PathBuf>,
        mode: FusionMode,
    ) -> Self {
        Self {
            input_folder: input_folder.into(),
            output_file: output_file.into(),
            mode,
        }
    }
}
