//! Per-file load failures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::InputFile;

/// A file that could not be loaded, with a human-readable reason.
///
/// Load errors are collected and reported after the batch; they never
/// abort the run on their own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadError {
    pub file: InputFile,
    pub message: String,
}

impl LoadError {
    pub fn new(file: InputFile, message: impl Into<String>) -> Self {
        Self {
            file,
            message: message.into(),
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.file.name(), self.message)
    }
}
