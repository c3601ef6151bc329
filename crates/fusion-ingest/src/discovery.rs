//! Candidate file discovery in the input folder.

use std::path::Path;

use fusion_model::InputFile;

use crate::error::{IngestError, Result};

/// Lists the CSV and spreadsheet files directly inside `dir`.
///
/// Extensions are matched case-insensitively; subdirectories are not
/// descended into. Returns absolute paths sorted by filename.
///
/// # Errors
///
/// Fails when `dir` is missing, is not a directory, cannot be listed, or
/// holds no candidate file.
pub fn discover_files(dir: &Path) -> Result<Vec<InputFile>> {
    if !dir.exists() {
        return Err(IngestError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        return Err(IngestError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let root = std::path::absolute(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let entries = std::fs::read_dir(&root).map_err(|e| IngestError::DirectoryRead {
        path: root.clone(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: root.clone(),
            source: e,
        })?;

        let path = entry.path();

        // Skip directories
        if !path.is_file() {
            continue;
        }

        if let Some(file) = InputFile::from_path(path) {
            files.push(file);
        }
    }

    if files.is_empty() {
        return Err(IngestError::NoCandidateFiles {
            path: dir.to_path_buf(),
        });
    }

    // Sort by filename
    files.sort_by(|a, b| a.name().cmp(b.name()));

    tracing::info!(folder = %root.display(), count = files.len(), "discovered input files");
    Ok(files)
}
