//! Remembered run settings.
//!
//! The last input folder, output file and mode are stored as JSON in the
//! platform config directory:
//! - macOS: ~/Library/Application Support/com.table-fusion.Table-Fusion/
//! - Windows: %APPDATA%/table-fusion/Table Fusion/config/
//! - Linux: ~/.config/tablefusion/

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use fusion_model::FusionMode;

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "table-fusion";
const APP_NAME: &str = "Table Fusion";
const PREFERENCES_FILENAME: &str = "preferences.json";

/// Settings from the previous run. Every field is optional so a partial or
/// older file still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_folder: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<FusionMode>,
}

impl Preferences {
    /// Mode to use when none is given; `concat` if never stored.
    pub fn mode_or_default(&self) -> FusionMode {
        self.mode.unwrap_or_default()
    }
}

/// Default preferences location, or `None` if the platform has no config directory.
pub fn default_preferences_path() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(PREFERENCES_FILENAME))
}

/// Loads preferences from `path`.
///
/// A missing or unparsable file yields defaults; only other read failures
/// are errors.
pub fn load_preferences(path: &Path) -> Result<Preferences> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no preferences file, using defaults");
            return Ok(Preferences::default());
        }
        Err(error) => {
            return Err(error)
                .with_context(|| format!("failed to read preferences '{}'", path.display()));
        }
    };

    match serde_json::from_str(&content) {
        Ok(preferences) => {
            tracing::debug!(path = %path.display(), "loaded preferences");
            Ok(preferences)
        }
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "ignoring unreadable preferences");
            Ok(Preferences::default())
        }
    }
}

/// Writes preferences to `path`, creating the parent directory if needed.
pub fn save_preferences(path: &Path, preferences: &Preferences) -> Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).with_context(|| {
            format!("failed to create preferences folder '{}'", parent.display())
        })?;
    }
    let content =
        serde_json::to_string_pretty(preferences).context("failed to serialize preferences")?;
    fs::write(path, content)
        .with_context(|| format!("failed to write preferences '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), "saved preferences");
    Ok(())
}
