//! The fusion pipeline: discover, load, combine, write.

use std::path::PathBuf;
use std::time::Instant;

use polars::prelude::DataFrame;
use tracing::{error, info, info_span};

use fusion_ingest::{LoadReport, discover_files, load_files};
use fusion_model::{EventSink, FusionConfig, FusionEvent, LoadError};
use fusion_output::{OutputFormat, write_table};

use crate::combine::combine;
use crate::error::{FusionError, Result};

/// Load failures listed in the warning before truncating.
pub const MAX_WARNING_ENTRIES: usize = 10;

/// Appended to the warning when more failures were omitted.
pub const TRUNCATION_MARKER: &str = "... and more errors.";

/// Rows shown by previews of the result.
pub const PREVIEW_ROWS: usize = 20;

const NO_DETAILS: &str = "No readable files.";

/// A finished fusion run.
#[derive(Debug, Clone)]
pub struct FusionOutcome {
    /// Where the result was written.
    pub output_path: PathBuf,
    /// Format the result was written in.
    pub format: OutputFormat,
    /// The fused table.
    pub result: DataFrame,
    /// Candidate files found in the input folder.
    pub files_discovered: usize,
    /// Files that were skipped.
    pub load_errors: Vec<LoadError>,
    /// Wall-clock duration of the run in milliseconds.
    pub elapsed_ms: u64,
}

impl FusionOutcome {
    /// Files that loaded and took part in the fusion.
    pub fn files_loaded(&self) -> usize {
        self.files_discovered - self.load_errors.len()
    }

    /// Confirmation shown to the user.
    pub fn success_message(&self) -> String {
        format!(
            "Fusion completed successfully. Output saved to '{}'.",
            self.output_path.display()
        )
    }

    /// First [`PREVIEW_ROWS`] rows of the result.
    pub fn preview(&self) -> DataFrame {
        self.result.head(Some(PREVIEW_ROWS))
    }
}

/// Formats load failures for display: the first [`MAX_WARNING_ENTRIES`]
/// descriptions, then [`TRUNCATION_MARKER`] if any were left out.
pub fn warning_preview(errors: &[LoadError]) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .iter()
        .take(MAX_WARNING_ENTRIES)
        .map(ToString::to_string)
        .collect();
    if errors.len() > MAX_WARNING_ENTRIES {
        messages.push(TRUNCATION_MARKER.to_string());
    }
    messages
}

/// Runs one fusion job to completion.
///
/// Emits `Progress` after every file, `Status` at each stage change, one
/// `Warning` if some files were skipped, and finally exactly one of
/// `Completed` or `Failed`. There is no cancellation: once started, every
/// file is attempted and the result is written.
///
/// # Errors
///
/// See [`FusionError`]; per-file load failures are not errors unless no file
/// loaded at all.
pub fn run_fusion(config: &FusionConfig, sink: &dyn EventSink) -> Result<FusionOutcome> {
    let span = info_span!(
        "fusion",
        input = %config.input_folder.display(),
        output = %config.output_file.display(),
        mode = %config.mode
    );
    let _guard = span.enter();

    match execute(config, sink) {
        Ok(outcome) => {
            info!(
                files = outcome.files_discovered,
                skipped = outcome.load_errors.len(),
                rows = outcome.result.height(),
                columns = outcome.result.width(),
                elapsed_ms = outcome.elapsed_ms,
                "fusion completed"
            );
            sink.emit(FusionEvent::Completed {
                output_path: outcome.output_path.clone(),
            });
            Ok(outcome)
        }
        Err(err) => {
            error!(error = %err, kind = ?err.kind(), "fusion failed");
            sink.emit(FusionEvent::Failed {
                error: err.to_string(),
            });
            Err(err)
        }
    }
}

fn execute(config: &FusionConfig, sink: &dyn EventSink) -> Result<FusionOutcome> {
    let start = Instant::now();

    let files = discover_files(&config.input_folder).map_err(FusionError::Discovery)?;
    let files_discovered = files.len();

    status(sink, "Reading files...");
    let mut report = load_files(&files, |processed, total| {
        sink.emit(FusionEvent::Progress { processed, total });
    });

    if report.tables.is_empty() {
        return Err(no_readable_files(config, &report));
    }
    if !report.errors.is_empty() {
        sink.emit(FusionEvent::Warning {
            messages: warning_preview(&report.errors),
        });
    }

    let errors = std::mem::take(&mut report.errors);
    let tables = report.into_tables();
    info!(loaded = tables.len(), skipped = errors.len(), "reading completed");

    status(sink, "Reading completed, starting fusion...");
    let mut result = combine(tables, config.mode)?;

    status(sink, "Fusion completed, writing to file...");
    let format = write_table(&mut result, &config.output_file)?;
    status(sink, "Writing completed");

    Ok(FusionOutcome {
        output_path: config.output_file.clone(),
        format,
        result,
        files_discovered,
        load_errors: errors,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    })
}

fn no_readable_files(config: &FusionConfig, report: &LoadReport) -> FusionError {
    let details = if report.errors.is_empty() {
        NO_DETAILS.to_string()
    } else {
        report.error_messages().join("\n")
    };
    FusionError::NoReadableFiles {
        folder: config.input_folder.clone(),
        details,
    }
}

fn status(sink: &dyn EventSink, message: &str) {
    sink.emit(FusionEvent::Status {
        message: message.to_string(),
    });
}
