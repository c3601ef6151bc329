//! Table fusion engine.
//!
//! Runs the full pipeline for one [`FusionConfig`]:
//!
//! 1. discover candidate files in the input folder,
//! 2. load each file, isolating per-file failures,
//! 3. combine the tables (`concat` or `merge`),
//! 4. write the result.
//!
//! Progress and status go to an [`EventSink`]; the outcome or a typed
//! [`FusionError`] is returned to the caller.
//!
//! ```ignore
//! use fusion_core::run_fusion;
//! use fusion_model::{FusionConfig, FusionMode, NullSink};
//!
//! let config = FusionConfig::new("exports/", "merged.xlsx", FusionMode::Concat);
//! let outcome = run_fusion(&config, &NullSink)?;
//! println!("{}", outcome.success_message());
//! ```
//!
//! [`FusionConfig`]: fusion_model::FusionConfig
//! [`EventSink`]: fusion_model::EventSink

pub mod combine;
pub mod engine;
mod error;

pub use combine::{combine, concat_tables, merge_tables};
pub use engine::{
    FusionOutcome, MAX_WARNING_ENTRIES, PREVIEW_ROWS, TRUNCATION_MARKER, run_fusion,
    warning_preview,
};
pub use error::{CombineError, FusionError, FusionErrorKind, Result};
