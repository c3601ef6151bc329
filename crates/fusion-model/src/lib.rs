//! Data model types for table fusion.
//!
//! This crate holds the types shared by every stage of the fusion pipeline:
//! - [`input`]: Discovered input files and their formats
//! - [`cell`]: Tagged cell values and per-column type inference
//! - [`config`]: Fusion mode and job configuration
//! - [`event`]: Progress/status events and the sink they are delivered to
//! - [`load`]: Per-file load failures

pub mod cell;
pub mod config;
pub mod event;
pub mod input;
pub mod load;

pub use cell::{CellValue, infer_column};
pub use config::{FusionConfig, FusionMode, ModelError};
pub use event::{EventSink, FusionEvent, NullSink};
pub use input::{FileFormat, InputFile};
pub use load::LoadError;
