//! Notifications emitted by the engine while a job runs.
//!
//! The engine only ever talks to an [`EventSink`]; how events reach a user
//! (terminal, GUI event loop, log) is up to the sink's owner. A sink must not
//! block the engine for long, and must be safe to call from the worker thread.

use std::path::PathBuf;
use std::sync::mpsc::Sender;

use serde::{Deserialize, Serialize};

/// Messages sent from the fusion engine to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FusionEvent {
    /// A file finished loading (successfully or not).
    Progress { processed: usize, total: usize },
    /// Stage change.
    Status { message: String },
    /// Non-fatal per-file failures, already truncated for display.
    Warning { messages: Vec<String> },
    /// Output written.
    Completed { output_path: PathBuf },
    /// The run ended with an error.
    Failed { error: String },
}

/// Receiver of engine notifications.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: FusionEvent);
}

/// Forwards events over an unbounded channel.
///
/// Sending never blocks; a dropped receiver is ignored so the job still
/// runs to completion.
impl EventSink for Sender<FusionEvent> {
    fn emit(&self, event: FusionEvent) {
        let _ = self.send(event);
    }
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: FusionEvent) {}
}
