//! Terminal rendering of engine events.

use std::sync::mpsc::Receiver;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use fusion_model::FusionEvent;

const WARNING_TITLE: &str = "Some files were skipped";
const WARNING_INTRO: &str = "The following files could not be read:";

/// Draws a progress bar and status lines on stderr.
///
/// When stderr is not a terminal the bar is hidden and every line is
/// printed plainly instead.
pub struct EventRenderer {
    bar: ProgressBar,
}

impl EventRenderer {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files processed",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
        );
        Self { bar }
    }

    /// Renders events until every sender is dropped.
    pub fn drain(&self, receiver: &Receiver<FusionEvent>) {
        for event in receiver {
            self.render(&event);
        }
    }

    pub fn render(&self, event: &FusionEvent) {
        match event {
            FusionEvent::Progress { processed, total } => {
                if self.bar.length() == Some(0) {
                    self.bar.enable_steady_tick(Duration::from_millis(100));
                }
                self.bar.set_length(*total as u64);
                self.bar.set_position(*processed as u64);
            }
            FusionEvent::Status { message } => self.line(message),
            FusionEvent::Warning { messages } => {
                for line in warning_lines(messages) {
                    self.line(&line);
                }
            }
            FusionEvent::Completed { .. } => self.bar.finish_and_clear(),
            FusionEvent::Failed { .. } => self.bar.abandon(),
        }
    }

    fn line(&self, message: &str) {
        if self.bar.is_hidden() {
            eprintln!("{message}");
        } else {
            self.bar.println(message);
        }
    }
}

impl Default for EventRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Lines of the skipped-files warning, entries indented under a heading.
pub fn warning_lines(messages: &[String]) -> Vec<String> {
    let mut lines = Vec::with_capacity(messages.len() + 2);
    lines.push(format!("warning: {WARNING_TITLE}"));
    lines.push(WARNING_INTRO.to_string());
    lines.extend(messages.iter().map(|message| format!("  {message}")));
    lines
}
