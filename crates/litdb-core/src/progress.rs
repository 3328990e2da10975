//! Progress reporting for TTY and non-TTY environments
//!
//! TTY mode: an indicatif spinner counting archive members.
//! Non-TTY mode: hidden bars, log lines are the only progress output.

use std::io::IsTerminal;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

fn spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .template("{spinner:.green} {pos} members {wide_msg:.dim}")
        .expect("invalid template")
}

/// Central progress context managing the run's progress bars.
pub struct ProgressContext {
    multi: MultiProgress,
    is_tty: bool,
}

impl Default for ProgressContext {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressContext {
    /// Create a new context, detecting TTY automatically.
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty: std::io::stderr().is_terminal(),
        }
    }

    /// Context with all bars hidden, for tests and embedding.
    pub fn hidden() -> Self {
        Self {
            multi: MultiProgress::new(),
            is_tty: false,
        }
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    pub fn multi(&self) -> &MultiProgress {
        &self.multi
    }

    /// Spinner counting processed archive members.
    ///
    /// Update with `inc(1)` per member and `set_message(...)` for the
    /// current member name; call `finish_and_clear` when done.
    pub fn member_spinner(&self) -> ProgressBar {
        if !self.is_tty {
            return ProgressBar::hidden();
        }
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(spinner_style());
        pb
    }
}
