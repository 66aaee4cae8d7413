//! Terminal spinner shown while a blocking network call is outstanding.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

// The last entry is the finished-state frame; the line is cleared on drop
// so it is never visible.
const TICK_GLYPHS: &[&str] = &["-", "\\", "|", "/", ""];
const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Cosmetic spinner decorating a single in-flight request.
pub struct Spinner;

impl Spinner {
    /// Start ticking and return a guard that owns the animation.
    ///
    /// The spinner draws to stderr and is hidden automatically when stderr
    /// is not a terminal. Dropping the guard clears the line, so every exit
    /// path of the decorated call releases it exactly once.
    #[must_use]
    pub fn start(label: &str) -> SpinnerGuard {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(TICK_GLYPHS),
        );
        bar.set_message(label.to_string());
        bar.enable_steady_tick(TICK_INTERVAL);
        SpinnerGuard { bar }
    }
}

/// Scoped handle to a running [`Spinner`].
pub struct SpinnerGuard {
    bar: ProgressBar,
}

impl Drop for SpinnerGuard {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
