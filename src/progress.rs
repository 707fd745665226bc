//! Throttled progress reporting for long filter runs.
//!
//! The reporter owns its own counters and gates redraws on BOTH a
//! wall-clock interval and a minimum byte delta, so a fast scan of a
//! huge file never spends its time repainting a terminal. Deterministic
//! harnesses drop the wall-clock gate with [`ProgressReporter::with_min_interval`]
//! and drive updates purely by byte deltas.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const MIN_INTERVAL: Duration = Duration::from_secs(1);
const MIN_BYTE_DELTA: u64 = 1024 * 1024;

pub struct ProgressReporter {
    bar: ProgressBar,
    min_interval: Duration,
    min_byte_delta: u64,
    last_update: Instant,
    last_bytes: u64,
}

impl ProgressReporter {
    /// Progress bar on stderr. `total_bytes` of zero means the input
    /// length is unknown (standard input); the bar then renders as a
    /// plain byte counter.
    #[must_use]
    pub fn new(total_bytes: u64) -> Self {
        Self::with_bar(Self::styled_bar(total_bytes))
    }

    /// Reporter that never draws. Used by tests and non-tty harnesses;
    /// counters and throttling behave exactly as in [`Self::new`].
    #[must_use]
    pub fn hidden(total_bytes: u64) -> Self {
        let bar = Self::styled_bar(total_bytes);
        bar.set_draw_target(ProgressDrawTarget::hidden());
        Self::with_bar(bar)
    }

    fn styled_bar(total_bytes: u64) -> ProgressBar {
        if total_bytes > 0 {
            let bar = ProgressBar::new(total_bytes);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})")
                    .expect("valid template")
                    .progress_chars("=>-"),
            );
            bar
        } else {
            let bar = ProgressBar::new_spinner();
            bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.cyan} {bytes} ({bytes_per_sec})")
                    .expect("valid template"),
            );
            bar
        }
    }

    fn with_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            min_interval: MIN_INTERVAL,
            min_byte_delta: MIN_BYTE_DELTA,
            last_update: Instant::now(),
            last_bytes: 0,
        }
    }

    /// Replace the wall-clock gate. `Duration::ZERO` makes updates
    /// trigger on byte deltas alone, which is reproducible.
    #[must_use]
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    /// Replace the minimum byte delta between redraws.
    #[must_use]
    pub fn with_min_byte_delta(mut self, delta: u64) -> Self {
        self.min_byte_delta = delta;
        self
    }

    /// Report the total bytes processed so far. Redraws only when both
    /// throttle gates pass.
    pub fn update(&mut self, bytes_processed: u64) {
        if bytes_processed.saturating_sub(self.last_bytes) < self.min_byte_delta {
            return;
        }
        if self.last_update.elapsed() < self.min_interval {
            return;
        }
        self.bar.set_position(bytes_processed);
        self.last_bytes = bytes_processed;
        self.last_update = Instant::now();
    }

    /// Draw the final position and release the bar.
    pub fn finish(&mut self, bytes_processed: u64) {
        self.bar.set_position(bytes_processed);
        self.bar.finish_and_clear();
    }

    /// Last drawn position.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }
}
