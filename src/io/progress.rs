//! Terminal progress display for synthesis runs

use crate::algorithm::executor::{ProgressUpdate, SynthesisOutcome, SynthesisProgress};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static PIXEL_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{prefix}} [{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} px ({{eta}})"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Pixel-level progress bar for one synthesis run
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a hidden-until-started progress manager
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(PIXEL_STYLE.clone());
        Self { bar }
    }

    /// Manager that never draws, for quiet runs and tests
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Configure the bar for a run over `total` target pixels
    pub fn start(&self, path: &Path, total: usize) {
        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        self.bar.set_prefix(display_name);
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
    }

    /// Current bar position in pixels
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Close the bar with a message matching the outcome
    pub fn finish(&self, outcome: &SynthesisOutcome) {
        if outcome.cancelled {
            self.bar.abandon_with_message(format!(
                "stopped after {}/{} px",
                outcome.synthesized, outcome.total
            ));
        } else {
            self.bar.finish_and_clear();
        }
    }
}

impl SynthesisProgress for ProgressManager {
    fn update(&mut self, info: ProgressUpdate<'_>) {
        self.bar.set_position(info.synthesized as u64);
    }
}
