//! Progress display for batch conversions

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Single progress bar counting converted files
pub struct ProgressManager {
    bar: ProgressBar,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a manager drawing to standard error
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
        }
    }

    /// Create a manager that tracks state without drawing anything
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Size the bar for the number of files in the batch
    pub fn initialize(&self, file_count: usize) {
        self.bar.set_length(file_count as u64);
        self.bar.set_position(0);
        self.bar.set_style(BATCH_STYLE.clone());
    }

    /// Show the file currently being converted
    pub fn start_file(&self, path: &Path) {
        let display_name = path.file_name().unwrap_or_default().to_string_lossy();
        self.bar.set_message(display_name.into_owned());
    }

    /// Count one file as done, whether it succeeded or not
    pub fn complete_file(&self) {
        self.bar.inc(1);
    }

    /// Run `f` with the bar hidden so log lines do not tear it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Files completed so far
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Replace the bar with a final message
    pub fn finish(&self) {
        self.bar.finish_with_message("All files processed");
    }
}
