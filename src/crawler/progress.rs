//! Progress reporting for the pagination run

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives one tick per completed page
///
/// Ticks arrive in completion order, which under concurrent batches need not
/// match page index order.
pub trait ProgressReporter {
    /// Called once before the first page is requested
    fn start(&self, _total_pages: u32) {}

    /// Called after each page completes, successful or not
    fn tick(&self, completed: u32, total_pages: u32);

    /// Called once every page has completed
    fn finish(&self) {}
}

/// Discards all progress
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn tick(&self, _completed: u32, _total_pages: u32) {}
}

impl ProgressReporter for ProgressBar {
    fn start(&self, total_pages: u32) {
        self.set_length(u64::from(total_pages));
        self.set_position(0);
    }

    fn tick(&self, completed: u32, _total_pages: u32) {
        self.set_position(u64::from(completed));
    }

    fn finish(&self) {
        self.finish_and_clear();
    }
}

/// Builds the terminal progress bar: `[#####-----] Page 12/272`
pub fn page_progress_bar(hidden: bool) -> ProgressBar {
    let bar = ProgressBar::new(0);

    if hidden {
        bar.set_draw_target(ProgressDrawTarget::hidden());
        return bar;
    }

    if let Ok(style) = ProgressStyle::default_bar().template("[{bar:50}] Page {pos}/{len}") {
        bar.set_style(style.progress_chars("##-"));
    }
    bar
}
