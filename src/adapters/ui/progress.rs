//! Loading indicator shown while the analysis request is in flight.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK: Duration = Duration::from_millis(120);

/// Spinner with the "building the matrix" message. Cleared on drop or `finish`.
pub struct AnalysisSpinner {
    bar: ProgressBar,
}

impl AnalysisSpinner {
    pub fn start(brand_count: usize) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg} [{elapsed}]") {
            bar.set_style(style);
        }
        bar.set_message(format!(
            "Building the strategic benchmark matrix for {} brand(s): merging social data and market insight...",
            brand_count
        ));
        bar.enable_steady_tick(TICK);
        Self { bar }
    }

    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for AnalysisSpinner {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}
