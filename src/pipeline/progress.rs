// file: src/pipeline/progress.rs
// description: progress display and run statistics for a batch
// reference: uses indicatif for progress bars and tracks enrichment metrics

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub documents_processed: usize,
    pub stage_fallbacks: usize,
    pub session_turns: usize,
    pub duration_secs: f64,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents_per_second(&self) -> f64 {
        if self.duration_secs <= 0.0 {
            return 0.0;
        }
        self.documents_processed as f64 / self.duration_secs
    }

    /// Share of stage calls that produced real output, in percent.
    pub fn stage_success_rate(&self) -> f64 {
        let attempted = self.session_turns + self.stage_fallbacks;
        if attempted == 0 {
            return 0.0;
        }
        (self.session_turns as f64 / attempted as f64) * 100.0
    }
}

pub struct ProgressTracker {
    bar: ProgressBar,
    documents_processed: usize,
    stage_fallbacks: usize,
    start_time: Instant,
}

impl ProgressTracker {
    pub fn with_color(total_documents: usize, colored: bool) -> Self {
        Self::from_bar(create_progress_bar(total_documents as u64, colored))
    }

    /// Tracks counts without drawing anything.
    pub fn hidden(total_documents: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total_documents as u64);
        Self::from_bar(bar)
    }

    fn from_bar(bar: ProgressBar) -> Self {
        Self {
            bar,
            documents_processed: 0,
            stage_fallbacks: 0,
            start_time: Instant::now(),
        }
    }

    pub fn record_document(&mut self, fallbacks: usize) {
        self.documents_processed += 1;
        self.stage_fallbacks += fallbacks;
        self.bar.inc(1);
        self.bar
            .set_message(format!("Fallbacks: {}", self.stage_fallbacks));
    }

    pub fn set_message(&self, message: String) {
        self.bar.set_message(message);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    pub fn stats(&self, session_turns: usize) -> RunStats {
        RunStats {
            documents_processed: self.documents_processed,
            stage_fallbacks: self.stage_fallbacks,
            session_turns,
            duration_secs: self.start_time.elapsed().as_secs_f64(),
        }
    }
}

impl Drop for ProgressTracker {
    fn drop(&mut self) {
        self.finish();
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);
    let template = if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({eta}) {msg}"
    };
    let chars = if colored { "█▓▒░" } else { "=>-" };

    let style = ProgressStyle::default_bar()
        .template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars(chars);
    bar.set_style(style);
    bar
}
