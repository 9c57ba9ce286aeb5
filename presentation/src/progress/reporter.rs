//! Progress reporting for answer validation

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use refiner_application::ValidationProgress;
use std::sync::Mutex;

/// Reports validation progress with a progress bar per query
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn query_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationProgress for ProgressReporter {
    fn on_query_start(&self, attribute: &str, total_batches: usize) {
        let pb = ProgressBar::new(total_batches as u64);
        pb.set_style(Self::query_style());
        pb.set_prefix(attribute.to_string());
        pb.set_message("asking...");

        if let Ok(mut bar) = self.bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_batch_complete(&self, _attribute: &str) {
        if let Ok(bar) = self.bar.lock() {
            if let Some(pb) = bar.as_ref() {
                pb.inc(1);
            }
        }
    }

    fn on_query_complete(&self, attribute: &str, survivors: usize) {
        if let Ok(mut bar) = self.bar.lock() {
            if let Some(pb) = bar.take() {
                pb.finish_with_message(format!(
                    "{} {} articles remain",
                    attribute.green(),
                    survivors
                ));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ValidationProgress for SimpleProgress {
    fn on_query_start(&self, attribute: &str, total_batches: usize) {
        println!(
            "{} {} ({} batches)",
            "->".cyan(),
            attribute.bold(),
            total_batches
        );
    }

    fn on_batch_complete(&self, _attribute: &str) {}

    fn on_query_complete(&self, _attribute: &str, survivors: usize) {
        if survivors == 0 {
            println!("  {} no articles remain", "x".red());
        } else {
            println!("  {} {} articles remain", "v".green(), survivors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_one_bar_per_query() {
        let reporter = ProgressReporter::new();
        reporter.on_query_start("生年月日", 3);
        reporter.on_batch_complete("生年月日");
        assert_eq!(
            reporter.bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(1)
        );
        reporter.on_query_complete("生年月日", 2);
        assert!(reporter.bar.lock().unwrap().is_none());
    }
}
