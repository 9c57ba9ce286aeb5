//! Progress notification port
//!
//! Defines the interface for reporting progress while answers are validated.

/// Callback for progress updates during validation
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain logs, etc.)
pub trait ValidationProgress: Send + Sync {
    /// Called when a query starts, with the number of QA batches it needs
    fn on_query_start(&self, attribute: &str, total_batches: usize);

    /// Called after each QA batch
    fn on_batch_complete(&self, attribute: &str);

    /// Called when a query is done, with the number of surviving articles
    fn on_query_complete(&self, attribute: &str, survivors: usize);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ValidationProgress for NoProgress {
    fn on_query_start(&self, _attribute: &str, _total_batches: usize) {}
    fn on_batch_complete(&self, _attribute: &str) {}
    fn on_query_complete(&self, _attribute: &str, _survivors: usize) {}
}
