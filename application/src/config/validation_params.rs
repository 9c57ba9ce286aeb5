//! Validation parameters - QA batch control.

use serde::{Deserialize, Serialize};

/// Controls how questions are sent to the QA engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationParams {
    /// Ranked answers requested per question; only the best is checked.
    pub top_n: usize,
    /// `(context, question)` pairs per engine call.
    pub batch_size: usize,
}

impl Default for ValidationParams {
    fn default() -> Self {
        Self {
            top_n: 1,
            batch_size: 6,
        }
    }
}

impl ValidationParams {
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}
