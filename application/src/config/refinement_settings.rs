//! Refinement settings - how the step session presents choices.

use serde::{Deserialize, Serialize};

/// Step session presentation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RefinementSettings {
    /// Maximum labels per prompt, including the `NEXT` marker.
    pub page_size: usize,
    /// Leave attributes whose refiner kind is not implemented out of the
    /// attribute prompt instead of failing when they are chosen.
    pub omit_unsupported: bool,
}

impl Default for RefinementSettings {
    fn default() -> Self {
        Self {
            page_size: 30,
            omit_unsupported: false,
        }
    }
}

impl RefinementSettings {
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_omit_unsupported(mut self, omit: bool) -> Self {
        self.omit_unsupported = omit;
        self
    }
}
