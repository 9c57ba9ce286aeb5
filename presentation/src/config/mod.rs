//! Presentation-level configuration
//!
//! Configuration for the interactive refinement REPL.

use std::path::PathBuf;

/// REPL configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct ReplConfig {
    /// Show the finished queries after each one is added
    pub show_queries: bool,
    /// Path to history file; `None` keeps history in memory
    pub history_file: Option<PathBuf>,
}

impl Default for ReplConfig {
    fn default() -> Self {
        Self {
            show_queries: true,
            history_file: Self::default_history_file(),
        }
    }
}

impl ReplConfig {
    /// `$XDG_DATA_HOME/attr-refiner/history.txt`
    pub fn default_history_file() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("attr-refiner").join("history.txt"))
    }

    pub fn without_history(mut self) -> Self {
        self.history_file = None;
        self
    }
}
