//! Presentation layer for attr-refiner
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and the interactive refinement REPL.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod refine;

// Re-export commonly used types
pub use cli::commands::{Cli, OutputFormat};
pub use config::ReplConfig;
pub use output::console::ConsoleFormatter;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
pub use refine::repl::{RefineRepl, ReplError};
