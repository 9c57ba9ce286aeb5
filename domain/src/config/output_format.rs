//! Output format value object

use serde::{Deserialize, Serialize};

/// How a validation report is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Every surviving article with its matched answers
    Full,
    /// Only the titles of surviving articles (default)
    #[default]
    Titles,
    /// JSON report
    Json,
}
