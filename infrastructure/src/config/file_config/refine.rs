//! Refinement configuration from TOML (`[refine]` section)

use refiner_application::RefinementSettings;
use refiner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw refinement configuration from TOML
///
/// # Example
///
/// ```toml
/// [refine]
/// page_size = 30               # options per prompt, NEXT included
/// omit_unsupported = false     # hide attributes without a refiner
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRefineConfig {
    pub page_size: usize,
    pub omit_unsupported: bool,
}

impl Default for FileRefineConfig {
    fn default() -> Self {
        let settings = RefinementSettings::default();
        Self {
            page_size: settings.page_size,
            omit_unsupported: settings.omit_unsupported,
        }
    }
}

impl FileRefineConfig {
    /// Convert to application settings; a zero page size falls back to the default.
    pub fn to_settings(&self) -> (RefinementSettings, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut settings =
            RefinementSettings::default().with_omit_unsupported(self.omit_unsupported);
        if self.page_size == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::OutOfRange {
                    field: "refine.page_size".to_string(),
                    value: 0,
                },
                format!(
                    "refine.page_size: must be at least 1, falling back to {}",
                    settings.page_size
                ),
            ));
        } else {
            settings = settings.with_page_size(self.page_size);
        }
        (settings, issues)
    }
}
