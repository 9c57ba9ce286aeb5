//! QA engine configuration from TOML (`[qa]` section)

use refiner_application::ValidationParams;
use refiner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

pub const DEFAULT_QA_ENDPOINT: &str = "http://localhost:8000/predict";

/// Raw QA engine configuration from TOML
///
/// # Example
///
/// ```toml
/// [qa]
/// endpoint = "http://localhost:8000/predict"
/// top_n = 1
/// batch_size = 6
/// timeout_secs = 120
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQaConfig {
    pub endpoint: String,
    pub top_n: usize,
    pub batch_size: usize,
    pub timeout_secs: u64,
}

impl Default for FileQaConfig {
    fn default() -> Self {
        let params = ValidationParams::default();
        Self {
            endpoint: DEFAULT_QA_ENDPOINT.to_string(),
            top_n: params.top_n,
            batch_size: params.batch_size,
            timeout_secs: 120,
        }
    }
}

impl FileQaConfig {
    /// Batch parameters; zero values fall back to the defaults.
    pub fn to_params(&self) -> (ValidationParams, Vec<ConfigIssue>) {
        let defaults = ValidationParams::default();
        let mut issues = Vec::new();
        let top_n = at_least_one("qa.top_n", self.top_n, defaults.top_n, &mut issues);
        let batch_size = at_least_one(
            "qa.batch_size",
            self.batch_size,
            defaults.batch_size,
            &mut issues,
        );
        let params = defaults.with_top_n(top_n).with_batch_size(batch_size);
        (params, issues)
    }
}

fn at_least_one(field: &str, value: usize, default: usize, issues: &mut Vec<ConfigIssue>) -> usize {
    if value > 0 {
        return value;
    }
    issues.push(ConfigIssue::warning(
        ConfigIssueCode::OutOfRange {
            field: field.to_string(),
            value: 0,
        },
        format!("{}: must be at least 1, falling back to {}", field, default),
    ));
    default
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_params() {
        let config = FileQaConfig {
            top_n: 3,
            batch_size: 0,
            ..Default::default()
        };
        let (params, issues) = config.to_params();
        assert_eq!(params.top_n, 3);
        assert_eq!(params.batch_size, 6);
        assert_eq!(issues.len(), 1);
    }
}
