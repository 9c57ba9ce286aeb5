//! Phonetic bucketing configuration from TOML (`[phonetic]` section)

use crate::phonetic::ReaderBackend;
use refiner_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Raw phonetic configuration from TOML
///
/// # Example
///
/// ```toml
/// [phonetic]
/// reader = "kakasi"     # "kakasi" or "kana"
/// max_bucket = 40       # split buckets larger than this by the next kana
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePhoneticConfig {
    pub reader: String,
    pub max_bucket: Option<usize>,
}

impl Default for FilePhoneticConfig {
    fn default() -> Self {
        Self {
            reader: "kakasi".to_string(),
            max_bucket: None,
        }
    }
}

impl FilePhoneticConfig {
    pub fn parse_reader(&self) -> (ReaderBackend, Vec<ConfigIssue>) {
        match self.reader.parse::<ReaderBackend>() {
            Ok(backend) => (backend, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "phonetic.reader".to_string(),
                        value: self.reader.clone(),
                        valid_values: vec!["kakasi".to_string(), "kana".to_string()],
                    },
                    format!(
                        "phonetic.reader: unknown value '{}', falling back to 'kakasi'",
                        self.reader
                    ),
                );
                (ReaderBackend::default(), vec![issue])
            }
        }
    }

    /// Bucket size limit; zero disables subdivision.
    pub fn parse_max_bucket(&self) -> (Option<usize>, Vec<ConfigIssue>) {
        match self.max_bucket {
            Some(0) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: "phonetic.max_bucket".to_string(),
                        value: 0,
                    },
                    "phonetic.max_bucket: must be at least 1, subdivision disabled",
                );
                (None, vec![issue])
            }
            other => (other, vec![]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_reader_falls_back() {
        let config = FilePhoneticConfig {
            reader: "mecab".to_string(),
            max_bucket: Some(0),
        };
        let (backend, issues) = config.parse_reader();
        assert_eq!(backend, ReaderBackend::Kakasi);
        assert_eq!(issues.len(), 1);
        let (max, issues) = config.parse_max_bucket();
        assert_eq!(max, None);
        assert_eq!(issues.len(), 1);
    }
}
