//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! values by the `parse_*` / `to_*` methods, which report problems as
//! [`ConfigIssue`]s and fall back to defaults instead of failing.

mod attributes;
mod dates;
mod datasets;
mod output;
mod phonetic;
mod qa;
mod refine;
mod sparql;

pub use attributes::{FileAttributeConfig, parse_catalog};
pub use dates::{FileDatesConfig, FileEraConfig};
pub use datasets::FileDatasetsConfig;
pub use output::FileOutputConfig;
pub use phonetic::FilePhoneticConfig;
pub use qa::{DEFAULT_QA_ENDPOINT, FileQaConfig};
pub use refine::FileRefineConfig;
pub use sparql::{
    DEFAULT_COUNTRIES_QUERY, DEFAULT_SPARQL_ENDPOINT, DEFAULT_SUBDIVISIONS_QUERY,
    FileSparqlConfig, SPARQL_ENDPOINT_ENV,
};

use refiner_domain::{AttributeCatalog, ConfigIssue};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Step session settings
    pub refine: FileRefineConfig,
    /// Date bounds and era table
    pub dates: FileDatesConfig,
    /// Phonetic reader and bucket size
    pub phonetic: FilePhoneticConfig,
    /// Knowledge-graph endpoint and queries
    pub sparql: FileSparqlConfig,
    /// QA engine endpoint and batching
    pub qa: FileQaConfig,
    /// Per-category article datasets
    pub datasets: FileDatasetsConfig,
    /// Category → attribute → refiner kind table
    pub attributes: Vec<FileAttributeConfig>,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Attribute catalog, built-in when none is configured.
    pub fn catalog(&self) -> (AttributeCatalog, Vec<ConfigIssue>) {
        parse_catalog(&self.attributes)
    }

    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation; every section
    /// converter is run once and its issues collected.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        issues.extend(self.refine.to_settings().1);
        issues.extend(self.dates.parse_bounds().1);
        issues.extend(self.dates.parse_eras().1);
        issues.extend(self.phonetic.parse_reader().1);
        issues.extend(self.phonetic.parse_max_bucket().1);
        issues.extend(self.qa.to_params().1);
        issues.extend(self.datasets.parse_paths().1);
        issues.extend(self.catalog().1);

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refiner_domain::{Category, OutputFormat, RefinerKind};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[refine]
page_size = 12

[dates]
ce_max_year = 2100

[phonetic]
reader = "kana"
max_bucket = 20

[sparql]
endpoint = "http://kg.local/query"

[qa]
endpoint = "http://qa.local/predict"
batch_size = 16

[[attributes]]
category = "CITY"
name = "人口"
kind = "Number"

[[attributes]]
category = "CITY"
name = "所在地"
kind = "Geo"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.refine.page_size, 12);
        assert_eq!(config.dates.ce_max_year, 2100);
        assert_eq!(config.dates.bce_max_year, 4713);
        assert_eq!(config.phonetic.max_bucket, Some(20));
        assert_eq!(config.sparql.endpoint.as_deref(), Some("http://kg.local/query"));
        assert_eq!(config.qa.batch_size, 16);
        assert_eq!(config.qa.top_n, 1);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);

        let (catalog, issues) = config.catalog();
        assert!(issues.is_empty());
        assert_eq!(catalog.attributes(Category::City), vec!["人口", "所在地"]);
        assert_eq!(catalog.kind(Category::City, "所在地"), Some(RefinerKind::Geo));
        assert!(catalog.attributes(Category::Person).is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: FileConfig = toml::from_str("[refine]\nomit_unsupported = true\n").unwrap();
        assert!(config.refine.omit_unsupported);
        assert_eq!(config.refine.page_size, 30);
        assert!(config.attributes.is_empty());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_collects_issues() {
        let toml_str = r#"
[refine]
page_size = 0

[phonetic]
reader = "romaji"

[[attributes]]
category = "PLANET"
name = "公転周期"
kind = "Number"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues.iter().all(|i| !i.is_error()));
    }
}
