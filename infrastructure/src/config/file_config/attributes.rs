//! Attribute table from TOML (`[[attributes]]` array)

use refiner_domain::{AttributeCatalog, Category, ConfigIssue, ConfigIssueCode, RefinerKind};
use serde::{Deserialize, Serialize};

/// One configured attribute
///
/// # Example
///
/// ```toml
/// [[attributes]]
/// category = "PERSON"
/// name = "生年月日"
/// kind = "Date"          # Geo, Date, Free, Number, Data
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileAttributeConfig {
    pub category: String,
    pub name: String,
    pub kind: String,
}

/// Builds the catalog from the configured entries, in declaration order.
///
/// With no entries the built-in table is used. Entries naming an unknown
/// category or refiner kind are skipped with a warning.
pub fn parse_catalog(entries: &[FileAttributeConfig]) -> (AttributeCatalog, Vec<ConfigIssue>) {
    if entries.is_empty() {
        return (AttributeCatalog::builtin(), vec![]);
    }
    let mut catalog = AttributeCatalog::new();
    let mut issues = Vec::new();
    for entry in entries {
        let Ok(category) = entry.category.parse::<Category>() else {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::UnknownCategory {
                    name: entry.category.clone(),
                },
                format!(
                    "attributes: unknown category '{}' for '{}', entry ignored",
                    entry.category, entry.name
                ),
            ));
            continue;
        };
        let Ok(kind) = entry.kind.parse::<RefinerKind>() else {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::InvalidEnumValue {
                    field: format!("attributes.{}.kind", entry.name),
                    value: entry.kind.clone(),
                    valid_values: RefinerKind::valid_values()
                        .iter()
                        .map(|v| v.to_string())
                        .collect(),
                },
                format!(
                    "attributes: unknown kind '{}' for '{}', entry ignored",
                    entry.kind, entry.name
                ),
            ));
            continue;
        };
        catalog.insert(category, entry.name.trim(), kind);
    }
    (catalog, issues)
}
