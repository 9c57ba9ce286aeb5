//! Date configuration from TOML (`[dates]` section)

use refiner_domain::{ConfigIssue, ConfigIssueCode, DateBounds, EraName};
use serde::{Deserialize, Serialize};

/// One entry of the era table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEraConfig {
    pub name: String,
    /// Gregorian year of the era's first year
    pub first_year: i32,
}

/// Raw date configuration from TOML
///
/// # Example
///
/// ```toml
/// [dates]
/// ce_max_year = 2030
/// bce_max_year = 4713
///
/// [[dates.eras]]
/// name = "令和"
/// first_year = 2019
/// ```
///
/// Without `eras` the modern Japanese era table is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatesConfig {
    pub ce_max_year: u32,
    pub bce_max_year: u32,
    pub eras: Option<Vec<FileEraConfig>>,
}

impl Default for FileDatesConfig {
    fn default() -> Self {
        let bounds = DateBounds::default();
        Self {
            ce_max_year: bounds.ce_max_year,
            bce_max_year: bounds.bce_max_year,
            eras: None,
        }
    }
}

impl FileDatesConfig {
    /// Year bounds; a zero bound falls back to its default.
    pub fn parse_bounds(&self) -> (DateBounds, Vec<ConfigIssue>) {
        let defaults = DateBounds::default();
        let mut issues = Vec::new();
        let mut check = |field: &str, value: u32, default: u32| {
            if value == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::OutOfRange {
                        field: format!("dates.{}", field),
                        value: 0,
                    },
                    format!("dates.{}: must be at least 1, falling back to {}", field, default),
                ));
                default
            } else {
                value
            }
        };
        let bounds = DateBounds {
            ce_max_year: check("ce_max_year", self.ce_max_year, defaults.ce_max_year),
            bce_max_year: check("bce_max_year", self.bce_max_year, defaults.bce_max_year),
        };
        (bounds, issues)
    }

    /// Era table; blank or repeated names are dropped with a warning.
    pub fn parse_eras(&self) -> (Vec<EraName>, Vec<ConfigIssue>) {
        let Some(eras) = &self.eras else {
            return (EraName::japanese(), vec![]);
        };
        let mut issues = Vec::new();
        let mut table: Vec<EraName> = Vec::with_capacity(eras.len());
        for era in eras {
            let name = era.name.trim();
            let reason = if name.is_empty() {
                Some("era name is empty".to_string())
            } else if table.iter().any(|e| e.name == name) {
                Some(format!("era '{}' is listed twice", name))
            } else {
                None
            };
            match reason {
                Some(reason) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidEraTable {
                        reason: reason.clone(),
                    },
                    format!("dates.eras: {}, entry ignored", reason),
                )),
                None => table.push(EraName::new(name, era.first_year)),
            }
        }
        (table, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_uses_japanese_eras() {
        let (eras, issues) = FileDatesConfig::default().parse_eras();
        assert!(issues.is_empty());
        assert_eq!(eras, EraName::japanese());
    }

    #[test]
    fn test_custom_eras_validated() {
        let config: FileDatesConfig = toml::from_str(
            r#"
eras = [
    { name = "令和", first_year = 2019 },
    { name = " ", first_year = 1 },
    { name = "令和", first_year = 2020 },
]
"#,
        )
        .unwrap();
        let (eras, issues) = config.parse_eras();
        assert_eq!(eras, vec![EraName::new("令和", 2019)]);
        assert_eq!(issues.len(), 2);
    }

    #[test]
    fn test_zero_bound_falls_back() {
        let config = FileDatesConfig {
            ce_max_year: 0,
            bce_max_year: 100,
            eras: None,
        };
        let (bounds, issues) = config.parse_bounds();
        assert_eq!(bounds.ce_max_year, 2030);
        assert_eq!(bounds.bce_max_year, 100);
        assert_eq!(issues.len(), 1);
    }
}
