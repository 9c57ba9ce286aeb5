//! Dataset configuration from TOML (`[datasets]` section)

use refiner_domain::{Category, ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Raw dataset configuration from TOML
///
/// # Example
///
/// ```toml
/// [datasets]
/// data_dir = "/srv/qa/data"
///
/// [datasets.paths]
/// PERSON = "work/squad_Person.json"     # relative to data_dir
/// CITY = "/abs/path/squad_City.json"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDatasetsConfig {
    pub data_dir: String,
    /// Category name → SQuAD-format JSON file
    pub paths: BTreeMap<String, String>,
}

impl Default for FileDatasetsConfig {
    fn default() -> Self {
        let paths = [
            (Category::Airport, "Airport"),
            (Category::City, "City"),
            (Category::Company, "Company"),
            (Category::Compound, "Compound"),
            (Category::Person, "Person"),
        ]
        .into_iter()
        .map(|(category, file)| {
            (
                category.name().to_string(),
                format!("work/train-multipleanswer/squad_{}.json", file),
            )
        })
        .collect();
        Self {
            data_dir: "data".to_string(),
            paths,
        }
    }
}

impl FileDatasetsConfig {
    /// Resolved path per category; unknown category names are skipped.
    pub fn parse_paths(&self) -> (BTreeMap<Category, PathBuf>, Vec<ConfigIssue>) {
        let mut issues = Vec::new();
        let mut paths = BTreeMap::new();
        let base = PathBuf::from(&self.data_dir);
        for (name, path) in &self.paths {
            match name.parse::<Category>() {
                Ok(category) => {
                    paths.insert(category, base.join(path));
                }
                Err(_) => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::UnknownCategory { name: name.clone() },
                    format!("datasets.paths: unknown category '{}', entry ignored", name),
                )),
            }
        }
        (paths, issues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths_cover_all_categories() {
        let (paths, issues) = FileDatasetsConfig::default().parse_paths();
        assert!(issues.is_empty());
        assert_eq!(paths.len(), 5);
        assert_eq!(
            paths[&Category::Person],
            PathBuf::from("data/work/train-multipleanswer/squad_Person.json")
        );
    }

    #[test]
    fn test_absolute_path_and_unknown_category() {
        let config: FileDatasetsConfig = toml::from_str(
            r#"
data_dir = "/srv"
[paths]
CITY = "/abs/city.json"
ANIMAL = "animal.json"
"#,
        )
        .unwrap();
        let (paths, issues) = config.parse_paths();
        assert_eq!(paths[&Category::City], PathBuf::from("/abs/city.json"));
        assert_eq!(paths.len(), 1);
        assert_eq!(
            issues[0].code,
            ConfigIssueCode::UnknownCategory {
                name: "ANIMAL".to_string()
            }
        );
    }
}
