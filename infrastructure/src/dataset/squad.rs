//! SQuAD-format article source
//!
//! Each category maps to one JSON file shaped like
//! `{"data": [{"title": .., "WikipediaID": .., "paragraphs": [{"context": ..}]}]}`.
//! Question/answer annotations in the file are ignored.

use refiner_application::{Article, ArticleSource, DatasetError};
use refiner_domain::Category;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize)]
struct SquadFile {
    data: Vec<SquadArticle>,
}

#[derive(Debug, Deserialize)]
struct SquadArticle {
    title: String,
    #[serde(rename = "WikipediaID")]
    wikipedia_id: SquadId,
    #[serde(default)]
    paragraphs: Vec<SquadParagraph>,
}

/// IDs appear both as strings and as numbers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SquadId {
    Text(String),
    Number(u64),
}

impl SquadId {
    fn into_string(self) -> String {
        match self {
            SquadId::Text(s) => s,
            SquadId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SquadParagraph {
    context: String,
}

/// Reads articles from per-category SQuAD JSON files
#[derive(Debug, Clone, Default)]
pub struct SquadArticleSource {
    paths: BTreeMap<Category, PathBuf>,
}

impl SquadArticleSource {
    pub fn new(paths: BTreeMap<Category, PathBuf>) -> Self {
        Self { paths }
    }

    pub fn with_path(mut self, category: Category, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(category, path.into());
        self
    }

    fn load(path: &Path) -> Result<Vec<Article>, DatasetError> {
        let display = path.display().to_string();
        let text = std::fs::read_to_string(path).map_err(|e| DatasetError::Read {
            path: display.clone(),
            reason: e.to_string(),
        })?;
        let file: SquadFile = serde_json::from_str(&text).map_err(|e| DatasetError::Parse {
            path: display,
            reason: e.to_string(),
        })?;
        Ok(file
            .data
            .into_iter()
            .map(|a| {
                Article::new(
                    a.wikipedia_id.into_string(),
                    a.title,
                    a.paragraphs.into_iter().map(|p| p.context).collect(),
                )
            })
            .collect())
    }
}

impl ArticleSource for SquadArticleSource {
    fn articles(&self, category: Category) -> Result<Vec<Article>, DatasetError> {
        let path = self
            .paths
            .get(&category)
            .ok_or(DatasetError::NotConfigured(category))?;
        let articles = Self::load(path)?;
        debug!("Loaded {} articles from {}", articles.len(), path.display());
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_articles() {
        let file = write(
            r#"{"version": "1.1", "data": [
              {"title": "夏目漱石", "WikipediaID": "1234",
               "paragraphs": [{"context": "夏目漱石は1867年2月9日生まれ。", "qas": []},
                              {"context": "東京出身。"}]},
              {"title": "森鴎外", "WikipediaID": 5678, "paragraphs": []}
            ]}"#,
        );
        let source = SquadArticleSource::default().with_path(Category::Person, file.path());
        let articles = source.articles(Category::Person).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].id, "1234");
        assert_eq!(articles[0].paragraphs.len(), 2);
        assert_eq!(articles[1].id, "5678");
        assert!(articles[1].paragraphs.is_empty());
    }

    #[test]
    fn test_missing_category() {
        let source = SquadArticleSource::default();
        assert!(matches!(
            source.articles(Category::City),
            Err(DatasetError::NotConfigured(Category::City))
        ));
    }

    #[test]
    fn test_unreadable_and_unparsable() {
        let source =
            SquadArticleSource::default().with_path(Category::City, "/nonexistent/squad.json");
        assert!(matches!(
            source.articles(Category::City),
            Err(DatasetError::Read { .. })
        ));

        let file = write("{\"data\": 3}");
        let source = SquadArticleSource::default().with_path(Category::City, file.path());
        assert!(matches!(
            source.articles(Category::City),
            Err(DatasetError::Parse { .. })
        ));
    }
}
