//! Article source port
//!
//! Supplies the per-category article corpus the QA engine reads from.

use refiner_domain::Category;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An article: identifier, title and paragraph texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl Article {
    pub fn new(id: impl Into<String>, title: impl Into<String>, paragraphs: Vec<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            paragraphs,
        }
    }
}

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("No dataset configured for category {0}")]
    NotConfigured(Category),

    #[error("Failed to read dataset {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse dataset {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Loads the articles of a category.
pub trait ArticleSource: Send + Sync {
    fn articles(&self, category: Category) -> Result<Vec<Article>, DatasetError>;
}
