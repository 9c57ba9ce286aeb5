//! Validate answers use case
//!
//! Asks the QA engine each finished query against the category's articles
//! and keeps only the articles whose answers satisfy every query.
//!
//! Queries run in priority order. Each one only looks at the articles that
//! survived the previous queries.

use crate::config::ValidationParams;
use crate::ports::article_source::{Article, ArticleSource, DatasetError};
use crate::ports::progress::{NoProgress, ValidationProgress};
use crate::ports::qa_engine::{QaEngine, QaError};
use refiner_domain::{Category, Query};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("No queries to validate")]
    NoQueries,

    #[error("QA engine returned {actual} answer lists for {expected} questions")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("QA engine error: {0}")]
    Qa(#[from] QaError),
}

/// Input for the ValidateAnswers use case
#[derive(Debug, Clone)]
pub struct ValidateAnswersInput {
    pub category: Category,
    /// Finished queries keyed by attribute, in the order they were refined
    pub queries: Vec<(String, Query)>,
    pub params: ValidationParams,
}

impl ValidateAnswersInput {
    pub fn new(category: Category, queries: Vec<(String, Query)>) -> Self {
        Self {
            category,
            queries,
            params: ValidationParams::default(),
        }
    }

    pub fn with_params(mut self, params: ValidationParams) -> Self {
        self.params = params;
        self
    }
}

/// A surviving article and the accepted answers per attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticleReport {
    pub id: String,
    pub title: String,
    pub answers: BTreeMap<String, Vec<String>>,
}

/// Articles that satisfied every query, in dataset order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub category: Category,
    pub articles: Vec<ArticleReport>,
}

impl ValidationReport {
    pub fn titles(&self) -> Vec<&str> {
        self.articles.iter().map(|a| a.title.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }
}

/// One question asked about one paragraph
struct Question<'a> {
    article: usize,
    context: &'a str,
    text: String,
}

/// Use case for filtering articles by QA answers
pub struct ValidateAnswersUseCase {
    qa: Arc<dyn QaEngine>,
    articles: Arc<dyn ArticleSource>,
}

impl ValidateAnswersUseCase {
    pub fn new(qa: Arc<dyn QaEngine>, articles: Arc<dyn ArticleSource>) -> Self {
        Self { qa, articles }
    }

    /// Execute the use case with default (no-op) progress
    pub fn execute(&self, input: ValidateAnswersInput) -> Result<ValidationReport, ValidationError> {
        self.execute_with_progress(input, &NoProgress)
    }

    /// Execute the use case with progress callbacks
    pub fn execute_with_progress(
        &self,
        input: ValidateAnswersInput,
        progress: &dyn ValidationProgress,
    ) -> Result<ValidationReport, ValidationError> {
        if input.queries.is_empty() {
            return Err(ValidationError::NoQueries);
        }

        let mut queries = input.queries;
        // Highest sorts first; stable, so equal priorities keep refinement order
        queries.sort_by_key(|(_, query)| query.priority());

        let articles = self.articles.articles(input.category)?;
        info!(
            "Validating {} queries against {} articles",
            queries.len(),
            articles.len()
        );

        let mut survivors: Vec<(&Article, BTreeMap<String, Vec<String>>)> =
            articles.iter().map(|a| (a, BTreeMap::new())).collect();

        for (attribute, query) in &queries {
            let answers = self.ask(attribute, query, &survivors, &input.params, progress)?;
            for (index, accepted) in answers {
                survivors[index]
                    .1
                    .entry(attribute.clone())
                    .or_default()
                    .extend(accepted);
            }
            survivors.retain(|(_, found)| found.contains_key(attribute));

            info!("{}: {} articles remain", attribute, survivors.len());
            progress.on_query_complete(attribute, survivors.len());
            if survivors.is_empty() {
                warn!("No article satisfies '{}'; stopping", query);
                break;
            }
        }

        Ok(ValidationReport {
            category: input.category,
            articles: survivors
                .into_iter()
                .map(|(article, answers)| ArticleReport {
                    id: article.id.clone(),
                    title: article.title.clone(),
                    answers,
                })
                .collect(),
        })
    }

    /// Runs one query over the survivors; returns accepted answers per
    /// survivor index.
    fn ask(
        &self,
        attribute: &str,
        query: &Query,
        survivors: &[(&Article, BTreeMap<String, Vec<String>>)],
        params: &ValidationParams,
        progress: &dyn ValidationProgress,
    ) -> Result<BTreeMap<usize, Vec<String>>, ValidationError> {
        let questions: Vec<Question<'_>> = survivors
            .iter()
            .enumerate()
            .flat_map(|(index, (article, _))| {
                let text = query.render(&article.title);
                article.paragraphs.iter().map(move |context| Question {
                    article: index,
                    context,
                    text: text.clone(),
                })
            })
            .collect();

        let batch_size = params.batch_size.max(1);
        progress.on_query_start(attribute, questions.len().div_ceil(batch_size));

        let mut accepted: BTreeMap<usize, Vec<String>> = BTreeMap::new();
        for batch in questions.chunks(batch_size) {
            let pairs: Vec<(String, String)> = batch
                .iter()
                .map(|q| (q.context.to_string(), q.text.clone()))
                .collect();
            let ranked = self.qa.predict_batch(&pairs, params.top_n)?;
            if ranked.len() != pairs.len() {
                return Err(ValidationError::LengthMismatch {
                    expected: pairs.len(),
                    actual: ranked.len(),
                });
            }

            for (question, answers) in batch.iter().zip(ranked) {
                let Some(best) = answers.into_iter().next() else {
                    continue;
                };
                if query.matches(&best.text) {
                    debug!("{}: accepted '{}'", question.text, best.text);
                    accepted.entry(question.article).or_default().push(best.text);
                }
            }
            progress.on_batch_complete(attribute);
        }
        Ok(accepted)
    }
}
