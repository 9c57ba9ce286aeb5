//! QA engine port
//!
//! Defines the interface for the extractive question-answering engine that
//! produces the answers validated by finished queries.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One scored answer span returned by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAnswer {
    pub text: String,
    #[serde(default)]
    pub score: f64,
}

impl RankedAnswer {
    pub fn new(text: impl Into<String>, score: f64) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

/// Errors that can occur while calling the QA engine
#[derive(Error, Debug)]
pub enum QaError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Batch question answering.
///
/// Implementations (adapters) live in the infrastructure layer.
pub trait QaEngine: Send + Sync {
    /// Answers each `(context, question)` pair.
    ///
    /// Returns one ranked list (best first, at most `top_n` long) per pair,
    /// in input order. A list may be empty when nothing was found.
    fn predict_batch(
        &self,
        pairs: &[(String, String)],
        top_n: usize,
    ) -> Result<Vec<Vec<RankedAnswer>>, QaError>;
}
