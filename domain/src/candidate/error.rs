//! Candidate set errors

use thiserror::Error;

/// Errors raised while building or selecting from a [`CandidateSet`](super::CandidateSet).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CandidateError {
    /// The choice was not among the options last offered. Recoverable:
    /// re-prompt with the same set.
    #[error("'{0}' is not among the offered options")]
    InvalidChoice(String),

    /// Two candidates share a display label. Signals malformed upstream data.
    #[error("Duplicate candidate key: {0}")]
    DuplicateCandidateKey(String),

    /// A set was built with nothing to choose from.
    #[error("Candidate set '{0}' has no candidates")]
    Empty(String),
}

impl CandidateError {
    /// Check if the caller can simply re-prompt
    pub fn is_recoverable(&self) -> bool {
        matches!(self, CandidateError::InvalidChoice(_))
    }
}
