//! Refiner protocol types shared by every attribute refiner.

use super::places::PlaceLookupError;
use crate::candidate::{Candidate, CandidateError, CandidateSet};
use crate::query::Query;
use thiserror::Error;

/// Lifecycle of a refiner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefinerState {
    /// More choices are needed
    #[default]
    Continue,
    /// A query has been produced
    Finish,
    /// An unrecoverable step error occurred
    Error,
}

/// Result of one refine step.
#[derive(Debug, Clone)]
pub enum Step {
    /// Offer this set and feed the chosen candidate back
    Continue(CandidateSet),
    /// Refinement is complete
    Finish(Query),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RefineError {
    #[error(transparent)]
    Candidate(#[from] CandidateError),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(#[from] PlaceLookupError),

    #[error("Unexpected choice '{0}' for the current step")]
    UnexpectedChoice(String),

    #[error("A choice is required to continue")]
    MissingChoice,

    #[error("Refinement already finished")]
    Finished,
}

impl RefineError {
    /// The caller may retry the same step without restarting the refiner.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RefineError::Candidate(e) => e.is_recoverable(),
            RefineError::SourceUnavailable(_) => true,
            RefineError::UnexpectedChoice(_) | RefineError::MissingChoice => true,
            RefineError::Finished => false,
        }
    }

    /// The refiner cannot make progress any more (malformed or empty sets).
    pub fn is_fatal(&self) -> bool {
        matches!(self, RefineError::Candidate(e) if !e.is_recoverable())
    }
}

/// An attribute refiner: a state machine that turns a sequence of choices
/// into a [`Query`].
///
/// The first call passes `None` and yields the initial set; each later call
/// passes the candidate chosen from the previously returned set.
pub trait Refine {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError>;

    fn state(&self) -> RefinerState;

    /// Attribute this refiner builds a query for
    fn attribute(&self) -> &str;
}
