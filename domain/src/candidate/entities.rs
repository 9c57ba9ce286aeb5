//! Candidate entity - one selectable item offered to the user.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved token: show the next page of the current set.
pub const NEXT: &str = "NEXT";
/// Reserved token: leave the current field unconstrained (wildcard `*`).
pub const SKIP: &str = "SKIP";
/// Reserved token: finish the current drill-down early.
pub const DONE: &str = "DONE";
/// Internal value carried by a skipped field.
pub const WILDCARD: &str = "*";

/// Typed metadata attached to a candidate by the set that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateMeta {
    /// Phonetic reading of the label (katakana)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reading: Option<String>,
    /// External subject identifier (e.g. a knowledge-graph IRI)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

/// A selectable item: a display label and the value the refiner consumes.
///
/// The two are usually identical; they diverge when the label is a human
/// readable name for an external identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    key: String,
    reference: String,
    #[serde(default)]
    meta: CandidateMeta,
}

impl Candidate {
    /// Creates a candidate whose reference equals its label.
    pub fn new(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            reference: key.clone(),
            key,
            meta: CandidateMeta::default(),
        }
    }

    /// Creates a candidate with an explicit reference value.
    ///
    /// An empty reference falls back to the label.
    pub fn with_reference(key: impl Into<String>, reference: impl Into<String>) -> Self {
        let key = key.into();
        let reference = reference.into();
        Self {
            reference: if reference.is_empty() {
                key.clone()
            } else {
                reference
            },
            key,
            meta: CandidateMeta::default(),
        }
    }

    /// The `SKIP` candidate, carrying the wildcard reference.
    pub fn skip() -> Self {
        Self::with_reference(SKIP, WILDCARD)
    }

    /// The `DONE` candidate.
    pub fn done() -> Self {
        Self::new(DONE)
    }

    pub fn with_reading(mut self, reading: impl Into<String>) -> Self {
        self.meta.reading = Some(reading.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.meta.subject = Some(subject.into());
        self
    }

    /// Display label
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Value handed back to the issuing refiner
    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn meta(&self) -> &CandidateMeta {
        &self.meta
    }

    /// Returns `true` if this candidate is the given reserved token.
    pub fn is_token(&self, token: &str) -> bool {
        self.key == token
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)
    }
}

impl From<&str> for Candidate {
    fn from(s: &str) -> Self {
        Candidate::new(s)
    }
}
