//! Place directory port
//!
//! The geo refiner walks an administrative hierarchy it does not own. The
//! directory is a domain-level abstraction; the knowledge-graph adapter lives
//! in the infrastructure layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A place known to the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Place {
    /// Directory identifier (e.g. an IRI)
    pub subject: String,
    /// Human readable name
    pub label: String,
}

impl Place {
    pub fn new(subject: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            label: label.into(),
        }
    }
}

/// Lookup failures, distinct from an empty result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaceLookupError {
    #[error("Place directory unavailable: {0}")]
    Unavailable(String),

    #[error("Malformed place directory request or response: {0}")]
    Malformed(String),
}

/// Hierarchical place lookup.
pub trait PlaceDirectory: Send + Sync {
    /// Top-level places (countries)
    fn countries(&self) -> Result<Vec<Place>, PlaceLookupError>;

    /// Administrative subdivisions directly below `subject`.
    ///
    /// An empty list means the place has no known subdivisions.
    fn subdivisions(&self, subject: &str) -> Result<Vec<Place>, PlaceLookupError>;
}
