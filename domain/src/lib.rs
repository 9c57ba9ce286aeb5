//! Domain layer for attr-refiner
//!
//! This crate contains the refinement engine: candidates and their paged
//! sets, phonetic bucketing, the date model, attribute refiners and the
//! queries they produce. It performs no I/O; external lookups go through
//! the [`refiner::PlaceDirectory`] and [`phonetic::PhoneticReader`] traits.
//!
//! # Core Concepts
//!
//! ## Refinement
//!
//! A free-text attribute ("生年月日", "出身地") is narrowed step by step:
//!
//! - a **Refiner** offers a [`CandidateSet`],
//! - the caller picks one label (or `NEXT` / `SKIP` / `DONE`),
//! - the refiner advances, until it yields a [`Query`].
//!
//! ## Query
//!
//! A query is a predicate over QA answer text plus a question template
//! (`"{target}の{attribute}は?"`), used later to validate answers.

pub mod candidate;
pub mod config;
pub mod date;
pub mod phonetic;
pub mod query;
pub mod refiner;
pub mod selector;

// Re-export commonly used types
pub use candidate::{
    Candidate, CandidateError, CandidateMeta, CandidateSet, DONE, NEXT, SKIP, Selection, WILDCARD,
};
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use date::{DateBounds, DateExpr, DateField, DateParser, DateParserError, DateRange, Era, EraName};
pub use phonetic::{KanaOnlyReader, PhoneticBucketer, PhoneticBuckets, PhoneticReader};
pub use query::{Condition, DateMatcher, Priority, Query};
pub use refiner::{
    DateRefiner, GeoRefiner, Place, PlaceDirectory, PlaceLookupError, Refine, RefineError,
    Refiner, RefinerState, Step,
};
pub use selector::{
    AttributeCatalog, CATEGORY_TITLE, Category, CategorySelector, RefinerContext, RefinerKind,
    SelectorError,
};
