//! Candidates and candidate sets.
//!
//! A refiner step issues a [`CandidateSet`]; the caller pages through it with
//! [`CandidateSet::paginate`] and resolves a choice with
//! [`CandidateSet::select`]. Three shapes exist:
//!
//! - flat: one level, paged with a `NEXT` continuation
//! - phonetic: bucket keys first, then the labels inside a bucket
//! - numeric range: sub-ranges first when wide, then individual values

pub mod entities;
pub mod error;
mod flat;
mod pager;
mod phonetic;
mod range;
pub mod set;

pub use entities::{Candidate, CandidateMeta, DONE, NEXT, SKIP, WILDCARD};
pub use error::CandidateError;
pub use set::{CandidateSet, Selection};
