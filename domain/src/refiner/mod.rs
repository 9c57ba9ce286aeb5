//! Attribute refiners
//!
//! A refiner turns a sequence of candidate choices into a [`Query`] for one
//! attribute. Dispatch is a closed enum: each supported [`RefinerKind`]
//! (see [`crate::selector`]) maps to one variant.
//!
//! [`Query`]: crate::query::Query
//! [`RefinerKind`]: crate::selector::RefinerKind

pub mod date;
pub mod date_point;
pub mod date_range;
pub mod geo;
pub mod places;
pub mod state;

pub use date::DateRefiner;
pub use date_point::{DatePointRefiner, DatePointState, PointStep};
pub use date_range::DateRangeRefiner;
pub use geo::{GeoRefiner, GeoStage};
pub use places::{Place, PlaceDirectory, PlaceLookupError};
pub use state::{Refine, RefineError, RefinerState, Step};

use crate::candidate::Candidate;

/// A refiner for one attribute.
#[derive(Debug)]
pub enum Refiner {
    Date(DateRefiner),
    Geo(GeoRefiner),
}

impl Refine for Refiner {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        match self {
            Refiner::Date(r) => r.refine(choice),
            Refiner::Geo(r) => r.refine(choice),
        }
    }

    fn state(&self) -> RefinerState {
        match self {
            Refiner::Date(r) => r.state(),
            Refiner::Geo(r) => r.state(),
        }
    }

    fn attribute(&self) -> &str {
        match self {
            Refiner::Date(r) => r.attribute(),
            Refiner::Geo(r) => r.attribute(),
        }
    }
}
