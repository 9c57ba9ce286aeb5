//! Date model: resolved expressions, range matching and answer parsing.
//!
//! - [`expr::DateExpr`]: a resolved `year-month-day` with wildcard fields
//! - [`range::DateRange`]: bounded-precision range predicate
//! - [`parser::DateParser`]: era-aware extraction of a date from answer text

pub mod expr;
pub mod parser;
pub mod range;

pub use expr::{DateExpr, DateField, Era};
pub use parser::{DateParser, DateParserError, EraName};
pub use range::DateRange;

use serde::{Deserialize, Serialize};

/// Selectable year bounds per era.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateBounds {
    /// Latest selectable common-era year
    pub ce_max_year: u32,
    /// Earliest selectable year before the common era (counted backwards)
    pub bce_max_year: u32,
}

impl Default for DateBounds {
    fn default() -> Self {
        Self {
            ce_max_year: 2030,
            bce_max_year: 4713,
        }
    }
}
