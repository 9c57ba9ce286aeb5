//! Bounded-precision date range matching.
//!
//! Either bound may leave any field as a wildcard. A field is *jointly
//! constrained* when both bounds fix it. Matching evaluates the chain of the
//! coarsest jointly constrained field (year, else month, else day); inside a
//! chain, finer fields that are not jointly constrained pass through. A day
//! fixed by both bounds under an open month still bounds the first and last
//! year. Every bound is inclusive.

use super::expr::DateExpr;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison of one date field against both bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Flags {
    /// strictly between the bounds
    inside: bool,
    eq_start: bool,
    eq_end: bool,
    ge_start: bool,
    le_end: bool,
}

impl Flags {
    const PASS: Flags = Flags {
        inside: true,
        eq_start: true,
        eq_end: true,
        ge_start: true,
        le_end: true,
    };

    fn compare<T: Ord + Copy>(start: Option<T>, end: Option<T>, item: T) -> Option<Flags> {
        let (s, e) = (start?, end?);
        Some(Flags {
            inside: s < item && item < e,
            eq_start: s == item,
            eq_end: e == item,
            ge_start: s <= item,
            le_end: item <= e,
        })
    }
}

/// Inclusive range between two resolved date expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: DateExpr,
    pub end: DateExpr,
}

impl DateRange {
    pub fn new(start: DateExpr, end: DateExpr) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        let year = Flags::compare(
            self.start.astronomical_year(),
            self.end.astronomical_year(),
            date.year(),
        );
        let month = Flags::compare(
            self.start.month.value(),
            self.end.month.value(),
            date.month(),
        );
        let day = Flags::compare(self.start.day.value(), self.end.day.value(), date.day());

        match (year, month, day) {
            (Some(y), Some(m), d) => year_chain(y, m, d.unwrap_or(Flags::PASS)),
            (Some(y), None, d) => year_day_chain(y, d.unwrap_or(Flags::PASS)),
            (None, Some(m), d) => month_chain(m, d.unwrap_or(Flags::PASS)),
            (None, None, Some(d)) => d.ge_start && d.le_end,
            (None, None, None) => true,
        }
    }
}

fn month_chain(m: Flags, d: Flags) -> bool {
    m.inside
        || (m.eq_start && m.le_end && d.ge_start)
        || (m.eq_start && m.eq_end && d.inside)
        || (m.ge_start && m.eq_end && d.le_end)
}

/// Year chain with the month left open by either bound.
fn year_day_chain(y: Flags, d: Flags) -> bool {
    y.ge_start && y.le_end && (!y.eq_start || d.ge_start) && (!y.eq_end || d.le_end)
}

fn year_chain(y: Flags, m: Flags, d: Flags) -> bool {
    y.inside
        || (y.eq_start
            && y.le_end
            && (m.ge_start || (m.eq_start && m.eq_end && d.inside) || (m.eq_start && m.le_end && d.ge_start)))
        || (y.ge_start
            && y.eq_end
            && (m.le_end || (m.eq_start && m.eq_end && d.inside) || (m.ge_start && m.eq_end && d.le_end)))
        || (y.eq_start && y.eq_end && month_chain(m, d))
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} 〜 {}", self.start, self.end)
    }
}
