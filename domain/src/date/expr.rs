//! Resolved date expressions with wildcard fields.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar era of a resolved year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Era {
    /// Before common era
    Bce,
    /// Common era
    #[default]
    Ce,
}

/// One field of a resolved date: a concrete number or the wildcard `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateField {
    Any,
    Exact(u32),
}

impl DateField {
    /// Parses a candidate reference: `*` or a positive number.
    pub fn parse(reference: &str) -> Option<Self> {
        match reference.trim() {
            "*" => Some(DateField::Any),
            s => s.parse().ok().map(DateField::Exact),
        }
    }

    pub fn value(self) -> Option<u32> {
        match self {
            DateField::Any => None,
            DateField::Exact(v) => Some(v),
        }
    }

    pub fn is_any(self) -> bool {
        matches!(self, DateField::Any)
    }

    fn accepts(self, actual: u32) -> bool {
        self.value().is_none_or(|v| v == actual)
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateField::Any => write!(f, "*"),
            DateField::Exact(v) => write!(f, "{}", v),
        }
    }
}

/// A fully resolved date selection, e.g. `2020-9-1`, `*-9-1`, `BCE100-*-*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateExpr {
    pub era: Era,
    pub year: DateField,
    pub month: DateField,
    pub day: DateField,
}

impl DateExpr {
    pub fn new(era: Era, year: DateField, month: DateField, day: DateField) -> Self {
        Self {
            era,
            year,
            month,
            day,
        }
    }

    /// Common-era date with every field fixed.
    pub fn ymd(year: u32, month: u32, day: u32) -> Self {
        Self::new(
            Era::Ce,
            DateField::Exact(year),
            DateField::Exact(month),
            DateField::Exact(day),
        )
    }

    /// Year in astronomical numbering: `1 BCE → 0`, `N BCE → -(N-1)`.
    pub fn astronomical_year(&self) -> Option<i32> {
        let year = i32::try_from(self.year.value()?).ok()?;
        Some(match self.era {
            Era::Ce => year,
            Era::Bce => 1 - year,
        })
    }

    /// Every fixed field equals the date's; wildcards accept anything.
    pub fn matches(&self, date: &NaiveDate) -> bool {
        let year_ok = match self.year {
            DateField::Any => true,
            DateField::Exact(_) => self.astronomical_year() == Some(date.year()),
        };
        year_ok && self.month.accepts(date.month()) && self.day.accepts(date.day())
    }
}

impl fmt::Display for DateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let era = match self.era {
            Era::Bce => "BCE",
            Era::Ce => "",
        };
        write!(f, "{}{}-{}-{}", era, self.year, self.month, self.day)
    }
}

impl std::str::FromStr for DateExpr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (era, body) = match s.trim().strip_prefix("BCE") {
            Some(rest) => (Era::Bce, rest),
            None => (Era::Ce, s.trim()),
        };
        let fields: Vec<_> = body.split('-').map(DateField::parse).collect();
        match fields.as_slice() {
            [Some(y), Some(m), Some(d)] => Ok(DateExpr::new(era, *y, *m, *d)),
            _ => Err(format!("Invalid date expression: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_exact_match() {
        let expr = DateExpr::ymd(2020, 9, 1);
        assert!(expr.matches(&date(2020, 9, 1)));
        assert!(!expr.matches(&date(2020, 9, 2)));
    }

    #[test]
    fn test_wildcard_year() {
        let expr: DateExpr = "*-9-1".parse().unwrap();
        assert!(expr.matches(&date(2020, 9, 1)));
        assert!(expr.matches(&date(2021, 9, 1)));
        assert!(!expr.matches(&date(2021, 10, 1)));
    }

    #[test]
    fn test_astronomical_year() {
        let one_bce: DateExpr = "BCE1-*-*".parse().unwrap();
        assert_eq!(one_bce.astronomical_year(), Some(0));
        let hundred_bce: DateExpr = "BCE100-*-*".parse().unwrap();
        assert_eq!(hundred_bce.astronomical_year(), Some(-99));
        assert!(hundred_bce.matches(&date(-99, 3, 15)));
    }

    #[test]
    fn test_display_round_trip() {
        for text in ["2020-9-1", "*-9-1", "BCE100-*-*", "*-*-*"] {
            let expr: DateExpr = text.parse().unwrap();
            assert_eq!(expr.to_string(), text);
        }
    }

    #[test]
    fn test_invalid_expression() {
        assert!("2020-9".parse::<DateExpr>().is_err());
        assert!("abc-1-1".parse::<DateExpr>().is_err());
    }
}
