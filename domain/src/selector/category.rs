//! Categories and refiner kinds

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Article category; decides which attributes can be refined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    Company,
    Airport,
    Person,
    City,
    Compound,
}

impl Category {
    pub fn all() -> [Category; 5] {
        [
            Category::Company,
            Category::Airport,
            Category::Person,
            Category::City,
            Category::Compound,
        ]
    }

    /// Stable configuration name
    pub fn name(&self) -> &'static str {
        match self {
            Category::Company => "COMPANY",
            Category::Airport => "AIRPORT",
            Category::Person => "PERSON",
            Category::City => "CITY",
            Category::Compound => "COMPOUND",
        }
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Category::Company => "企業名",
            Category::Airport => "空港名",
            Category::Person => "人名",
            Category::City => "市区町村名",
            Category::Compound => "化合物名",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the display label or the configuration name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Category::all()
            .into_iter()
            .find(|c| c.label() == s || c.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Invalid category: {}", s))
    }
}

/// How an attribute is refined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefinerKind {
    Geo,
    Date,
    /// Free text; declared but not implemented
    Free,
    /// Numeric quantity; declared but not implemented
    Number,
    /// Data-specific value; declared but not implemented
    Data,
}

impl RefinerKind {
    pub fn is_supported(&self) -> bool {
        matches!(self, RefinerKind::Geo | RefinerKind::Date)
    }

    pub fn valid_values() -> &'static [&'static str] {
        &["Geo", "Date", "Free", "Number", "Data"]
    }
}

impl fmt::Display for RefinerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RefinerKind::Geo => "Geo",
            RefinerKind::Date => "Date",
            RefinerKind::Free => "Free",
            RefinerKind::Number => "Number",
            RefinerKind::Data => "Data",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for RefinerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "geo" => Ok(RefinerKind::Geo),
            "date" => Ok(RefinerKind::Date),
            "free" => Ok(RefinerKind::Free),
            "number" => Ok(RefinerKind::Number),
            "data" => Ok(RefinerKind::Data),
            _ => Err(format!("Invalid refiner kind: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_label_or_name() {
        assert_eq!("人名".parse::<Category>().unwrap(), Category::Person);
        assert_eq!("PERSON".parse::<Category>().unwrap(), Category::Person);
        assert_eq!("airport".parse::<Category>().unwrap(), Category::Airport);
        assert!("動物".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_name() {
        let json = serde_json::to_string(&Category::Compound).unwrap();
        assert_eq!(json, "\"COMPOUND\"");
    }

    #[test]
    fn test_refiner_kind() {
        assert_eq!("Geo".parse::<RefinerKind>().unwrap(), RefinerKind::Geo);
        assert_eq!("date".parse::<RefinerKind>().unwrap(), RefinerKind::Date);
        assert!("Lua".parse::<RefinerKind>().is_err());
        assert!(RefinerKind::Date.is_supported());
        assert!(!RefinerKind::Number.is_supported());
        assert_eq!(RefinerKind::Free.to_string(), "Free");
    }
}
