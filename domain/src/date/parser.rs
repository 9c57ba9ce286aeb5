//! Extracts a calendar date from free answer text.
//!
//! Recognized shapes, tried in order:
//!
//! 1. Japanese era names: `令和2年9月1日`, `平成元年1月8日`
//! 2. BCE dates: `紀元前100年3月15日`, `BCE 100-3-15`
//! 3. Numeric dates: `2020-09-01`, `2020/9/1`, `2020.9.1`, `2020年9月1日`
//! 4. English dates: `September 1, 2020`, `1 September 2020`
//!
//! Years are returned in astronomical numbering (1 BCE is year 0).

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Named era whose year 1 is `first_year` in the Gregorian calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraName {
    pub name: String,
    pub first_year: i32,
}

impl EraName {
    pub fn new(name: impl Into<String>, first_year: i32) -> Self {
        Self {
            name: name.into(),
            first_year,
        }
    }

    /// The modern Japanese eras.
    pub fn japanese() -> Vec<EraName> {
        vec![
            EraName::new("明治", 1868),
            EraName::new("大正", 1912),
            EraName::new("昭和", 1926),
            EraName::new("平成", 1989),
            EraName::new("令和", 2019),
        ]
    }
}

#[derive(Error, Debug)]
pub enum DateParserError {
    #[error("Invalid date pattern: {0}")]
    Pattern(#[from] regex::Error),
}

const YMD: &str = r"(\d{1,4})\s*(?:年|[-/.])\s*(\d{1,2})\s*(?:月|[-/.])\s*(\d{1,2})";

const ENGLISH_FORMATS: &[&str] = &["%B %d, %Y", "%b %d, %Y", "%d %B %Y", "%d %b %Y"];

/// Date extraction with a configurable era table.
#[derive(Debug, Clone)]
pub struct DateParser {
    eras: Vec<EraName>,
    era_pattern: Option<Regex>,
    bce_pattern: Regex,
    numeric_pattern: Regex,
}

impl DateParser {
    pub fn new(eras: Vec<EraName>) -> Result<Self, DateParserError> {
        let era_pattern = if eras.is_empty() {
            None
        } else {
            let names = eras
                .iter()
                .map(|e| regex::escape(&e.name))
                .collect::<Vec<_>>()
                .join("|");
            Some(Regex::new(&format!(
                r"({})\s*(元|\d{{1,4}})\s*年\s*(\d{{1,2}})\s*月\s*(\d{{1,2}})\s*日",
                names
            ))?)
        };
        Ok(Self {
            eras,
            era_pattern,
            bce_pattern: Regex::new(&format!(r"(?:紀元前|BCE|B\.C\.|BC)\s*{}", YMD))?,
            numeric_pattern: Regex::new(YMD)?,
        })
    }

    /// Parser with the built-in Japanese era table.
    pub fn japanese() -> Result<Self, DateParserError> {
        Self::new(EraName::japanese())
    }

    pub fn eras(&self) -> &[EraName] {
        &self.eras
    }

    /// Returns the first date found in `text`, or `None` when nothing
    /// date-like (or only impossible dates) is present.
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        self.parse_era(text)
            .or_else(|| self.parse_bce(text))
            .or_else(|| self.parse_numeric(text))
            .or_else(|| parse_english(text))
    }

    fn parse_era(&self, text: &str) -> Option<NaiveDate> {
        let caps = self.era_pattern.as_ref()?.captures(text)?;
        let era = self.eras.iter().find(|e| e.name == caps[1])?;
        let offset: i32 = match &caps[2] {
            "元" => 1,
            n => n.parse().ok()?,
        };
        let year = era.first_year + offset - 1;
        NaiveDate::from_ymd_opt(year, caps[3].parse().ok()?, caps[4].parse().ok()?)
    }

    fn parse_bce(&self, text: &str) -> Option<NaiveDate> {
        let caps = self.bce_pattern.captures(text)?;
        let year: i32 = caps[1].parse().ok()?;
        if year == 0 {
            return None;
        }
        NaiveDate::from_ymd_opt(1 - year, caps[2].parse().ok()?, caps[3].parse().ok()?)
    }

    fn parse_numeric(&self, text: &str) -> Option<NaiveDate> {
        self.numeric_pattern.captures_iter(text).find_map(|caps| {
            NaiveDate::from_ymd_opt(
                caps[1].parse().ok()?,
                caps[2].parse().ok()?,
                caps[3].parse().ok()?,
            )
        })
    }
}

fn parse_english(text: &str) -> Option<NaiveDate> {
    let text = text.trim().trim_end_matches('.');
    ENGLISH_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn parser() -> DateParser {
        DateParser::japanese().unwrap()
    }

    fn ymd(d: NaiveDate) -> (i32, u32, u32) {
        (d.year(), d.month(), d.day())
    }

    #[test]
    fn test_iso_and_slash() {
        let p = parser();
        assert_eq!(p.parse("2020-09-01").map(ymd), Some((2020, 9, 1)));
        assert_eq!(p.parse("2020/9/1").map(ymd), Some((2020, 9, 1)));
        assert_eq!(p.parse("1999.12.31").map(ymd), Some((1999, 12, 31)));
    }

    #[test]
    fn test_japanese_numeric_within_text() {
        let p = parser();
        assert_eq!(
            p.parse("1990年5月3日生まれ").map(ymd),
            Some((1990, 5, 3))
        );
    }

    #[test]
    fn test_era_names() {
        let p = parser();
        assert_eq!(p.parse("令和2年9月1日").map(ymd), Some((2020, 9, 1)));
        assert_eq!(p.parse("平成元年1月8日").map(ymd), Some((1989, 1, 8)));
        assert_eq!(p.parse("昭和64年1月7日").map(ymd), Some((1989, 1, 7)));
    }

    #[test]
    fn test_bce_is_astronomical() {
        let p = parser();
        assert_eq!(p.parse("紀元前44年3月15日").map(ymd), Some((-43, 3, 15)));
        assert_eq!(p.parse("BCE 1-1-1").map(ymd), Some((0, 1, 1)));
    }

    #[test]
    fn test_english() {
        let p = parser();
        assert_eq!(p.parse("September 1, 2020").map(ymd), Some((2020, 9, 1)));
        assert_eq!(p.parse("1 Sep 2020").map(ymd), Some((2020, 9, 1)));
    }

    #[test]
    fn test_unparseable() {
        let p = parser();
        assert_eq!(p.parse("東京都出身"), None);
        assert_eq!(p.parse("2020-13-45"), None);
        assert_eq!(p.parse(""), None);
    }

    #[test]
    fn test_custom_era_table() {
        let p = DateParser::new(vec![EraName::new("皇紀", -659)]).unwrap();
        assert_eq!(p.parse("皇紀2680年1月1日").map(ymd), Some((2020, 1, 1)));
        assert_eq!(p.eras().len(), 1);
    }
}
