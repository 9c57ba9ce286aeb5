//! Query - the finalized artifact of a refinement.
//!
//! A query pairs a predicate over QA answer text with a question renderer.
//! Conditions form a closed set so a finished query stays inspectable.

use crate::date::{DateExpr, DateParser, DateRange};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Advisory execution priority; ordering across attributes is left to the
/// driver that runs the queries.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Priority {
    Highest,
    Higher,
    High,
    #[default]
    Middle,
    Low,
    Lower,
    Lowest,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Highest => "highest",
            Priority::Higher => "higher",
            Priority::High => "high",
            Priority::Middle => "middle",
            Priority::Low => "low",
            Priority::Lower => "lower",
            Priority::Lowest => "lowest",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "highest" => Ok(Priority::Highest),
            "higher" => Ok(Priority::Higher),
            "high" => Ok(Priority::High),
            "middle" => Ok(Priority::Middle),
            "low" => Ok(Priority::Low),
            "lower" => Ok(Priority::Lower),
            "lowest" => Ok(Priority::Lowest),
            _ => Err(format!("Invalid Priority: {}", s)),
        }
    }
}

/// How a date answer is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateMatcher {
    Point(DateExpr),
    Range(DateRange),
}

/// Predicate carried by a [`Query`].
#[derive(Debug, Clone)]
pub enum Condition {
    /// The answer must parse as a date accepted by the matcher.
    Date {
        matcher: DateMatcher,
        parser: Arc<DateParser>,
    },
    /// Every segment must occur verbatim in the answer.
    PlaceContains(Vec<String>),
}

impl Condition {
    pub fn matches(&self, answer: &str) -> bool {
        match self {
            Condition::Date { matcher, parser } => {
                let Some(date) = parser.parse(answer) else {
                    return false;
                };
                match matcher {
                    DateMatcher::Point(expr) => expr.matches(&date),
                    DateMatcher::Range(range) => range.contains(&date),
                }
            }
            Condition::PlaceContains(segments) => segments.iter().all(|s| answer.contains(s.as_str())),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Date {
                matcher: DateMatcher::Point(expr),
                ..
            } => write!(f, "{}", expr),
            Condition::Date {
                matcher: DateMatcher::Range(range),
                ..
            } => write!(f, "{}", range),
            Condition::PlaceContains(segments) => write!(f, "{}", segments.join(" / ")),
        }
    }
}

/// A finalized per-attribute check plus its question template.
#[derive(Debug, Clone)]
pub struct Query {
    attribute: String,
    condition: Condition,
    priority: Priority,
}

impl Query {
    pub fn new(attribute: impl Into<String>, condition: Condition) -> Self {
        Self {
            attribute: attribute.into(),
            condition,
            priority: Priority::default(),
        }
    }

    pub fn date_point(attribute: impl Into<String>, expr: DateExpr, parser: Arc<DateParser>) -> Self {
        Self::new(
            attribute,
            Condition::Date {
                matcher: DateMatcher::Point(expr),
                parser,
            },
        )
    }

    pub fn date_range(
        attribute: impl Into<String>,
        range: DateRange,
        parser: Arc<DateParser>,
    ) -> Self {
        Self::new(
            attribute,
            Condition::Date {
                matcher: DateMatcher::Range(range),
                parser,
            },
        )
    }

    pub fn place(attribute: impl Into<String>, segments: Vec<String>) -> Self {
        Self::new(attribute, Condition::PlaceContains(segments))
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn attribute(&self) -> &str {
        &self.attribute
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns `true` if the answer text satisfies this query.
    ///
    /// Unparseable answers never match.
    pub fn matches(&self, answer: &str) -> bool {
        self.condition.matches(answer)
    }

    /// Question posed to the QA engine about `target`.
    pub fn render(&self, target: &str) -> String {
        format!("{}の{}は?", target, self.attribute)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.attribute, self.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> Arc<DateParser> {
        Arc::new(DateParser::japanese().unwrap())
    }

    #[test]
    fn test_render_question() {
        let q = Query::date_point("誕生日", "*-9-1".parse().unwrap(), parser());
        assert_eq!(q.render("猫"), "猫の誕生日は?");
    }

    #[test]
    fn test_date_point_query() {
        let q = Query::date_point("誕生日", DateExpr::ymd(2020, 9, 1), parser());
        assert!(q.matches("2020-09-01"));
        assert!(!q.matches("2020-09-02"));
        assert!(!q.matches("不明"));
    }

    #[test]
    fn test_date_range_query() {
        let range = DateRange::new(DateExpr::ymd(2020, 1, 1), DateExpr::ymd(2020, 12, 31));
        let q = Query::date_range("設立年月日", range, parser());
        assert!(q.matches("2020-06-15"));
        assert!(!q.matches("2019-06-15"));
    }

    #[test]
    fn test_place_query() {
        let q = Query::place("出身地", vec!["東京都".to_string()]);
        assert!(q.matches("東京都出身"));
        assert!(!q.matches("大阪出身"));
        assert_eq!(q.to_string(), "出身地: 東京都");
    }

    #[test]
    fn test_priority_default_and_order() {
        let q = Query::place("出身地", vec![]).with_priority(Priority::High);
        assert_eq!(q.priority(), Priority::High);
        assert!(Priority::Highest < Priority::Middle);
        assert_eq!(Priority::default(), Priority::Middle);
        assert_eq!("lowest".parse::<Priority>().unwrap(), Priority::Lowest);
    }
}
