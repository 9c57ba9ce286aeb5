//! Single date refiner: era, year, month and day chosen in turn.
//!
//! Runs on its own (producing a point query) or chained under a range
//! refiner, where it only resolves a [`DateExpr`] and may be floored by a
//! lower bound.

use super::state::{Refine, RefineError, RefinerState, Step};
use crate::candidate::{Candidate, CandidateSet, SKIP};
use crate::date::{DateBounds, DateExpr, DateField, DateParser, Era};
use crate::query::Query;
use std::sync::Arc;

/// Title shared by every date step
pub const DATE_TITLE: &str = "日付の選択";

pub const BCE_LABEL: &str = "紀元前（BCE）";
pub const CE_LABEL: &str = "紀元後（CE）";

const ERA_STEP: &str = "紀元前・後の選択";
const YEAR_STEP: &str = "年の選択";
const MONTH_STEP: &str = "月の選択";
const DAY_STEP: &str = "日にちの選択";

/// Where the point refiner is in its walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePointState {
    /// Nothing offered yet
    #[default]
    Idle,
    AwaitingEra,
    AwaitingYear,
    AwaitingMonth,
    AwaitingDay,
    Resolved(DateExpr),
}

/// Outcome of one chained step.
#[derive(Debug, Clone)]
pub enum PointStep {
    Continue(CandidateSet),
    Resolved(DateExpr),
}

#[derive(Debug, Clone)]
pub struct DatePointRefiner {
    attribute: String,
    parser: Arc<DateParser>,
    bounds: DateBounds,
    lower: Option<DateExpr>,
    state: DatePointState,
    era: Era,
    year: DateField,
    month: DateField,
    failed: bool,
}

impl DatePointRefiner {
    pub fn new(attribute: impl Into<String>, parser: Arc<DateParser>, bounds: DateBounds) -> Self {
        Self {
            attribute: attribute.into(),
            parser,
            bounds,
            lower: None,
            state: DatePointState::Idle,
            era: Era::Ce,
            year: DateField::Any,
            month: DateField::Any,
            failed: false,
        }
    }

    /// Floors the offered values by `lower` (the start of a range).
    pub fn with_lower_bound(mut self, lower: DateExpr) -> Self {
        self.lower = Some(lower);
        self
    }

    pub fn point_state(&self) -> DatePointState {
        self.state
    }

    /// Advances the walk by one choice without building a query.
    pub fn advance(&mut self, choice: Option<&Candidate>) -> Result<PointStep, RefineError> {
        let result = self.transition(choice);
        if result.as_ref().is_err_and(RefineError::is_fatal) {
            self.failed = true;
        }
        result
    }

    fn transition(&mut self, choice: Option<&Candidate>) -> Result<PointStep, RefineError> {
        match (self.state, choice) {
            (DatePointState::Resolved(_), _) => Err(RefineError::Finished),
            (DatePointState::Idle, None) => self.start(),
            (DatePointState::Idle, Some(c)) => Err(RefineError::UnexpectedChoice(c.key().to_string())),
            (_, None) => Err(RefineError::MissingChoice),
            (DatePointState::AwaitingEra, Some(c)) => self.on_era(c),
            (DatePointState::AwaitingYear, Some(c)) => match DateField::parse(c.reference()) {
                Some(year @ DateField::Exact(_)) => self.ask_month(self.era, year),
                _ => Err(RefineError::UnexpectedChoice(c.key().to_string())),
            },
            (DatePointState::AwaitingMonth, Some(c)) => {
                let month = field(c)?;
                self.ask_day(month)
            }
            (DatePointState::AwaitingDay, Some(c)) => {
                let day = field(c)?;
                let expr = DateExpr::new(self.era, self.year, self.month, day);
                self.state = DatePointState::Resolved(expr);
                Ok(PointStep::Resolved(expr))
            }
        }
    }

    fn start(&mut self) -> Result<PointStep, RefineError> {
        if !self.offers_era() {
            return self.ask_year(Era::Ce);
        }
        let set = CandidateSet::flat(
            step_title(ERA_STEP),
            vec![
                Candidate::with_reference(BCE_LABEL, "BCE"),
                Candidate::with_reference(CE_LABEL, "CE"),
                Candidate::skip(),
            ],
        )?
        .issued_by(&self.attribute);
        self.state = DatePointState::AwaitingEra;
        Ok(PointStep::Continue(set))
    }

    fn offers_era(&self) -> bool {
        match &self.lower {
            None => true,
            Some(lower) => lower.year.is_any() || lower.era == Era::Bce,
        }
    }

    fn on_era(&mut self, choice: &Candidate) -> Result<PointStep, RefineError> {
        if choice.is_token(SKIP) {
            return self.ask_month(Era::Ce, DateField::Any);
        }
        match choice.reference() {
            "BCE" => self.ask_year(Era::Bce),
            "CE" => self.ask_year(Era::Ce),
            _ => Err(RefineError::UnexpectedChoice(choice.key().to_string())),
        }
    }

    fn year_range(&self, era: Era) -> (u32, u32) {
        let lower = self
            .lower
            .as_ref()
            .and_then(|l| l.year.value().map(|y| (l.era, y)));
        match (era, lower) {
            (Era::Ce, Some((Era::Ce, y))) => (y, self.bounds.ce_max_year),
            (Era::Ce, _) => (1, self.bounds.ce_max_year),
            (Era::Bce, Some((Era::Bce, y))) => (1, y),
            (Era::Bce, _) => (1, self.bounds.bce_max_year),
        }
    }

    fn ask_year(&mut self, era: Era) -> Result<PointStep, RefineError> {
        let (start, end) = self.year_range(era);
        let set = CandidateSet::numeric(step_title(YEAR_STEP), start, end, false)?
            .issued_by(&self.attribute);
        self.era = era;
        self.state = DatePointState::AwaitingYear;
        Ok(PointStep::Continue(set))
    }

    /// The chosen year is the lower bound's year, or the lower bound leaves
    /// its year open.
    fn on_lower_year(&self, era: Era, year: DateField) -> bool {
        match &self.lower {
            None => false,
            Some(lower) => match lower.year {
                DateField::Any => true,
                DateField::Exact(_) => lower.era == era && lower.year == year,
            },
        }
    }

    fn ask_month(&mut self, era: Era, year: DateField) -> Result<PointStep, RefineError> {
        let floor = match &self.lower {
            Some(lower) if self.on_lower_year(era, year) => lower.month.value().unwrap_or(1),
            _ => 1,
        };
        let set = CandidateSet::numeric(step_title(MONTH_STEP), floor, 12, true)?
            .issued_by(&self.attribute);
        self.era = era;
        self.year = year;
        self.state = DatePointState::AwaitingMonth;
        Ok(PointStep::Continue(set))
    }

    fn ask_day(&mut self, month: DateField) -> Result<PointStep, RefineError> {
        let floor = match &self.lower {
            Some(lower)
                if self.on_lower_year(self.era, self.year)
                    && (lower.month.is_any() || lower.month == month) =>
            {
                lower.day.value().unwrap_or(1)
            }
            _ => 1,
        };
        let set = CandidateSet::numeric(step_title(DAY_STEP), floor, 31, true)?
            .issued_by(&self.attribute);
        self.month = month;
        self.state = DatePointState::AwaitingDay;
        Ok(PointStep::Continue(set))
    }
}

fn step_title(step: &str) -> String {
    format!("{}/{}", DATE_TITLE, step)
}

fn field(choice: &Candidate) -> Result<DateField, RefineError> {
    DateField::parse(choice.reference())
        .ok_or_else(|| RefineError::UnexpectedChoice(choice.key().to_string()))
}

impl Refine for DatePointRefiner {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        match self.advance(choice)? {
            PointStep::Continue(set) => Ok(Step::Continue(set)),
            PointStep::Resolved(expr) => Ok(Step::Finish(Query::date_point(
                self.attribute.clone(),
                expr,
                Arc::clone(&self.parser),
            ))),
        }
    }

    fn state(&self) -> RefinerState {
        if self.failed {
            RefinerState::Error
        } else if matches!(self.state, DatePointState::Resolved(_)) {
            RefinerState::Finish
        } else {
            RefinerState::Continue
        }
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::candidate::Selection;

    /// Large enough that no date step is partitioned or paged.
    pub(crate) const PAGE: usize = 5000;

    /// Offers the first page if nothing was offered yet, then selects `label`.
    pub(crate) fn pick(set: &mut CandidateSet, label: &str) -> Candidate {
        if set.offered().is_empty() {
            set.paginate(PAGE);
        }
        match set.select(PAGE, label).unwrap() {
            Selection::Chosen(c) => c,
            other => panic!("{} did not resolve: {:?}", label, other),
        }
    }

    fn refiner() -> DatePointRefiner {
        DatePointRefiner::new(
            "誕生日",
            Arc::new(DateParser::japanese().unwrap()),
            DateBounds::default(),
        )
    }

    fn expect_set(step: Result<PointStep, RefineError>) -> CandidateSet {
        match step.unwrap() {
            PointStep::Continue(set) => set,
            PointStep::Resolved(expr) => panic!("resolved early: {}", expr),
        }
    }

    /// Feeds labels one by one, returning the final query.
    fn walk(refiner: &mut DatePointRefiner, labels: &[&str]) -> Query {
        let mut step = refiner.refine(None).unwrap();
        for label in labels {
            let Step::Continue(mut set) = step else {
                panic!("finished before {}", label);
            };
            let choice = pick(&mut set, label);
            step = refiner.refine(Some(&choice)).unwrap();
        }
        match step {
            Step::Finish(query) => query,
            Step::Continue(set) => panic!("still asking: {}", set.title()),
        }
    }

    #[test]
    fn test_solo_exact_date() {
        let mut r = refiner();
        let query = walk(&mut r, &[CE_LABEL, "2020", "9", "1"]);
        assert!(query.matches("2020-09-01"));
        assert!(!query.matches("2020-09-02"));
        assert_eq!(query.attribute(), "誕生日");
        assert_eq!(r.state(), RefinerState::Finish);
        assert_eq!(r.refine(None).unwrap_err(), RefineError::Finished);
    }

    #[test]
    fn test_skip_era_leaves_year_open() {
        let mut r = refiner();
        let query = walk(&mut r, &[SKIP, "9", "1"]);
        assert!(query.matches("2020-09-01"));
        assert!(query.matches("2021-09-01"));
        assert!(!query.matches("2021-10-01"));
    }

    #[test]
    fn test_skip_month_and_day() {
        let mut r = refiner();
        let query = walk(&mut r, &[CE_LABEL, "1999", SKIP, SKIP]);
        assert!(query.matches("1999年12月31日"));
        assert!(!query.matches("2000年1月1日"));
    }

    #[test]
    fn test_step_titles() {
        let mut r = refiner();
        let mut set = expect_set(r.advance(None));
        assert_eq!(set.title(), "日付の選択/紀元前・後の選択");
        assert_eq!(set.issuer(), "誕生日");
        assert_eq!(set.paginate(PAGE), vec![BCE_LABEL, CE_LABEL, SKIP]);
        let ce = pick(&mut set, CE_LABEL);
        let set = expect_set(r.advance(Some(&ce)));
        assert_eq!(set.title(), "日付の選択/年の選択");
        assert_eq!(r.point_state(), DatePointState::AwaitingYear);
    }

    #[test]
    fn test_era_year_bounds() {
        let mut r = refiner();
        let mut set = expect_set(r.advance(None));
        let bce = pick(&mut set, BCE_LABEL);
        let years = expect_set(r.advance(Some(&bce)));
        assert_eq!(years.range_bounds(), Some((1, 4713)));

        let mut r = refiner();
        let mut set = expect_set(r.advance(None));
        let ce = pick(&mut set, CE_LABEL);
        let years = expect_set(r.advance(Some(&ce)));
        assert_eq!(years.range_bounds(), Some((1, 2030)));
    }

    #[test]
    fn test_ce_lower_bound_skips_era_and_floors() {
        let mut r = refiner().with_lower_bound("2018-4-10".parse().unwrap());
        let mut years = expect_set(r.advance(None));
        assert_eq!(years.range_bounds(), Some((2018, 2030)));

        let y = pick(&mut years, "2018");
        let mut months = expect_set(r.advance(Some(&y)));
        assert_eq!(months.range_bounds(), Some((4, 12)));

        let m = pick(&mut months, "4");
        let days = expect_set(r.advance(Some(&m)));
        assert_eq!(days.range_bounds(), Some((10, 31)));
    }

    #[test]
    fn test_floor_released_after_lower_year() {
        let mut r = refiner().with_lower_bound("2018-4-10".parse().unwrap());
        let mut years = expect_set(r.advance(None));
        let y = pick(&mut years, "2019");
        let mut months = expect_set(r.advance(Some(&y)));
        assert_eq!(months.range_bounds(), Some((1, 12)));
        let m = pick(&mut months, "4");
        let days = expect_set(r.advance(Some(&m)));
        assert_eq!(days.range_bounds(), Some((1, 31)));
    }

    #[test]
    fn test_bce_lower_bound_offers_era() {
        let lower: DateExpr = "BCE100-*-*".parse().unwrap();

        let mut r = refiner().with_lower_bound(lower);
        let mut eras = expect_set(r.advance(None));
        let bce = pick(&mut eras, BCE_LABEL);
        assert_eq!(expect_set(r.advance(Some(&bce))).range_bounds(), Some((1, 100)));

        let mut r = refiner().with_lower_bound(lower);
        let mut eras = expect_set(r.advance(None));
        let ce = pick(&mut eras, CE_LABEL);
        assert_eq!(expect_set(r.advance(Some(&ce))).range_bounds(), Some((1, 2030)));
    }

    #[test]
    fn test_open_lower_year_floors_month() {
        let mut r = refiner().with_lower_bound("*-6-*".parse().unwrap());
        let mut eras = expect_set(r.advance(None));
        let skip = pick(&mut eras, SKIP);
        let months = expect_set(r.advance(Some(&skip)));
        assert_eq!(months.range_bounds(), Some((6, 12)));
    }

    #[test]
    fn test_missing_and_unexpected_choices() {
        let mut r = refiner();
        assert_eq!(
            r.advance(Some(&Candidate::new("x"))).unwrap_err(),
            RefineError::UnexpectedChoice("x".to_string())
        );
        r.advance(None).unwrap();
        assert_eq!(r.advance(None).unwrap_err(), RefineError::MissingChoice);
        assert_eq!(
            r.advance(Some(&Candidate::new("火星暦"))).unwrap_err(),
            RefineError::UnexpectedChoice("火星暦".to_string())
        );
        // still waiting for the era
        assert_eq!(r.point_state(), DatePointState::AwaitingEra);
        assert_eq!(r.state(), RefinerState::Continue);
    }

    #[test]
    fn test_empty_year_range_is_an_error_state() {
        let mut r = refiner().with_lower_bound("2050-1-1".parse().unwrap());
        assert!(matches!(r.refine(None), Err(RefineError::Candidate(_))));
        assert_eq!(r.state(), RefinerState::Error);
    }
}
