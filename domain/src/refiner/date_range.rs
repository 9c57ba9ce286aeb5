//! Date range refiner: a start point, then an end point floored by it.

use super::date_point::{DatePointRefiner, PointStep};
use super::state::{Refine, RefineError, RefinerState, Step};
use crate::candidate::{Candidate, CandidateSet};
use crate::date::{DateBounds, DateExpr, DateParser, DateRange};
use crate::query::Query;
use std::sync::Arc;

const START_PREFIX: &str = "開始";
const END_PREFIX: &str = "終了";

#[derive(Debug, Clone)]
enum Phase {
    Start(DatePointRefiner),
    End {
        start: DateExpr,
        point: DatePointRefiner,
    },
    Resolved(DateRange),
}

#[derive(Debug, Clone)]
pub struct DateRangeRefiner {
    attribute: String,
    parser: Arc<DateParser>,
    bounds: DateBounds,
    phase: Phase,
    failed: bool,
}

impl DateRangeRefiner {
    pub fn new(attribute: impl Into<String>, parser: Arc<DateParser>, bounds: DateBounds) -> Self {
        let attribute = attribute.into();
        let start = DatePointRefiner::new(attribute.clone(), Arc::clone(&parser), bounds);
        Self {
            attribute,
            parser,
            bounds,
            phase: Phase::Start(start),
            failed: false,
        }
    }

    fn transition(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        match &mut self.phase {
            Phase::Resolved(_) => Err(RefineError::Finished),
            Phase::Start(point) => match point.advance(choice)? {
                PointStep::Continue(set) => Ok(Step::Continue(prefixed(START_PREFIX, set))),
                PointStep::Resolved(start) => {
                    let mut end = DatePointRefiner::new(
                        self.attribute.clone(),
                        Arc::clone(&self.parser),
                        self.bounds,
                    )
                    .with_lower_bound(start);
                    let PointStep::Continue(set) = end.advance(None)? else {
                        return Err(RefineError::MissingChoice);
                    };
                    self.phase = Phase::End { start, point: end };
                    Ok(Step::Continue(prefixed(END_PREFIX, set)))
                }
            },
            Phase::End { start, point } => match point.advance(choice)? {
                PointStep::Continue(set) => Ok(Step::Continue(prefixed(END_PREFIX, set))),
                PointStep::Resolved(end) => {
                    let range = DateRange::new(*start, end);
                    self.phase = Phase::Resolved(range);
                    Ok(Step::Finish(Query::date_range(
                        self.attribute.clone(),
                        range,
                        Arc::clone(&self.parser),
                    )))
                }
            },
        }
    }
}

fn prefixed(prefix: &str, mut set: CandidateSet) -> CandidateSet {
    set.prefix_title(prefix);
    set
}

impl Refine for DateRangeRefiner {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        let result = self.transition(choice);
        if result.as_ref().is_err_and(RefineError::is_fatal) {
            self.failed = true;
        }
        result
    }

    fn state(&self) -> RefinerState {
        match (&self.phase, self.failed) {
            (_, true) => RefinerState::Error,
            (Phase::Resolved(_), _) => RefinerState::Finish,
            _ => RefinerState::Continue,
        }
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::SKIP;
    use crate::refiner::date_point::tests::pick;
    use crate::refiner::date_point::CE_LABEL;

    fn refiner() -> DateRangeRefiner {
        DateRangeRefiner::new(
            "設立年月日",
            Arc::new(DateParser::japanese().unwrap()),
            DateBounds::default(),
        )
    }

    fn set_of(step: Step) -> CandidateSet {
        match step {
            Step::Continue(set) => set,
            Step::Finish(q) => panic!("finished early: {}", q),
        }
    }

    fn walk(r: &mut DateRangeRefiner, labels: &[&str]) -> Query {
        let mut step = r.refine(None).unwrap();
        for label in labels {
            let mut set = set_of(step);
            let choice = pick(&mut set, label);
            step = r.refine(Some(&choice)).unwrap();
        }
        match step {
            Step::Finish(q) => q,
            Step::Continue(set) => panic!("still asking: {}", set.title()),
        }
    }

    #[test]
    fn test_range_within_year() {
        let mut r = refiner();
        let query = walk(
            &mut r,
            &[CE_LABEL, "2020", "1", "1", "2020", "12", "31"],
        );
        assert!(query.matches("2020-06-15"));
        assert!(!query.matches("2019-06-15"));
        assert_eq!(r.state(), RefinerState::Finish);
        assert_eq!(query.to_string(), "設立年月日: 2020-1-1 〜 2020-12-31");
    }

    #[test]
    fn test_titles_are_prefixed() {
        let mut r = refiner();
        let mut eras = set_of(r.refine(None).unwrap());
        assert_eq!(eras.title(), "開始日付の選択/紀元前・後の選択");
        let ce = pick(&mut eras, CE_LABEL);
        let mut years = set_of(r.refine(Some(&ce)).unwrap());
        let y = pick(&mut years, "2000");
        let mut months = set_of(r.refine(Some(&y)).unwrap());
        let m = pick(&mut months, SKIP);
        let mut days = set_of(r.refine(Some(&m)).unwrap());
        let d = pick(&mut days, SKIP);
        // start 2000-*-* has a CE year, so the end skips the era step
        let end_years = set_of(r.refine(Some(&d)).unwrap());
        assert_eq!(end_years.title(), "終了日付の選択/年の選択");
        assert_eq!(end_years.range_bounds(), Some((2000, 2030)));
    }

    #[test]
    fn test_open_start_year_offers_era_for_end() {
        // start *-4-1, end *-6-30
        let mut r = refiner();
        let query = walk(&mut r, &[SKIP, "4", "1", SKIP, "6", "30"]);
        assert!(query.matches("1990-05-05"));
        assert!(!query.matches("1990-07-01"));
    }

    #[test]
    fn test_finished_refiner_rejects_more_choices() {
        let mut r = refiner();
        walk(&mut r, &[CE_LABEL, "2020", "1", "1", "2020", "12", "31"]);
        assert_eq!(r.refine(None).unwrap_err(), RefineError::Finished);
        assert_eq!(r.state(), RefinerState::Finish);
    }
}
