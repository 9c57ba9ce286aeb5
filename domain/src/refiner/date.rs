//! Date refiner entry point: asks for a range or a single date, then
//! delegates.

use super::date_point::{DATE_TITLE, DatePointRefiner};
use super::date_range::DateRangeRefiner;
use super::state::{Refine, RefineError, RefinerState, Step};
use crate::candidate::{Candidate, CandidateSet};
use crate::date::{DateBounds, DateParser};
use std::sync::Arc;

pub const RANGE_LABEL: &str = "範囲";
pub const POINT_LABEL: &str = "日付指定";

#[derive(Debug, Clone)]
enum Mode {
    Unstarted,
    Choosing,
    Point(DatePointRefiner),
    Range(DateRangeRefiner),
}

#[derive(Debug, Clone)]
pub struct DateRefiner {
    attribute: String,
    parser: Arc<DateParser>,
    bounds: DateBounds,
    mode: Mode,
    failed: bool,
}

impl DateRefiner {
    pub fn new(attribute: impl Into<String>, parser: Arc<DateParser>, bounds: DateBounds) -> Self {
        Self {
            attribute: attribute.into(),
            parser,
            bounds,
            mode: Mode::Unstarted,
            failed: false,
        }
    }

    fn transition(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        match &mut self.mode {
            Mode::Point(inner) => return inner.refine(choice),
            Mode::Range(inner) => return inner.refine(choice),
            Mode::Unstarted | Mode::Choosing => {}
        }
        let choosing = matches!(self.mode, Mode::Choosing);
        match (choosing, choice) {
            (false, None) => {
                let set = CandidateSet::from_labels(
                    format!("{}/方法の選択", DATE_TITLE),
                    [RANGE_LABEL, POINT_LABEL],
                )?
                .issued_by(&self.attribute);
                self.mode = Mode::Choosing;
                Ok(Step::Continue(set))
            }
            (false, Some(c)) => Err(RefineError::UnexpectedChoice(c.key().to_string())),
            (true, None) => Err(RefineError::MissingChoice),
            (true, Some(c)) => {
                let mode = match c.reference() {
                    RANGE_LABEL => Mode::Range(DateRangeRefiner::new(
                        self.attribute.clone(),
                        Arc::clone(&self.parser),
                        self.bounds,
                    )),
                    POINT_LABEL => Mode::Point(DatePointRefiner::new(
                        self.attribute.clone(),
                        Arc::clone(&self.parser),
                        self.bounds,
                    )),
                    _ => return Err(RefineError::UnexpectedChoice(c.key().to_string())),
                };
                self.mode = mode;
                self.transition(None)
            }
        }
    }
}

impl Refine for DateRefiner {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        let result = self.transition(choice);
        if result.as_ref().is_err_and(RefineError::is_fatal) {
            self.failed = true;
        }
        result
    }

    fn state(&self) -> RefinerState {
        if self.failed {
            return RefinerState::Error;
        }
        match &self.mode {
            Mode::Point(inner) => inner.state(),
            Mode::Range(inner) => inner.state(),
            Mode::Unstarted | Mode::Choosing => RefinerState::Continue,
        }
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }
}
