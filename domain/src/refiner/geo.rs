//! Geographic refiner: drills down country → subdivision → ... until `DONE`.

use super::places::PlaceDirectory;
use super::state::{Refine, RefineError, RefinerState, Step};
use crate::candidate::{Candidate, CandidateSet, DONE};
use crate::phonetic::{PhoneticBucketer, PhoneticReader};
use crate::query::Query;
use std::sync::Arc;

pub const PLACE_TITLE: &str = "場所の選択";

/// Position in the administrative hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoStage {
    #[default]
    Unstarted,
    AtCountry,
    /// Choosing below the `n`-th path segment
    AtSubdivision(usize),
    Resolved,
}

pub struct GeoRefiner {
    attribute: String,
    places: Arc<dyn PlaceDirectory>,
    reader: Arc<dyn PhoneticReader>,
    max_bucket: Option<usize>,
    stage: GeoStage,
    path: Vec<String>,
    failed: bool,
}

impl std::fmt::Debug for GeoRefiner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeoRefiner")
            .field("attribute", &self.attribute)
            .field("stage", &self.stage)
            .field("path", &self.path)
            .finish()
    }
}

impl GeoRefiner {
    pub fn new(
        attribute: impl Into<String>,
        places: Arc<dyn PlaceDirectory>,
        reader: Arc<dyn PhoneticReader>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            places,
            reader,
            max_bucket: None,
            stage: GeoStage::Unstarted,
            path: Vec::new(),
            failed: false,
        }
    }

    pub fn with_max_bucket(mut self, max_bucket: Option<usize>) -> Self {
        self.max_bucket = max_bucket;
        self
    }

    pub fn stage(&self) -> GeoStage {
        self.stage
    }

    /// Labels chosen so far, country first
    pub fn path(&self) -> &[String] {
        &self.path
    }

    fn bucketed<I>(&self, title: String, items: I) -> Result<CandidateSet, RefineError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let buckets = PhoneticBucketer::new(self.reader.as_ref())
            .with_max_bucket(self.max_bucket)
            .bucket(items);
        Ok(CandidateSet::phonetic(title, buckets)?.issued_by(&self.attribute))
    }

    fn transition(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        match (self.stage, choice) {
            (GeoStage::Resolved, _) => Err(RefineError::Finished),
            (GeoStage::Unstarted, None) => {
                let countries = self.places.countries()?;
                let set = self.bucketed(
                    format!("{}/国の選択", PLACE_TITLE),
                    countries.into_iter().map(|p| (p.subject, p.label)),
                )?;
                self.stage = GeoStage::AtCountry;
                Ok(Step::Continue(set))
            }
            (GeoStage::Unstarted, Some(c)) => {
                Err(RefineError::UnexpectedChoice(c.key().to_string()))
            }
            (_, None) => Err(RefineError::MissingChoice),
            (GeoStage::AtSubdivision(_), Some(c)) if c.is_token(DONE) => {
                let segments = match self.path.as_slice() {
                    [country] => vec![country.clone()],
                    [_, rest @ ..] => rest.to_vec(),
                    [] => return Err(RefineError::UnexpectedChoice(DONE.to_string())),
                };
                self.stage = GeoStage::Resolved;
                Ok(Step::Finish(Query::place(self.attribute.clone(), segments)))
            }
            (GeoStage::AtCountry | GeoStage::AtSubdivision(_), Some(c)) => {
                if c.is_token(DONE) {
                    return Err(RefineError::UnexpectedChoice(DONE.to_string()));
                }
                let subject = c.meta().subject.as_deref().unwrap_or(c.reference());
                let subdivisions = self.places.subdivisions(subject)?;
                let label = c.key().to_string();
                let title = format!(
                    "{}/{}",
                    PLACE_TITLE,
                    [self.path.as_slice(), std::slice::from_ref(&label)]
                        .concat()
                        .join("/")
                );
                let items = subdivisions
                    .into_iter()
                    .map(|p| (p.subject, p.label))
                    .chain(std::iter::once((DONE.to_string(), DONE.to_string())));
                let set = self.bucketed(title, items)?;
                self.path.push(label);
                self.stage = GeoStage::AtSubdivision(self.path.len());
                Ok(Step::Continue(set))
            }
        }
    }
}

impl Refine for GeoRefiner {
    fn refine(&mut self, choice: Option<&Candidate>) -> Result<Step, RefineError> {
        let result = self.transition(choice);
        if result.as_ref().is_err_and(RefineError::is_fatal) {
            self.failed = true;
        }
        result
    }

    fn state(&self) -> RefinerState {
        match (self.stage, self.failed) {
            (_, true) => RefinerState::Error,
            (GeoStage::Resolved, _) => RefinerState::Finish,
            _ => RefinerState::Continue,
        }
    }

    fn attribute(&self) -> &str {
        &self.attribute
    }
}
