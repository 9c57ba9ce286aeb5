//! CandidateSet - the paginated, selectable collection issued by a refiner step.

use super::entities::Candidate;
use super::error::CandidateError;
use super::flat::FlatSet;
use super::phonetic::PhoneticSet;
use super::range::RangeSet;
use crate::phonetic::PhoneticBuckets;

/// Outcome of [`CandidateSet::select`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The choice resolved to a final candidate; hand it to the refiner.
    Chosen(Candidate),
    /// The set moved on (next page, next level, narrowed range); show these.
    Options(Vec<String>),
}

#[derive(Debug, Clone)]
enum SetKind {
    Flat(FlatSet),
    Phonetic(PhoneticSet),
    Range(RangeSet),
}

/// Options offered by a refiner step.
///
/// Keys are unique within a set. The set remembers the last page it offered;
/// only labels from that page (including reserved tokens on it) are accepted
/// by [`select`](Self::select).
#[derive(Debug, Clone)]
pub struct CandidateSet {
    title: String,
    issuer: String,
    kind: SetKind,
    offered: Vec<String>,
}

impl CandidateSet {
    /// Single-level set over the given candidates.
    ///
    /// # Errors
    /// [`CandidateError::DuplicateCandidateKey`] if two candidates share a label,
    /// [`CandidateError::Empty`] if there are none.
    pub fn flat(title: impl Into<String>, items: Vec<Candidate>) -> Result<Self, CandidateError> {
        let title = title.into();
        let kind = SetKind::Flat(FlatSet::new(&title, items)?);
        Ok(Self::with_kind(title, kind))
    }

    /// Single-level set over plain labels.
    pub fn from_labels<I, S>(title: impl Into<String>, labels: I) -> Result<Self, CandidateError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items = labels.into_iter().map(|l| Candidate::new(l)).collect();
        Self::flat(title, items)
    }

    /// Two-level set over phonetic buckets.
    pub fn phonetic(
        title: impl Into<String>,
        buckets: PhoneticBuckets,
    ) -> Result<Self, CandidateError> {
        let title = title.into();
        let kind = SetKind::Phonetic(PhoneticSet::new(&title, buckets)?);
        Ok(Self::with_kind(title, kind))
    }

    /// Inclusive numeric range; `skippable` adds the `SKIP` token.
    pub fn numeric(
        title: impl Into<String>,
        start: u32,
        end: u32,
        skippable: bool,
    ) -> Result<Self, CandidateError> {
        let title = title.into();
        let kind = SetKind::Range(RangeSet::new(&title, start, end, skippable)?);
        Ok(Self::with_kind(title, kind))
    }

    fn with_kind(title: String, kind: SetKind) -> Self {
        Self {
            title,
            issuer: String::new(),
            kind,
            offered: Vec::new(),
        }
    }

    /// Records the attribute whose refiner issued this set.
    pub fn issued_by(mut self, attribute: impl Into<String>) -> Self {
        self.issuer = attribute.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn prefix_title(&mut self, prefix: &str) {
        self.title = format!("{}{}", prefix, self.title);
    }

    /// Attribute name of the issuing refiner (empty when not recorded)
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Labels most recently offered
    pub fn offered(&self) -> &[String] {
        &self.offered
    }

    /// Number of selectable candidates (values, for ranges)
    pub fn len(&self) -> usize {
        match &self.kind {
            SetKind::Flat(set) => set.len(),
            SetKind::Phonetic(set) => set.len(),
            SetKind::Range(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current bounds of a numeric-range set
    pub fn range_bounds(&self) -> Option<(u32, u32)> {
        match &self.kind {
            SetKind::Range(set) => Some(set.bounds()),
            _ => None,
        }
    }

    /// Returns the next page of labels, with `NEXT` appended when truncated.
    pub fn paginate(&mut self, page_size: usize) -> Vec<String> {
        let page = match &mut self.kind {
            SetKind::Flat(set) => set.page(page_size),
            SetKind::Phonetic(set) => set.page(page_size),
            SetKind::Range(set) => set.page(page_size),
        };
        self.offered = page.clone();
        page
    }

    /// Resolves a choice from the last offered page.
    ///
    /// # Errors
    /// [`CandidateError::InvalidChoice`] if `choice` was not offered; the set
    /// is left unchanged so the caller can re-prompt.
    pub fn select(&mut self, page_size: usize, choice: &str) -> Result<Selection, CandidateError> {
        if !self.offered.iter().any(|o| o == choice) {
            return Err(CandidateError::InvalidChoice(choice.to_string()));
        }
        let selection = match &mut self.kind {
            SetKind::Flat(set) => set.choose(page_size, choice),
            SetKind::Phonetic(set) => set.choose(page_size, choice),
            SetKind::Range(set) => set.choose(page_size, choice),
        }?;
        if let Selection::Options(page) = &selection {
            self.offered = page.clone();
        }
        Ok(selection)
    }
}
