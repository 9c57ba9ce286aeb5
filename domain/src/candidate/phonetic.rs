//! Two-level candidate selection over phonetic buckets.
//!
//! Level 1 offers the bucket keys (with `DONE` always shown first when the
//! source carries it), level 2 the labels inside the chosen bucket.

use super::entities::{Candidate, DONE, NEXT};
use super::error::CandidateError;
use super::flat::FlatSet;
use super::pager::Pager;
use super::set::Selection;
use crate::phonetic::PhoneticBuckets;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone)]
enum Level {
    Buckets(Pager),
    Items(FlatSet),
}

#[derive(Debug, Clone)]
pub(crate) struct PhoneticSet {
    title: String,
    buckets: BTreeMap<String, Vec<Candidate>>,
    done: Option<Candidate>,
    level: Level,
    total: usize,
}

impl PhoneticSet {
    pub(crate) fn new(title: &str, source: PhoneticBuckets) -> Result<Self, CandidateError> {
        let mut seen = HashSet::new();
        let mut done = None;
        let mut buckets = BTreeMap::new();
        let mut total = 0;

        for (key, entries) in source.into_groups() {
            let mut items = Vec::with_capacity(entries.len());
            for entry in entries {
                if !seen.insert(entry.label.clone()) {
                    return Err(CandidateError::DuplicateCandidateKey(entry.label));
                }
                total += 1;
                if key == DONE {
                    done = Some(Candidate::done());
                    continue;
                }
                items.push(
                    Candidate::with_reference(entry.label, entry.id.clone())
                        .with_reading(entry.reading)
                        .with_subject(entry.id),
                );
            }
            if !items.is_empty() {
                buckets.insert(key, items);
            }
        }

        if total == 0 {
            return Err(CandidateError::Empty(title.to_string()));
        }

        let pager = Pager::new(buckets.keys().cloned().collect());
        Ok(Self {
            title: title.to_string(),
            buckets,
            done,
            level: Level::Buckets(pager),
            total,
        })
    }

    pub(crate) fn page(&mut self, page_size: usize) -> Vec<String> {
        match &mut self.level {
            Level::Buckets(pager) => {
                let mut page = pager.next_page(page_size);
                if self.done.is_some() {
                    page.insert(0, DONE.to_string());
                }
                page
            }
            Level::Items(flat) => flat.page(page_size),
        }
    }

    pub(crate) fn choose(
        &mut self,
        page_size: usize,
        choice: &str,
    ) -> Result<Selection, CandidateError> {
        if let Level::Items(flat) = &mut self.level {
            return flat.choose(page_size, choice);
        }
        if choice == DONE {
            if let Some(done) = &self.done {
                return Ok(Selection::Chosen(done.clone()));
            }
        }
        if choice == NEXT {
            return Ok(Selection::Options(self.page(page_size)));
        }
        let items = self
            .buckets
            .get(choice)
            .cloned()
            .ok_or_else(|| CandidateError::InvalidChoice(choice.to_string()))?;
        let title = format!("{}/{}", self.title, choice);
        self.level = Level::Items(FlatSet::new(&title, items)?);
        Ok(Selection::Options(self.page(page_size)))
    }

    pub(crate) fn len(&self) -> usize {
        self.total
    }
}
