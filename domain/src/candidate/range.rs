//! Numeric range candidates (years, months, days).
//!
//! Wide ranges are first offered as contiguous sub-ranges (`"1-30"`, ...);
//! picking one narrows the range until individual values fit on a page.

use super::entities::{Candidate, NEXT, SKIP};
use super::error::CandidateError;
use super::pager::Pager;
use super::set::Selection;

#[derive(Debug, Clone)]
pub(crate) struct RangeSet {
    start: u32,
    end: u32,
    skippable: bool,
    partitioned: bool,
    pager: Option<Pager>,
}

impl RangeSet {
    pub(crate) fn new(
        title: &str,
        start: u32,
        end: u32,
        skippable: bool,
    ) -> Result<Self, CandidateError> {
        if start > end {
            return Err(CandidateError::Empty(title.to_string()));
        }
        Ok(Self {
            start,
            end,
            skippable,
            partitioned: false,
            pager: None,
        })
    }

    pub(crate) fn bounds(&self) -> (u32, u32) {
        (self.start, self.end)
    }

    pub(crate) fn page(&mut self, page_size: usize) -> Vec<String> {
        let size = page_size.max(1);
        if self.pager.is_none() {
            let (partitioned, labels) = self.labels(size);
            self.partitioned = partitioned;
            self.pager = Some(Pager::new(labels));
        }
        let mut page = match self.pager.as_mut() {
            Some(pager) => pager.next_page(size),
            None => Vec::new(),
        };
        if self.skippable {
            page.insert(0, SKIP.to_string());
        }
        page
    }

    pub(crate) fn choose(
        &mut self,
        page_size: usize,
        choice: &str,
    ) -> Result<Selection, CandidateError> {
        if choice == SKIP && self.skippable {
            return Ok(Selection::Chosen(Candidate::skip()));
        }
        if choice == NEXT {
            return Ok(Selection::Options(self.page(page_size)));
        }
        let invalid = || CandidateError::InvalidChoice(choice.to_string());
        if self.partitioned {
            let (lo, hi) = choice.split_once('-').ok_or_else(invalid)?;
            let lo: u32 = lo.trim().parse().map_err(|_| invalid())?;
            let hi: u32 = hi.trim().parse().map_err(|_| invalid())?;
            if lo > hi || lo < self.start || hi > self.end {
                return Err(invalid());
            }
            self.start = lo;
            self.end = hi;
            self.pager = None;
            return Ok(Selection::Options(self.page(page_size)));
        }
        let value: u32 = choice.trim().parse().map_err(|_| invalid())?;
        if !(self.start..=self.end).contains(&value) {
            return Err(invalid());
        }
        Ok(Selection::Chosen(Candidate::new(value.to_string())))
    }

    pub(crate) fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Labels for the current bounds: sub-ranges of width `size` when the
    /// range spans more than two pages, individual values otherwise.
    fn labels(&self, size: usize) -> (bool, Vec<String>) {
        let span = (self.end - self.start) as usize;
        if span > 2 * size {
            let width = size as u32;
            let mut labels = Vec::with_capacity(span / size + 1);
            let mut lo = self.start;
            loop {
                let hi = lo.saturating_add(width - 1).min(self.end);
                labels.push(format!("{}-{}", lo, hi));
                if hi >= self.end {
                    break;
                }
                lo = hi + 1;
            }
            (true, labels)
        } else {
            (
                false,
                (self.start..=self.end).map(|v| v.to_string()).collect(),
            )
        }
    }
}
