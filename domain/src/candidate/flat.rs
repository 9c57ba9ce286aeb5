//! Flat candidate list: one level, paged.

use super::entities::{Candidate, NEXT};
use super::error::CandidateError;
use super::pager::Pager;
use super::set::Selection;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub(crate) struct FlatSet {
    items: Vec<Candidate>,
    index: HashMap<String, usize>,
    pager: Pager,
}

impl FlatSet {
    pub(crate) fn new(title: &str, items: Vec<Candidate>) -> Result<Self, CandidateError> {
        if items.is_empty() {
            return Err(CandidateError::Empty(title.to_string()));
        }
        let mut index = HashMap::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if index.insert(item.key().to_string(), i).is_some() {
                return Err(CandidateError::DuplicateCandidateKey(item.key().to_string()));
            }
        }
        let pager = Pager::new(items.iter().map(|c| c.key().to_string()).collect());
        Ok(Self {
            items,
            index,
            pager,
        })
    }

    pub(crate) fn page(&mut self, page_size: usize) -> Vec<String> {
        self.pager.next_page(page_size)
    }

    pub(crate) fn choose(
        &mut self,
        page_size: usize,
        choice: &str,
    ) -> Result<Selection, CandidateError> {
        if choice == NEXT && self.pager.has_more() {
            return Ok(Selection::Options(self.page(page_size)));
        }
        self.index
            .get(choice)
            .map(|&i| Selection::Chosen(self.items[i].clone()))
            .ok_or_else(|| CandidateError::InvalidChoice(choice.to_string()))
    }

    pub(crate) fn len(&self) -> usize {
        self.pager.len()
    }
}
