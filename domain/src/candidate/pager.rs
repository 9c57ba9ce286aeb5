//! Page cursor shared by every candidate set variant.

use super::entities::NEXT;

/// Hands out labels page by page, appending [`NEXT`] while more remain.
///
/// A page never holds more than `page_size` labels including the `NEXT`
/// marker, except for `page_size == 1`, where one label plus `NEXT` is
/// returned so that paging always advances.
#[derive(Debug, Clone)]
pub(crate) struct Pager {
    labels: Vec<String>,
    cursor: usize,
}

impl Pager {
    pub(crate) fn new(labels: Vec<String>) -> Self {
        Self { labels, cursor: 0 }
    }

    pub(crate) fn next_page(&mut self, page_size: usize) -> Vec<String> {
        let size = page_size.max(1);
        let rest = &self.labels[self.cursor..];
        if rest.len() <= size {
            let page = rest.to_vec();
            self.cursor = self.labels.len();
            return page;
        }
        let take = if size > 1 { size - 1 } else { 1 };
        let mut page = rest[..take].to_vec();
        self.cursor += take;
        page.push(NEXT.to_string());
        page
    }

    pub(crate) fn has_more(&self) -> bool {
        self.cursor < self.labels.len()
    }

    pub(crate) fn len(&self) -> usize {
        self.labels.len()
    }
}
