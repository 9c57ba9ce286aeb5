//! Phonetic bucketing - groups labels by the leading characters of their reading.
//!
//! Large label sets (e.g. every country) are offered in two levels: first the
//! bucket keys, then the labels inside the chosen bucket.

use super::reader::PhoneticReader;
use crate::candidate::entities::DONE;
use std::collections::BTreeMap;

/// One bucketed item: external id, display label and its reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneticEntry {
    pub id: String,
    pub label: String,
    pub reading: String,
}

/// Items grouped by reading prefix, ordered by key.
///
/// The `DONE` label, when present, is held as its own singleton group under
/// the `DONE` key.
#[derive(Debug, Clone, Default)]
pub struct PhoneticBuckets {
    groups: BTreeMap<String, Vec<PhoneticEntry>>,
}

impl PhoneticBuckets {
    pub fn groups(&self) -> &BTreeMap<String, Vec<PhoneticEntry>> {
        &self.groups
    }

    pub fn into_groups(self) -> BTreeMap<String, Vec<PhoneticEntry>> {
        self.groups
    }

    /// Total number of items across every group
    pub fn total(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn has_done(&self) -> bool {
        self.groups.contains_key(DONE)
    }
}

/// Groups `(id, label)` pairs by reading prefix.
pub struct PhoneticBucketer<'a> {
    reader: &'a dyn PhoneticReader,
    max_bucket: Option<usize>,
}

impl<'a> PhoneticBucketer<'a> {
    pub fn new(reader: &'a dyn PhoneticReader) -> Self {
        Self {
            reader,
            max_bucket: None,
        }
    }

    /// Subdivide buckets holding more than `max` items by further reading
    /// characters.
    pub fn with_max_bucket(mut self, max: Option<usize>) -> Self {
        self.max_bucket = max.filter(|m| *m > 0);
        self
    }

    pub fn bucket<I>(&self, items: I) -> PhoneticBuckets
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut groups: BTreeMap<String, Vec<PhoneticEntry>> = BTreeMap::new();
        for (id, label) in items {
            if label == DONE {
                groups.entry(DONE.to_string()).or_default().push(PhoneticEntry {
                    id,
                    reading: label.clone(),
                    label,
                });
                continue;
            }
            let reading = self.reading_of(&label);
            groups
                .entry(prefix(&reading, 1))
                .or_default()
                .push(PhoneticEntry { id, label, reading });
        }

        if let Some(max) = self.max_bucket {
            subdivide(&mut groups, max);
        }

        PhoneticBuckets { groups }
    }

    fn reading_of(&self, label: &str) -> String {
        let reading = self.reader.reading(label);
        if !reading.trim().is_empty() {
            reading
        } else if !label.is_empty() {
            label.to_string()
        } else {
            "#".to_string()
        }
    }
}

/// Bucket key for the first `len` reading characters. A prefix spelling the
/// reserved `DONE` token gets a trailing `・`.
fn prefix(reading: &str, len: usize) -> String {
    let key: String = reading.chars().take(len).collect();
    if key == DONE { format!("{}・", key) } else { key }
}

/// Split over-full groups by one more reading character until every group
/// fits or no group can be split further.
fn subdivide(groups: &mut BTreeMap<String, Vec<PhoneticEntry>>, max: usize) {
    let mut depth = 1;
    loop {
        let over: Vec<String> = groups
            .iter()
            .filter(|(key, entries)| {
                key.as_str() != DONE
                    && entries.len() > max
                    && entries.iter().any(|e| e.reading.chars().count() > depth)
            })
            .map(|(key, _)| key.clone())
            .collect();
        if over.is_empty() {
            break;
        }
        for key in over {
            let Some(entries) = groups.remove(&key) else {
                continue;
            };
            for entry in entries {
                groups
                    .entry(prefix(&entry.reading, depth + 1))
                    .or_default()
                    .push(entry);
            }
        }
        depth += 1;
    }
}
