//! Dictionary-backed phonetic reader
//!
//! Uses the `kakasi` transliterator to turn kanji labels into hiragana,
//! then normalizes to katakana so buckets line up with kana-only labels.

use refiner_domain::PhoneticReader;
use refiner_domain::phonetic::to_katakana;

/// Kanji-aware reader backed by kakasi's dictionary
#[derive(Debug, Clone, Copy, Default)]
pub struct KakasiReader;

impl PhoneticReader for KakasiReader {
    fn reading(&self, label: &str) -> String {
        to_katakana(&kakasi::convert(label).hiragana)
    }
}
