//! Phonetic reading abstraction.

/// Produces a phonetic reading (katakana) for a display label.
///
/// Implementations live in the infrastructure layer (dictionary-backed
/// transliteration); tests use deterministic in-crate readers.
pub trait PhoneticReader: Send + Sync {
    fn reading(&self, label: &str) -> String;
}

/// Reader that only normalizes kana, leaving other characters as they are.
///
/// Useful when labels are already written in kana, and as a fallback when no
/// dictionary is available.
#[derive(Debug, Clone, Copy, Default)]
pub struct KanaOnlyReader;

impl PhoneticReader for KanaOnlyReader {
    fn reading(&self, label: &str) -> String {
        to_katakana(label)
    }
}

/// Convert hiragana to katakana; every other character is kept.
pub fn to_katakana(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{3041}'..='\u{3096}' => char::from_u32(c as u32 + 0x60).unwrap_or(c),
            _ => c,
        })
        .collect()
}
