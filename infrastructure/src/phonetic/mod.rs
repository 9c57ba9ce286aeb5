//! Phonetic reader adapters

pub mod kakasi;

pub use self::kakasi::KakasiReader;

use refiner_domain::{KanaOnlyReader, PhoneticReader};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which reader produces the bucket keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReaderBackend {
    /// Dictionary transliteration; handles kanji labels
    #[default]
    Kakasi,
    /// Kana normalization only
    Kana,
}

impl ReaderBackend {
    pub fn build(self) -> Arc<dyn PhoneticReader> {
        match self {
            ReaderBackend::Kakasi => Arc::new(KakasiReader),
            ReaderBackend::Kana => Arc::new(KanaOnlyReader),
        }
    }
}

impl fmt::Display for ReaderBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReaderBackend::Kakasi => write!(f, "kakasi"),
            ReaderBackend::Kana => write!(f, "kana"),
        }
    }
}

impl FromStr for ReaderBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kakasi" => Ok(ReaderBackend::Kakasi),
            "kana" | "kana-only" => Ok(ReaderBackend::Kana),
            _ => Err(format!("Invalid phonetic reader: {}", s)),
        }
    }
}
