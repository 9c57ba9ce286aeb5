//! Phonetic reading and bucketing of labels.
//!
//! - [`reader::PhoneticReader`]: label → katakana reading
//! - [`bucket::PhoneticBucketer`]: groups labels by reading prefix

pub mod bucket;
pub mod reader;

pub use bucket::{PhoneticBucketer, PhoneticBuckets, PhoneticEntry};
pub use reader::{KanaOnlyReader, PhoneticReader, to_katakana};
