//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.
//! The place directory and phonetic reader ports are domain traits
//! ([`refiner_domain::PlaceDirectory`], [`refiner_domain::PhoneticReader`])
//! because refiners consume them directly.

pub mod article_source;
pub mod progress;
pub mod qa_engine;
