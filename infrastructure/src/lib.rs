//! Infrastructure layer for attr-refiner
//!
//! This crate contains adapters that implement the ports defined in the
//! domain and application layers, including configuration file loading.

pub mod config;
pub mod dataset;
pub mod knowledge;
pub mod phonetic;
pub mod qa;

// Re-export commonly used types
pub use config::{ConfigLoader, FileConfig};
pub use dataset::SquadArticleSource;
pub use knowledge::SparqlPlaceDirectory;
pub use phonetic::{KakasiReader, ReaderBackend};
pub use qa::HttpQaEngine;
