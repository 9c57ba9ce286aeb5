//! Application layer for attr-refiner
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{RefinementSettings, ValidationParams};
pub use ports::{
    article_source::{Article, ArticleSource, DatasetError},
    progress::{NoProgress, ValidationProgress},
    qa_engine::{QaEngine, QaError, RankedAnswer},
};
pub use use_cases::refinement_session::{
    ATTRIBUTE_TITLE, COMPLETE_LABEL, RefinementSession, SessionError, StepOutput,
};
pub use use_cases::validate_answers::{
    ArticleReport, ValidateAnswersInput, ValidateAnswersUseCase, ValidationError,
    ValidationReport,
};
