//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod refinement_session;
pub mod validate_answers;
