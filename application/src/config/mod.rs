//! Application-level configuration.
//!
//! - [`RefinementSettings`]: step session presentation (page size, ...)
//! - [`ValidationParams`]: QA batch control for answer validation

pub mod refinement_settings;
pub mod validation_params;

pub use refinement_settings::RefinementSettings;
pub use validation_params::ValidationParams;
