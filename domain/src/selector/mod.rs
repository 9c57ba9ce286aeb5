//! Category selection and refiner dispatch

pub mod catalog;
pub mod category;
#[allow(clippy::module_inception)]
pub mod selector;

pub use catalog::AttributeCatalog;
pub use category::{Category, RefinerKind};
pub use selector::{CATEGORY_TITLE, CategorySelector, RefinerContext, SelectorError};
