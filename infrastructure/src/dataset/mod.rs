//! Article dataset adapters

pub mod squad;

pub use squad::SquadArticleSource;
