//! Knowledge-graph adapters

pub mod sparql;

pub use sparql::SparqlPlaceDirectory;
