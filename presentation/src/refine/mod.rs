//! Interactive refinement

pub mod repl;
