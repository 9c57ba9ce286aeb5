//! QA engine adapters

pub mod http;

pub use http::HttpQaEngine;
