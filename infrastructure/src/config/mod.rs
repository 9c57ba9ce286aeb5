//! Configuration file loading for attr-refiner
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `REFINER_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./refiner.toml` or `./.refiner.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/attr-refiner/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    DEFAULT_COUNTRIES_QUERY, DEFAULT_QA_ENDPOINT, DEFAULT_SPARQL_ENDPOINT,
    DEFAULT_SUBDIVISIONS_QUERY, FileAttributeConfig, FileConfig, FileDatasetsConfig,
    FileDatesConfig, FileEraConfig, FileOutputConfig, FilePhoneticConfig, FileQaConfig,
    FileRefineConfig, FileSparqlConfig, SPARQL_ENDPOINT_ENV, parse_catalog,
};
pub use loader::ConfigLoader;
