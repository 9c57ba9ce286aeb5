//! Knowledge-graph configuration from TOML (`[sparql]` section)

use serde::{Deserialize, Serialize};

/// Environment variable that overrides the configured endpoint
pub const SPARQL_ENDPOINT_ENV: &str = "SPARQL_ENDPOINT";

pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://localhost:3030/yago4/query";

/// Present-day countries with Japanese labels
pub const DEFAULT_COUNTRIES_QUERY: &str = r#"PREFIX schema: <http://schema.org/>
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT ?s ?l WHERE {
  ?s rdf:type schema:Country .
  ?s rdfs:label ?l .
  FILTER(LANG(?l) = 'ja')
  FILTER NOT EXISTS { ?s schema:dissolutionDate ?d }
}"#;

/// Places directly contained in `{subject}`, with Japanese labels
pub const DEFAULT_SUBDIVISIONS_QUERY: &str = r#"PREFIX schema: <http://schema.org/>
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
SELECT ?s ?l WHERE {
  ?s schema:containedInPlace <{subject}> .
  ?s rdfs:label ?l .
  FILTER(LANG(?l) = 'ja')
  FILTER NOT EXISTS { ?s schema:dissolutionDate ?d }
}"#;

/// Raw SPARQL configuration from TOML
///
/// # Example
///
/// ```toml
/// [sparql]
/// endpoint = "http://localhost:3030/yago4/query"
/// timeout_secs = 10
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSparqlConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub countries_query: String,
    /// Must contain `{subject}`
    pub subdivisions_query: String,
}

impl Default for FileSparqlConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
            countries_query: DEFAULT_COUNTRIES_QUERY.to_string(),
            subdivisions_query: DEFAULT_SUBDIVISIONS_QUERY.to_string(),
        }
    }
}

impl FileSparqlConfig {
    /// `SPARQL_ENDPOINT`, then the configured endpoint, then the default.
    pub fn resolve_endpoint(&self) -> String {
        Self::pick_endpoint(
            std::env::var(SPARQL_ENDPOINT_ENV).ok(),
            self.endpoint.as_deref(),
        )
    }

    fn pick_endpoint(env: Option<String>, configured: Option<&str>) -> String {
        env.filter(|e| !e.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_SPARQL_ENDPOINT.to_string())
    }
}
