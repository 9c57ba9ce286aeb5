//! SPARQL-backed place directory
//!
//! Countries and their subdivisions come from a knowledge graph (YAGO by
//! default) through the SPARQL 1.1 protocol. Each query must bind `?s`
//! (subject IRI) and `?l` (display label).

use crate::config::FileSparqlConfig;
use refiner_domain::{Place, PlaceDirectory, PlaceLookupError};
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

const RESULTS_JSON: &str = "application/sparql-results+json";

/// Placeholder replaced by the parent subject IRI
pub const SUBJECT_PLACEHOLDER: &str = "{subject}";

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    value: String,
}

/// Place directory over a SPARQL endpoint
pub struct SparqlPlaceDirectory {
    client: Client,
    endpoint: String,
    countries_query: String,
    subdivisions_query: String,
}

impl SparqlPlaceDirectory {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, PlaceLookupError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlaceLookupError::Unavailable(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            countries_query: crate::config::DEFAULT_COUNTRIES_QUERY.to_string(),
            subdivisions_query: crate::config::DEFAULT_SUBDIVISIONS_QUERY.to_string(),
        })
    }

    /// Directory configured from `[sparql]`, honoring `SPARQL_ENDPOINT`.
    pub fn from_config(config: &FileSparqlConfig) -> Result<Self, PlaceLookupError> {
        Ok(
            Self::new(config.resolve_endpoint(), Duration::from_secs(config.timeout_secs))?
                .with_queries(&config.countries_query, &config.subdivisions_query),
        )
    }

    pub fn with_queries(mut self, countries: &str, subdivisions: &str) -> Self {
        self.countries_query = countries.to_string();
        self.subdivisions_query = subdivisions.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn select(&self, query: &str) -> Result<Vec<Place>, PlaceLookupError> {
        debug!("SPARQL query to {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header(ACCEPT, RESULTS_JSON)
            .send()
            .map_err(|e| PlaceLookupError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlaceLookupError::Unavailable(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .map_err(|e| PlaceLookupError::Unavailable(e.to_string()))?;
        parse_bindings(&body)
    }
}

impl PlaceDirectory for SparqlPlaceDirectory {
    fn countries(&self) -> Result<Vec<Place>, PlaceLookupError> {
        self.select(&self.countries_query)
    }

    fn subdivisions(&self, subject: &str) -> Result<Vec<Place>, PlaceLookupError> {
        check_subject(subject)?;
        let query = self.subdivisions_query.replace(SUBJECT_PLACEHOLDER, subject);
        self.select(&query)
    }
}

/// Rejects subjects that could break out of an `<IRI>` term.
fn check_subject(subject: &str) -> Result<(), PlaceLookupError> {
    let bad = subject.is_empty()
        || subject
            .chars()
            .any(|c| matches!(c, '<' | '>' | '"') || c.is_whitespace());
    if bad {
        return Err(PlaceLookupError::Malformed(format!(
            "subject is not a plain IRI: '{}'",
            subject
        )));
    }
    Ok(())
}

/// Reads `?s` / `?l` bindings from a SPARQL JSON result.
///
/// Every row is returned; rows sharing a label are rejected later when the
/// candidate set is built.
pub fn parse_bindings(body: &str) -> Result<Vec<Place>, PlaceLookupError> {
    let response: SparqlResponse = serde_json::from_str(body)
        .map_err(|e| PlaceLookupError::Malformed(format!("SPARQL JSON: {}", e)))?;

    let mut places = Vec::with_capacity(response.results.bindings.len());
    for row in response.results.bindings {
        let (Some(subject), Some(label)) = (row.get("s"), row.get("l")) else {
            return Err(PlaceLookupError::Malformed(
                "binding without ?s or ?l".to_string(),
            ));
        };
        places.push(Place::new(subject.value.clone(), label.value.clone()));
    }
    Ok(places)
}

#[cfg(test)]
mod tests {
    use super::*;
    use refiner_domain::{CandidateError, CandidateSet, KanaOnlyReader, PhoneticBucketer};

    const BODY: &str = r#"{
      "head": { "vars": ["s", "l"] },
      "results": { "bindings": [
        { "s": { "type": "uri", "value": "http://yago-knowledge.org/resource/Japan" },
          "l": { "type": "literal", "xml:lang": "ja", "value": "日本" } },
        { "s": { "type": "uri", "value": "http://yago-knowledge.org/resource/France" },
          "l": { "type": "literal", "xml:lang": "ja", "value": "フランス" } },
        { "s": { "type": "uri", "value": "http://yago-knowledge.org/resource/Japan_(alt)" },
          "l": { "type": "literal", "xml:lang": "ja", "value": "日本" } }
      ] }
    }"#;

    #[test]
    fn test_parse_bindings() {
        let places = parse_bindings(BODY).unwrap();
        assert_eq!(places.len(), 3);
        assert_eq!(places[0].label, "日本");
        assert_eq!(
            places[0].subject,
            "http://yago-knowledge.org/resource/Japan"
        );
        assert_eq!(places[1].label, "フランス");
        assert_eq!(
            places[2].subject,
            "http://yago-knowledge.org/resource/Japan_(alt)"
        );
    }

    #[test]
    fn test_shared_label_reaches_candidate_set() {
        let body = r#"{"results": {"bindings": [
          { "s": { "value": "http://kg.test/Fuchu_Tokyo" }, "l": { "value": "府中市" } },
          { "s": { "value": "http://kg.test/Fuchu_Hiroshima" }, "l": { "value": "府中市" } }
        ]}}"#;
        let places = parse_bindings(body).unwrap();
        assert_eq!(places.len(), 2);

        let buckets = PhoneticBucketer::new(&KanaOnlyReader)
            .bucket(places.into_iter().map(|p| (p.subject, p.label)));
        assert_eq!(
            CandidateSet::phonetic("出身地", buckets).unwrap_err(),
            CandidateError::DuplicateCandidateKey("府中市".to_string())
        );
    }

    #[test]
    fn test_parse_empty_result() {
        let places = parse_bindings(r#"{"results": {"bindings": []}}"#).unwrap();
        assert!(places.is_empty());
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(
            parse_bindings("<html>"),
            Err(PlaceLookupError::Malformed(_))
        ));
        assert!(matches!(
            parse_bindings(r#"{"results": {"bindings": [{"s": {"value": "x"}}]}}"#),
            Err(PlaceLookupError::Malformed(_))
        ));
    }

    #[test]
    fn test_subject_checked_before_request() {
        let directory =
            SparqlPlaceDirectory::new("http://127.0.0.1:9/query", Duration::from_millis(10))
                .unwrap();
        for subject in ["", "a b", "x> . ?s ?p <y", "\"quoted\""] {
            assert!(matches!(
                directory.subdivisions(subject),
                Err(PlaceLookupError::Malformed(_))
            ));
        }
    }

    #[test]
    fn test_unreachable_endpoint_is_unavailable() {
        let directory =
            SparqlPlaceDirectory::new("http://127.0.0.1:9/query", Duration::from_millis(200))
                .unwrap();
        assert!(matches!(
            directory.countries(),
            Err(PlaceLookupError::Unavailable(_))
        ));
    }

    #[test]
    fn test_from_config_uses_custom_queries() {
        let config = FileSparqlConfig {
            endpoint: Some("http://kg.test/query".to_string()),
            countries_query: "SELECT ?s ?l WHERE {}".to_string(),
            ..Default::default()
        };
        let directory = SparqlPlaceDirectory::from_config(&config).unwrap();
        assert_eq!(directory.countries_query, "SELECT ?s ?l WHERE {}");
    }
}
