//! HTTP QA engine adapter
//!
//! Talks to a model server exposing batch prediction:
//!
//! ```text
//! POST <endpoint>
//! {"pairs": [["context", "question"], ...], "top_n": 1}
//!
//! 200 OK
//! [[{"text": "1867年2月9日", "score": 0.93}], [], ...]
//! ```

use crate::config::FileQaConfig;
use refiner_application::{QaEngine, QaError, RankedAnswer};
use reqwest::blocking::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    pairs: &'a [(String, String)],
    top_n: usize,
}

/// QA engine reached over HTTP
pub struct HttpQaEngine {
    client: Client,
    endpoint: String,
}

impl HttpQaEngine {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, QaError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| QaError::ConnectionError(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn from_config(config: &FileQaConfig) -> Result<Self, QaError> {
        Self::new(&config.endpoint, Duration::from_secs(config.timeout_secs))
    }
}

impl QaEngine for HttpQaEngine {
    fn predict_batch(
        &self,
        pairs: &[(String, String)],
        top_n: usize,
    ) -> Result<Vec<Vec<RankedAnswer>>, QaError> {
        debug!("QA batch of {} pairs to {}", pairs.len(), self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { pairs, top_n })
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    QaError::Timeout
                } else {
                    QaError::ConnectionError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(QaError::RequestFailed(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .text()
            .map_err(|e| QaError::InvalidResponse(e.to_string()))?;
        parse_predictions(&body)
    }
}

/// Parses the engine's answer lists.
pub fn parse_predictions(body: &str) -> Result<Vec<Vec<RankedAnswer>>, QaError> {
    serde_json::from_str(body).map_err(|e| QaError::InvalidResponse(e.to_string()))
}
