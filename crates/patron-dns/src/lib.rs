//! MX record lookups over DNS-over-HTTPS.
//!
//! Queries the Google public resolver's JSON API synchronously. The
//! engine decides what a transport failure means (fail-open by
//! default); this crate only reports it.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use patron_engine::{LookupError, MxLookup};

const DEFAULT_ENDPOINT: &str = "https://dns.google/resolve";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking DNS-over-HTTPS resolver.
#[derive(Debug)]
pub struct DohResolver {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl DohResolver {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_endpoint(DEFAULT_ENDPOINT)
    }

    /// Use a non-default resolver endpoint (tests, local mirrors).
    pub fn with_endpoint(endpoint: impl Into<String>) -> Result<Self, LookupError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|error| LookupError::Transport(error.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl MxLookup for DohResolver {
    fn has_mx(&mut self, domain: &str) -> Result<bool, LookupError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("name", domain), ("type", "MX")])
            .send()
            .map_err(|error| LookupError::Transport(error.to_string()))?;
        let body: DnsResponse = response
            .json()
            .map_err(|error| LookupError::Malformed(error.to_string()))?;
        let reachable = body.has_answer();
        debug!(domain, reachable, status = body.status, "MX lookup completed");
        Ok(reachable)
    }
}

/// The subset of the resolver's JSON reply the engine cares about.
#[derive(Debug, Deserialize)]
struct DnsResponse {
    #[serde(rename = "Status")]
    status: i64,
    #[serde(rename = "Answer")]
    answer: Option<Vec<DnsAnswer>>,
}

impl DnsResponse {
    /// NOERROR plus at least one answer record.
    fn has_answer(&self) -> bool {
        self.status == 0 && self.answer.as_ref().is_some_and(|a| !a.is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct DnsAnswer {
    #[serde(rename = "data")]
    _data: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_section_means_reachable() {
        let body = r#"{"Status":0,"Answer":[{"name":"example.org.","type":15,"data":"10 mail.example.org."}]}"#;
        let response: DnsResponse = serde_json::from_str(body).expect("parse reply");
        assert!(response.has_answer());
    }

    #[test]
    fn nxdomain_means_unreachable() {
        let body = r#"{"Status":3}"#;
        let response: DnsResponse = serde_json::from_str(body).expect("parse reply");
        assert!(!response.has_answer());
    }

    #[test]
    fn noerror_without_answers_means_unreachable() {
        let body = r#"{"Status":0,"Answer":[]}"#;
        let response: DnsResponse = serde_json::from_str(body).expect("parse reply");
        assert!(!response.has_answer());
    }
}
