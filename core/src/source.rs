//! Case sources: where raw records come from.
//!
//! RULE: A source only fetches and decodes. It never builds cases and
//! never touches desk state; the desk maps records through the case
//! builder after the fetch settles.

use crate::{
    case_builder::RawRecord,
    error::{DeskError, DeskResult},
};
use async_trait::async_trait;

/// The contract every fetch collaborator must fulfill.
#[async_trait]
pub trait CaseSource: Send + Sync {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    /// Fetch the full ordered batch. A batch that fails to decode in
    /// part fails as a whole.
    async fn fetch_raw_records(&self) -> DeskResult<Vec<RawRecord>>;
}

/// Fetches posts over HTTP. One attempt, no retry, no timeout.
pub struct HttpCaseSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpCaseSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    /// Use a preconfigured client (proxy, TLS or header settings).
    pub fn with_client(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CaseSource for HttpCaseSource {
    fn describe(&self) -> String {
        format!("http {}", self.endpoint)
    }

    async fn fetch_raw_records(&self) -> DeskResult<Vec<RawRecord>> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DeskError::HttpStatus(status.as_u16()));
        }
        let body = response.bytes().await?;
        decode_records(&body)
    }
}

/// Serves a fixed batch, or fails with a fixed message.
/// Used by tests and by the runner's offline mode.
#[derive(Debug, Clone)]
pub enum StaticCaseSource {
    Records(Vec<RawRecord>),
    Failing(String),
}

impl StaticCaseSource {
    /// Decode a JSON array of posts up front.
    pub fn from_json(json: &str) -> DeskResult<Self> {
        Ok(Self::Records(decode_records(json.as_bytes())?))
    }
}

#[async_trait]
impl CaseSource for StaticCaseSource {
    fn describe(&self) -> String {
        match self {
            Self::Records(records) => format!("static ({} records)", records.len()),
            Self::Failing(message) => format!("static (failing: {message})"),
        }
    }

    async fn fetch_raw_records(&self) -> DeskResult<Vec<RawRecord>> {
        match self {
            Self::Records(records) => Ok(records.clone()),
            Self::Failing(message) => Err(DeskError::Load(message.clone())),
        }
    }
}

pub fn decode_records(body: &[u8]) -> DeskResult<Vec<RawRecord>> {
    Ok(serde_json::from_slice(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_posts_ignoring_extra_fields() {
        let json = r#"[
            {"userId": 1, "id": 1, "title": "sunt aut facere", "body": "quia et suscipit"},
            {"userId": 2, "id": 12, "title": "in quibusdam", "body": "repellendus"}
        ]"#;
        let records = decode_records(json.as_bytes()).unwrap();
        assert_eq!(
            records,
            vec![
                RawRecord { user_id: 1, id: 1 },
                RawRecord { user_id: 2, id: 12 },
            ]
        );
    }

    #[test]
    fn one_malformed_record_fails_the_batch() {
        let json = r#"[{"userId": 1, "id": 1}, {"userId": 1, "id": "two"}]"#;
        let err = decode_records(json.as_bytes()).unwrap_err();
        assert!(matches!(err, DeskError::Decode(_)), "unexpected error: {err}");
    }

    #[test]
    fn http_status_error_reads_like_a_status_line() {
        assert_eq!(DeskError::HttpStatus(404).to_string(), "HTTP 404");
    }
}
