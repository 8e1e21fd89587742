use crate::case_store::StatusFilter;
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/posts";

/// Environment variable that overrides the configured endpoint.
pub const ENDPOINT_ENV: &str = "CASEFLOW_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub endpoint: String,
    pub initial_filter: StatusFilter,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            initial_filter: StatusFilter::All,
        }
    }
}

impl DeskConfig {
    /// Load from a JSON file. Missing keys fall back to defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read desk config {path}"))?;
        Self::from_json(&content).with_context(|| format!("Failed to parse desk config {path}"))
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: DeskConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `CASEFLOW_ENDPOINT` if set and non-empty.
    pub fn with_env_overrides(self) -> Self {
        self.with_endpoint_override(std::env::var(ENDPOINT_ENV).ok())
    }

    pub fn with_endpoint_override(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint;
        }
        self
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.endpoint.trim().is_empty() {
            anyhow::bail!("endpoint must not be empty");
        }
        Ok(())
    }
}
