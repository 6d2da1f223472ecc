//! HTTP adapter for the hosted prompt store.
//!
//! Speaks the store's public REST API: prompts are fetched by name with
//! the deployment label as a query parameter, authenticated with HTTP
//! Basic auth from the public/secret key pair.

use crate::client::{PromptStore, StoredPrompt};
use promptdeck_core::{config, AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

/// Prompt payload as returned by the store API.
///
/// `prompt` is a plain string for text prompts and an array of messages
/// for chat prompts; only text prompts are supported here.
#[derive(Debug, Deserialize)]
struct WirePrompt {
    name: String,
    version: u32,
    prompt: serde_json::Value,
    #[serde(rename = "type", default)]
    prompt_type: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
}

/// HTTP prompt store client.
///
/// Performs a single request per call. No retries and no caching; both
/// belong to the caller or the service.
pub struct HttpPromptStore {
    /// Base URL of the store API
    base_url: String,

    /// Public half of the credential pair (Basic auth username)
    public_key: String,

    /// Secret half of the credential pair (Basic auth password)
    secret_key: String,

    /// HTTP client
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpPromptStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPromptStore")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpPromptStore {
    /// Create a new HTTP store client with the default request timeout.
    pub fn new(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> AppResult<Self> {
        Self::with_timeout(
            base_url,
            public_key,
            secret_key,
            config::DEFAULT_TIMEOUT_SECS,
        )
    }

    /// Create a new HTTP store client with a custom request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        public_key: impl Into<String>,
        secret_key: impl Into<String>,
        timeout_secs: u64,
    ) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AppError::Upstream(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            client,
        })
    }

    /// Convert a wire payload into a `StoredPrompt`.
    fn convert_prompt(&self, wire: WirePrompt) -> AppResult<StoredPrompt> {
        let template = match wire.prompt {
            serde_json::Value::String(text) => text,
            other => {
                let kind = wire.prompt_type.as_deref().unwrap_or_else(|| {
                    if other.is_array() {
                        "chat"
                    } else {
                        "unknown"
                    }
                });
                return Err(AppError::Upstream(format!(
                    "Unsupported prompt payload for '{}': type '{}' (only text prompts can be compiled)",
                    wire.name, kind
                )));
            }
        };

        Ok(StoredPrompt {
            name: wire.name,
            version: wire.version,
            template,
            labels: wire.labels,
        })
    }
}

#[async_trait::async_trait]
impl PromptStore for HttpPromptStore {
    fn store_name(&self) -> &str {
        "http"
    }

    async fn get_prompt(&self, name: &str, label: &str) -> AppResult<StoredPrompt> {
        let url = format!("{}/api/public/v2/prompts/{}", self.base_url, name);
        tracing::debug!("Fetching prompt '{}' (label '{}') from {}", name, label, url);

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.public_key, Some(&self.secret_key))
            .query(&[("label", label)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Request to prompt store failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::NotFound {
                name: name.to_string(),
                label: label.to_string(),
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = extract_error_message(&body)
                .unwrap_or_else(|| "Prompt store request failed".to_string());
            return Err(AppError::Upstream(format!(
                "Store API error ({}): {}",
                status, message
            )));
        }

        let wire: WirePrompt = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse store response: {}", e)))?;

        tracing::info!("Fetched prompt '{}' v{}", wire.name, wire.version);

        self.convert_prompt(wire)
    }
}

/// Pull a human-readable message out of an API error body.
fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(parsed) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    parsed
        .get("message")
        .or_else(|| parsed.get("error"))
        .and_then(|value| value.as_str())
        .map(ToOwned::to_owned)
        .or_else(|| Some(trimmed.to_string()))
}
