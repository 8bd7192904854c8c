//! Webhook bindings for Rust
//! Posts `value1`/`value2`/`value3` JSON payloads to IFTTT-style webhook endpoints

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum WebhookError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Invalid webhook URL: {0}")]
    InvalidUrl(String),
    #[error("Webhook rejected with status {0}")]
    Rejected(StatusCode),
}

/// The three-value payload understood by IFTTT maker webhooks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub value1: String,
    pub value2: String,
    pub value3: String,
}

impl WebhookPayload {
    pub fn new(
        value1: impl Into<String>,
        value2: impl Into<String>,
        value3: impl Into<String>,
    ) -> Self {
        Self {
            value1: value1.into(),
            value2: value2.into(),
            value3: value3.into(),
        }
    }
}

pub struct WebhookClient {
    url: String,
    client: Client,
}

impl WebhookClient {
    pub fn new(url: &str) -> Result<Self, WebhookError> {
        Self::build(url, None)
    }

    /// Same as [`WebhookClient::new`] but every request gives up after `timeout`
    pub fn with_timeout(url: &str, timeout: Duration) -> Result<Self, WebhookError> {
        Self::build(url, Some(timeout))
    }

    fn build(url: &str, timeout: Option<Duration>) -> Result<Self, WebhookError> {
        let url = url.trim();
        let parsed = Url::parse(url).map_err(|e| WebhookError::InvalidUrl(format!("{}: {}", url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(WebhookError::InvalidUrl(url.to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            url: url.to_string(),
            client: builder.build()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Host part of the URL, safe to log (the path carries the maker key)
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// Post a payload once. Any non-2xx status is an error; the body is ignored.
    pub async fn send(&self, payload: &WebhookPayload) -> Result<StatusCode, WebhookError> {
        let response = self.client.post(&self.url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WebhookError::Rejected(status));
        }

        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_http_url() {
        let err = WebhookClient::new("ftp://example.com/hook").err().unwrap();
        assert!(matches!(err, WebhookError::InvalidUrl(_)));
    }

    #[test]
    fn test_rejects_unparseable_url() {
        for url in ["not a url", "https://", "mailto:ops@example.com"] {
            let err = WebhookClient::new(url).err().unwrap();
            assert!(matches!(err, WebhookError::InvalidUrl(_)), "{}", url);
        }
    }

    #[test]
    fn test_host_hides_path() {
        let client = WebhookClient::new("https://maker.ifttt.com/trigger/news/with/key/secret").unwrap();
        assert_eq!(client.host().as_deref(), Some("maker.ifttt.com"));
    }

    #[test]
    fn test_accepts_https_url() {
        let client = WebhookClient::new(" https://maker.ifttt.com/trigger/news/with/key/abc ").unwrap();
        assert_eq!(client.url(), "https://maker.ifttt.com/trigger/news/with/key/abc");
    }

    #[test]
    fn test_payload_serializes_value_fields() {
        let payload = WebhookPayload::new("a", "b", "c");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, serde_json::json!({"value1": "a", "value2": "b", "value3": "c"}));
    }
}
