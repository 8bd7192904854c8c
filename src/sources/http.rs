use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::NewsItem;
use crate::errors::{WatcherError, WatcherResult};
use crate::sources::traits::CollectionSource;

/// Polls a JSON API with a POST request and reads the list under `list_field`
pub struct HttpCollectionSource {
    client: Client,
    url: String,
    body: String,
    list_field: String,
}

impl HttpCollectionSource {
    pub fn new(
        url: &str,
        body: &Value,
        list_field: &str,
        timeout: Option<Duration>,
    ) -> WatcherResult<Self> {
        let mut builder = Client::builder().default_headers(Self::headers());
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            url: url.to_string(),
            body: serde_json::to_string(body)?,
            list_field: list_field.to_string(),
        })
    }

    fn headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/json, text/plain, */*"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        headers
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CollectionSource for HttpCollectionSource {
    async fn fetch(&self) -> WatcherResult<Vec<NewsItem>> {
        let response = self
            .client
            .post(&self.url)
            .body(self.body.clone())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WatcherError::Status(status));
        }

        let text = response.text().await?;
        debug!(bytes = text.len(), url = %self.url, "Received response");

        parse_items(&text, &self.list_field)
    }
}

/// Extract the item list from a response body.
///
/// A missing or `null` list field yields an empty list. Entries that are not
/// JSON objects are skipped.
pub fn parse_items(body: &str, list_field: &str) -> WatcherResult<Vec<NewsItem>> {
    let value: Value = serde_json::from_str(body)?;

    let Value::Object(mut root) = value else {
        return Err(WatcherError::MalformedResponse(
            "response is not a JSON object".to_string(),
        ));
    };

    let entries = match root.remove(list_field) {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(entries)) => entries,
        Some(_) => {
            return Err(WatcherError::MalformedResponse(format!(
                "field `{}` is not a list",
                list_field
            )))
        }
    };

    let total = entries.len();
    let items: Vec<NewsItem> = entries.into_iter().filter_map(NewsItem::from_value).collect();

    if items.len() < total {
        warn!(skipped = total - items.len(), "Skipped non-object entries in response");
    }

    Ok(items)
}
