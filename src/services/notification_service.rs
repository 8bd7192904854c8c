use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};
use webhook::{WebhookClient, WebhookPayload};

use crate::domain::Alert;
use crate::errors::WatcherResult;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertSink: Send + Sync {
    async fn deliver(&self, payload: &WebhookPayload) -> WatcherResult<()>;
}

/// Delivers alerts to a webhook with a single POST
pub struct WebhookAlertSink {
    client: WebhookClient,
}

impl WebhookAlertSink {
    pub fn new(url: &str, timeout: Option<Duration>) -> WatcherResult<Self> {
        let client = match timeout {
            Some(timeout) => WebhookClient::with_timeout(url, timeout)?,
            None => WebhookClient::new(url)?,
        };

        Ok(Self { client })
    }

    /// Webhook host for logging; the full URL embeds the maker key
    pub fn host(&self) -> Option<String> {
        self.client.host()
    }
}

#[async_trait]
impl AlertSink for WebhookAlertSink {
    async fn deliver(&self, payload: &WebhookPayload) -> WatcherResult<()> {
        self.client.send(payload).await?;
        Ok(())
    }
}

pub struct NotificationService<A: AlertSink> {
    sink: Option<A>,
}

impl<A: AlertSink> NotificationService<A> {
    pub fn new(sink: Option<A>) -> Self {
        Self { sink }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Send one alert, no retry. Returns whether it was delivered.
    /// Skipped silently when no sink is configured.
    pub async fn notify(&self, alert: &Alert) -> bool {
        let Some(sink) = &self.sink else {
            return false;
        };

        match sink.deliver(&alert.to_payload()).await {
            Ok(()) => {
                info!("Webhook sent successfully");
                true
            }
            Err(e) => {
                warn!(error = %e, "Webhook failed");
                false
            }
        }
    }
}
