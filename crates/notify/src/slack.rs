//! Slack incoming-webhook notifier.
//!
//! [`SlackWebhook`] posts plain-text messages as `{"text": ...}` to the
//! URL in `SLACK_WEBHOOK_URL`. One attempt per message, no retry, no
//! queueing: a failed or unconfigured delivery is logged and dropped.

use std::time::Duration;

use async_trait::async_trait;

use crate::notifier::Notifier;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for a single webhook post.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote server returned a non-2xx status code.
    #[error("Webhook returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// SlackWebhook
// ---------------------------------------------------------------------------

/// Posts operator messages to a Slack-style incoming webhook.
///
/// The URL is optional: with none configured, every send logs an error
/// and returns, leaving slot operations fully functional.
pub struct SlackWebhook {
    client: reqwest::Client,
    webhook_url: Option<String>,
}

impl SlackWebhook {
    /// Create a webhook notifier with a pre-configured HTTP client.
    pub fn new(webhook_url: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self {
            client,
            webhook_url,
        }
    }

    /// Read the webhook URL from `SLACK_WEBHOOK_URL`. An unset or empty
    /// variable leaves the notifier in its unconfigured, log-only state.
    pub fn from_env() -> Self {
        let url = std::env::var("SLACK_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.is_empty());
        Self::new(url)
    }

    /// Execute a single POST request and check the response status.
    async fn try_send(&self, url: &str, message: &str) -> Result<(), WebhookError> {
        let payload = serde_json::json!({ "text": message });
        let response = self.client.post(url).json(&payload).send().await?;
        if !response.status().is_success() {
            return Err(WebhookError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for SlackWebhook {
    async fn send(&self, message: &str) {
        let Some(url) = self.webhook_url.as_deref() else {
            tracing::error!("SLACK_WEBHOOK_URL not configured, dropping notification");
            return;
        };
        if let Err(e) = self.try_send(url, message).await {
            // The URL embeds the webhook secret, so it stays out of the log.
            tracing::error!(error = %e, "Slack notification failed");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
