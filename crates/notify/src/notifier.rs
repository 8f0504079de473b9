//! Notification capability contract.

use async_trait::async_trait;

/// Outbound operator-notification channel.
///
/// Implementations deliver on a best-effort basis and swallow their own
/// failures (logging them), so callers can sequence a notification after
/// a state change without ever being blocked or rolled back by it.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a plain-text message. Never raises.
    async fn send(&self, message: &str);
}
