//! Operator notification gateway.
//!
//! Exposes the [`Notifier`] capability the lifecycle engine talks to and
//! the Slack incoming-webhook implementation behind it. Delivery is
//! strictly fire-and-forget: a lost notification is acceptable, a blocked
//! or failed slot operation is not.

pub mod notifier;
pub mod slack;

pub use notifier::Notifier;
pub use slack::SlackWebhook;
