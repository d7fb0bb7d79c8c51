//! Fire-and-forget notification boundary.
//!
//! The lifecycle flow emits a "billing sent" event when a billing moves to
//! `Sent`. Delivery is best-effort: callers log failures and never let them
//! fail the status update itself.

use async_trait::async_trait;

use crate::types::BillingId;

/// Errors raised by a notification backend.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// The notification backend rejected or failed to deliver the event.
    #[error("Notification delivery failed: {0}")]
    Delivery(String),
}

/// Outbound notification collaborator.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Notifies interested parties that a billing was sent to the client.
    async fn notify_sent(&self, billing_id: BillingId) -> Result<(), NotifyError>;
}

/// Notifier that records events in the application log.
///
/// Stand-in backend for development and tests; a real deployment wires an
/// email or webhook implementation here.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify_sent(&self, billing_id: BillingId) -> Result<(), NotifyError> {
        tracing::info!(billing_id = %billing_id, "billing sent notification");
        Ok(())
    }
}
