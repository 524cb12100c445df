use async_trait::async_trait;

use crate::domain::ContactMessage;

/// Outbound channel delivering contact messages to one fixed mailbox.
///
/// Delivery is a single synchronous attempt; callers do not retry.
#[async_trait]
pub trait ContactNotifier: Send + Sync {
    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), NotifyError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Transport failed: {0}")]
    Transport(String),
}
