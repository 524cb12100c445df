use std::sync::Arc;

use crate::domain::ContactMessage;
use crate::error::DomainError;
use crate::ports::{ContactNotifier, NotifyError};

/// Validates contact-form submissions and hands them to the notifier.
pub struct ContactService {
    notifier: Arc<dyn ContactNotifier>,
}

impl ContactService {
    pub fn new(notifier: Arc<dyn ContactNotifier>) -> Self {
        Self { notifier }
    }

    /// One delivery attempt; a transport failure is returned, not retried.
    pub async fn submit(&self, message: ContactMessage) -> Result<(), DomainError> {
        message.validate()?;

        self.notifier
            .send_contact_message(&message)
            .await
            .map_err(|NotifyError::Transport(reason)| {
                tracing::warn!(%reason, "Contact message delivery failed");
                DomainError::Transport(reason)
            })?;

        tracing::info!("Contact message delivered");
        Ok(())
    }
}
