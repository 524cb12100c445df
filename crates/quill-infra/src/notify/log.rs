use async_trait::async_trait;

use quill_core::domain::ContactMessage;
use quill_core::ports::{ContactNotifier, NotifyError};

/// Log-only notifier - used in development when no mail relay is configured.
pub struct LogNotifier {
    recipient: String,
}

impl LogNotifier {
    pub fn new(recipient: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
        }
    }
}

#[async_trait]
impl ContactNotifier for LogNotifier {
    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = %self.recipient,
            subject = ContactMessage::SUBJECT,
            body = %message.body(),
            "Contact message (mail relay not configured)"
        );
        Ok(())
    }
}
