//! HTTP mail relay notifier.

use async_trait::async_trait;
use serde::Serialize;

use quill_core::domain::ContactMessage;
use quill_core::ports::{ContactNotifier, NotifyError};

/// Outbound mail account and the fixed mailbox contact messages go to.
#[derive(Debug, Clone)]
pub struct MailConfig {
    /// Relay endpoint accepting JSON messages.
    pub relay_url: String,
    pub username: String,
    pub password: Option<String>,
    pub recipient: String,
}

impl MailConfig {
    /// `None` when `MAIL_RELAY_URL` is unset.
    pub fn from_env() -> Option<Self> {
        let relay_url = std::env::var("MAIL_RELAY_URL").ok()?;
        let username = std::env::var("MAIL_USERNAME").unwrap_or_default();
        let recipient = std::env::var("CONTACT_RECIPIENT").unwrap_or_else(|_| username.clone());

        Some(Self {
            relay_url,
            username,
            password: std::env::var("MAIL_PASSWORD").ok(),
            recipient,
        })
    }
}

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: String,
}

/// Sends contact messages through an HTTP mail relay, one attempt per message.
pub struct HttpMailRelay {
    client: reqwest::Client,
    config: MailConfig,
}

impl HttpMailRelay {
    pub fn new(config: MailConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ContactNotifier for HttpMailRelay {
    async fn send_contact_message(&self, message: &ContactMessage) -> Result<(), NotifyError> {
        let payload = RelayMessage {
            from: &self.config.username,
            to: &self.config.recipient,
            subject: ContactMessage::SUBJECT,
            text: message.body(),
        };

        self.client
            .post(&self.config.relay_url)
            .basic_auth(&self.config.username, self.config.password.as_ref())
            .json(&payload)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        Ok(())
    }
}
