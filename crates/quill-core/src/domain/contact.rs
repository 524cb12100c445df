use serde::{Deserialize, Serialize};

use super::require;
use crate::error::DomainError;

/// A contact-form submission relayed to the site owner's mailbox.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactMessage {
    pub const SUBJECT: &'static str = "New Contact Message";

    pub fn validate(&self) -> Result<(), DomainError> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require("phone", &self.phone)?;
        require("message", &self.message)?;
        Ok(())
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nPhone: {}\nMessage: {}",
            self.name, self.email, self.phone, self.message
        )
    }

    /// Plain-text mail with a subject header line.
    pub fn render(&self) -> String {
        format!("Subject: {}\n\n{}", Self::SUBJECT, self.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render() {
        let msg = ContactMessage {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: "555".to_string(),
            message: "Hello".to_string(),
        };

        assert_eq!(
            msg.render(),
            "Subject: New Contact Message\n\nName: Ann\nEmail: ann@example.com\nPhone: 555\nMessage: Hello"
        );
    }
}
