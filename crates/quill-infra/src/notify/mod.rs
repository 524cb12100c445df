//! Contact message notifiers.

mod log;
#[cfg(feature = "mail")]
mod relay;

pub use log::LogNotifier;
#[cfg(feature = "mail")]
pub use relay::{HttpMailRelay, MailConfig};
