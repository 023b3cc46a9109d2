use std::future::Future;

use crate::contracts::error::MailError;

/// A rendered email ready for transport.
#[derive(Debug, Clone)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    /// Plain-text body for clients that do not render HTML.
    pub text: String,
    pub html: String,
}

/// Outbound mail transport.
pub trait Mailer: Send + Sync {
    /// Sends a single email. Returns only after the transport has accepted
    /// or rejected the message.
    fn send(&self, email: &OutboundEmail) -> impl Future<Output = Result<(), MailError>> + Send;
}
