//! Outbound mail transports.

mod retry;
mod templates;

pub use retry::{is_retryable_smtp_error, RetryConfig};
pub use templates::{company_email, customer_email, Branding};

use backon::Retryable;
use lettre::message::{Mailbox, MultiPart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::contracts::{MailError, Mailer, OutboundEmail};

/// SMTP configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub relay: String,
    pub username: String,
    pub password: String,
    /// Sender mailbox, e.g. `Metro DTW Sedan <no-reply@example.com>`.
    pub from: String,
}

impl SmtpConfig {
    /// Reads `RIDELINE_SMTP_RELAY`, `RIDELINE_SMTP_USER`,
    /// `RIDELINE_SMTP_PASS` and `RIDELINE_EMAIL_FROM`.
    /// Returns `None` when credentials are not set.
    pub fn from_env() -> Option<Self> {
        let username = std::env::var("RIDELINE_SMTP_USER").ok()?;
        let password = std::env::var("RIDELINE_SMTP_PASS").ok()?;
        Some(Self {
            relay: std::env::var("RIDELINE_SMTP_RELAY")
                .unwrap_or_else(|_| "smtp.gmail.com".into()),
            username,
            password,
            from: std::env::var("RIDELINE_EMAIL_FROM")
                .unwrap_or_else(|_| "no-reply@ridebooking.com".into()),
        })
    }
}

/// SMTP mailer with exponential-backoff retry on transient failures.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    retry: RetryConfig,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig, retry: RetryConfig) -> Result<Self, MailError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)
            .map_err(|e| MailError::Transport(e.to_string()))?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;
        Ok(Self {
            transport,
            from,
            retry,
        })
    }

    fn build_message(&self, email: &OutboundEmail) -> Result<Message, MailError> {
        let to = email
            .to
            .parse::<Mailbox>()
            .map_err(|e| MailError::InvalidMessage(e.to_string()))?;
        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.clone())
            .multipart(MultiPart::alternative_plain_html(
                email.text.clone(),
                email.html.clone(),
            ))
            .map_err(|e| MailError::InvalidMessage(e.to_string()))
    }
}

impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;

        (|| async { self.transport.send(message.clone()).await })
            .retry(self.retry.backoff())
            .when(|e| is_retryable_smtp_error(&e.to_string()))
            .notify(|err, dur| {
                tracing::warn!(
                    to = %email.to,
                    error = %err,
                    retry_in = ?dur,
                    "SMTP send failed, retrying"
                );
            })
            .await
            .map(|_| ())
            .map_err(|e| MailError::Transport(e.to_string()))
    }
}

/// Logs and drops mail; used when SMTP credentials are not configured.
pub struct NoopMailer;

impl Mailer for NoopMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject,
            "SMTP not configured, dropping outbound email"
        );
        Ok(())
    }
}

/// Dispatches to the configured mail transport.
pub enum MailerBackend {
    Smtp(SmtpMailer),
    Noop(NoopMailer),
}

impl MailerBackend {
    /// Builds the backend from the environment: SMTP when credentials are
    /// present, otherwise the logging no-op.
    pub fn from_env() -> Result<Self, MailError> {
        match SmtpConfig::from_env() {
            Some(config) => Ok(Self::Smtp(SmtpMailer::new(&config, RetryConfig::from_env())?)),
            None => {
                tracing::info!("SMTP not configured, outbound email disabled");
                Ok(Self::Noop(NoopMailer))
            }
        }
    }
}

impl Mailer for MailerBackend {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailError> {
        match self {
            Self::Smtp(mailer) => mailer.send(email).await,
            Self::Noop(mailer) => mailer.send(email).await,
        }
    }
}
