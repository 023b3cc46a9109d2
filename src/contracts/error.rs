use thiserror::Error;

#[derive(Error, Debug)]
pub enum SequenceError {
    #[error("Failed to persist sequence: {0}")]
    PersistFailed(String),

    #[error("Counter state unreadable: {0}")]
    Unreadable(String),

    #[error("Sequence overflow")]
    Overflow,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("SMTP transport error: {0}")]
    Transport(String),

    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}
