//! Error types for qbot.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Telegram error: {0}")]
    Telegram(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Liveness probe failed: {0}")]
    Liveness(String),

    #[error("Connection lost: {0}")]
    Link(String),

    #[error("Failed to deliver notification: {0}")]
    Notify(String),

    #[error("Failed to persist queue: {0}")]
    Persist(String),

    #[error("Dispatch engine has stopped")]
    Stopped,

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Errors that end the dispatch loop instead of being logged and skipped.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::Liveness(_) | Error::Link(_) | Error::Stopped)
    }
}

impl From<teloxide::RequestError> for Error {
    fn from(e: teloxide::RequestError) -> Self {
        Error::Telegram(e.to_string())
    }
}
