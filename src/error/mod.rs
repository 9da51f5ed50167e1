use thiserror::Error;

use crate::client::TransportError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Failure reported by the HTTP transport, surfaced with its own message.
    #[error(transparent)]
    Transport(TransportError),

    #[error("API request failed: {status} {status_text}")]
    ApiRequest { status: u16, status_text: String },

    #[error("Error POSTing to endpoint: {status} {status_text} — {body}")]
    UpdateFailed {
        status: u16,
        status_text: String,
        body: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn transport(err: impl Into<TransportError>) -> Self {
        Self::Transport(err.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequest { status, .. } | Self::UpdateFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
