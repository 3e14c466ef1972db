//! Error types for the client surface.
//!
//! Nothing past startup is fatal: render paths are infallible and network
//! failures leave the last-known-good view on screen.

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid endpoint url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("join handshake rejected: {0}")]
    Join(String),
}

impl ClientError {
    pub fn join(msg: impl Into<String>) -> Self {
        Self::Join(msg.into())
    }
}
