//! Error handling for fluent-rest

use thiserror::Error;

/// Failures produced while performing an exchange.
///
/// `ReqwestTransport` only ever produces [`TransportError::Http`]; the other
/// variants exist for custom [`Transport`](crate::http::Transport)
/// implementations.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Network timeout")]
    Timeout,

    #[error("Transport error: {0}")]
    Other(String),
}

/// Main error type for fluent-rest operations
#[derive(Error, Debug)]
pub enum RestError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Cannot deserialize {media_type} response body: {message}")]
    Deserialization { media_type: String, message: String },

    #[error("Cannot serialize request entity: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SSL/TLS error: {0}")]
    Ssl(String),

    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl RestError {
    /// Whether this error came from the transport rather than the builder.
    pub fn is_transport(&self) -> bool {
        matches!(self, RestError::Transport(_))
    }
}

/// Result type alias for fluent-rest operations
pub type Result<T> = std::result::Result<T, RestError>;
