//! Client-side error taxonomy.

use thiserror::Error;

/// Error from an account operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the request. `code` is the stable
    /// machine-readable identifier from the `{"code": ..., "message": ...}`
    /// error body; match on it, never on the message text.
    #[error("HTTP {status}: {message}")]
    Server {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// An authenticated operation was attempted without a token. Raised
    /// locally, before any network I/O.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Connection, TLS, or timeout failure.
    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    /// A request or response body failed to (de)serialize.
    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// The server's error code, when this is a remote rejection that
    /// carried one.
    pub fn code(&self) -> Option<&str> {
        match self {
            ApiError::Server { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Error from the session persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}
