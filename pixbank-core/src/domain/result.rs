//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Everything the backend or the network can do wrong is folded into
/// [`Error::Http`]. The remaining variants are local: configuration,
/// session storage and routing.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport or backend failure, carrying whatever the backend returned.
    /// `status` is `None` when no response was received at all.
    #[error("{message}")]
    Http {
        status: Option<u16>,
        body: String,
        message: String,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create an error for a response with a non-success status
    pub fn backend(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        let message = if body.trim().is_empty() {
            format!("Backend returned HTTP {}", status)
        } else {
            format!("Backend returned HTTP {}: {}", status, body.trim())
        };
        Self::Http {
            status: Some(status),
            body,
            message,
        }
    }

    /// Create an error for a request that never got a response
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Http {
            status: None,
            body: String::new(),
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// HTTP status returned by the backend, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => *status,
            _ => None,
        }
    }

    /// True when the backend rejected the bearer credential
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
