//! Error types for fmxml.

use crate::gateway::GatewayError;
use thiserror::Error;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors that can occur while talking to the gateway.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The gateway answered with a non-success code.
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Network or transport error below the gateway level.
    #[error("transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The response envelope is missing data the normalizer needs.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// The configured server address is not a valid URL.
    #[error("invalid server url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// Creates a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Returns the gateway code, if this error came from the gateway.
    pub fn gateway_code(&self) -> Option<i64> {
        match self {
            ClientError::Gateway(err) => Some(err.code()),
            _ => None,
        }
    }

    /// Returns true if this is the gateway's "no records match" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Gateway(err) if err.is_no_records())
    }
}
