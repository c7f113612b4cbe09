//! Client error types

use shared::ErrorCode;
use std::time::Duration;
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Request could not be sent or the connection failed
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// No complete response within the configured timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Body is not a valid response envelope
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Unknown restaurant or category
    #[error("Not found: {0}")]
    NotFound(String),

    /// Server rejected the request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other failure reported by the server
    ///
    /// `status` is the status the failure is classified by: the HTTP status,
    /// or the code's own status when the server failed inside a 200.
    #[error("Server error ({status}): {message}")]
    Server {
        status: u16,
        code: Option<u16>,
        message: String,
    },

    /// Caller passed an argument that cannot form a request
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClientError {
    /// Error code for this failure
    ///
    /// Server failures carry the code from the body; transport failures and
    /// timeouts map to the matching 9xxx code.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Server { code: Some(code), .. } => ErrorCode::try_from(*code).ok(),
            Self::Transport(_) => Some(ErrorCode::NetworkError),
            Self::Timeout(_) => Some(ErrorCode::TimeoutError),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
