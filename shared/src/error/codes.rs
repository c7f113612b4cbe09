//! Numeric error codes carried in failure envelopes
//!
//! The ranges group codes by what failed:
//! - 0xxx: request level (validation, malformed parameters)
//! - 3xxx: restaurant lookup
//! - 6xxx: menu content
//! - 9xxx: server side, never caused by the caller

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code as sent over the wire (`"code": 3001`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    Success = 0,
    ValidationFailed = 2,
    NotFound = 3,
    /// Malformed query string or an out-of-range parameter such as `limit`
    InvalidRequest = 5,

    /// No active restaurant with this slug
    RestaurantNotFound = 3001,

    /// Category unknown, inactive or owned by another restaurant
    CategoryNotFound = 6101,

    InternalError = 9001,
    DatabaseError = 9002,
    /// Client side only: the server could not be reached
    NetworkError = 9003,
    /// Request exceeded its deadline
    TimeoutError = 9004,
    /// Data migration failed and its rows were restored
    MigrationFailed = 9006,
}

impl ErrorCode {
    const ALL: [ErrorCode; 11] = [
        Self::Success,
        Self::ValidationFailed,
        Self::NotFound,
        Self::InvalidRequest,
        Self::RestaurantNotFound,
        Self::CategoryNotFound,
        Self::InternalError,
        Self::DatabaseError,
        Self::NetworkError,
        Self::TimeoutError,
        Self::MigrationFailed,
    ];

    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// 9xxx: the failure is on the server side; details stay in the logs
    #[inline]
    pub const fn is_system(&self) -> bool {
        self.code() >= 9000
    }

    /// Default message when no specific one is given
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Success => "OK",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::RestaurantNotFound => "Restaurant not found",
            Self::CategoryNotFound => "Category not found",
            Self::InternalError => "Internal server error",
            Self::DatabaseError => "Database error",
            Self::NetworkError => "Menu service unreachable",
            Self::TimeoutError => "Request timed out",
            Self::MigrationFailed => "Data migration failed",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// A `code` value this build does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown error code {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
