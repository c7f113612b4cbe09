//! Errors shared by menu-server and menu-client
//!
//! The server renders an [`AppError`] as a failure envelope; the client reads
//! the numeric [`ErrorCode`] back to classify it.
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::invalid_request("limit must be a positive integer")
//!     .with_detail("field", "limit");
//! assert_eq!(err.code, ErrorCode::InvalidRequest);
//! assert_eq!(err.http_status(), shared::http::StatusCode::BAD_REQUEST);
//! ```

mod codes;
mod http;
mod types;

pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult};
