//! Status code each error code is served with

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,
            Self::ValidationFailed | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound | Self::RestaurantNotFound | Self::CategoryNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::TimeoutError => StatusCode::REQUEST_TIMEOUT,
            // transient, worth a retry
            Self::NetworkError => StatusCode::SERVICE_UNAVAILABLE,
            Self::InternalError | Self::DatabaseError | Self::MigrationFailed => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
