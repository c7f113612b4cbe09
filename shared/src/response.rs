//! API response envelope
//!
//! Every public menu response is wrapped in the same envelope:
//! ```json
//! { "success": true, "data": { ... } }
//! { "success": false, "error": "Restaurant 'x' not found", "code": 3001 }
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{AppError, ErrorCode};

/// `{ success, data, error }` response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppResponse<T> {
    /// Discriminant: `false` means `data` must not be used
    pub success: bool,
    /// Payload (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable error message (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Numeric error code (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Additional error details (present on failure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> AppResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            code: None,
            details: None,
        }
    }

    /// Create a failure response from an AppError
    pub fn failure(err: &AppError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.message.clone()),
            code: Some(err.code.code()),
            details: err.details.clone(),
        }
    }

    /// Typed error code of a failure body, if the server sent a known one
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.code.and_then(|c| ErrorCode::try_from(c).ok())
    }
}

impl<T> From<AppError> for AppResponse<T> {
    fn from(err: AppError) -> Self {
        Self::failure(&err)
    }
}

impl<T: Serialize> axum::response::IntoResponse for AppResponse<T> {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = if self.success {
            http::StatusCode::OK
        } else {
            self.error_code()
                .map(|c| c.http_status())
                .unwrap_or(http::StatusCode::INTERNAL_SERVER_ERROR)
        };

        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_serialize() {
        let response = AppResponse::success(42);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 42 }));
    }

    #[test]
    fn test_failure_serialize() {
        let err = AppError::restaurant_not_found("nope");
        let response = AppResponse::<()>::failure(&err);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["code"], 3001);
        assert_eq!(json["error"], "Restaurant 'nope' not found");
        assert_eq!(json["details"]["slug"], "nope");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_deserialize_minimal_failure() {
        let response: AppResponse<i32> =
            serde_json::from_str(r#"{"success":false,"error":"boom"}"#).unwrap();
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.as_deref(), Some("boom"));
        assert_eq!(response.error_code(), None);
    }

    #[test]
    fn test_error_code_roundtrip() {
        let response: AppResponse<i32> =
            serde_json::from_str(r#"{"success":false,"error":"x","code":6101}"#).unwrap();
        assert_eq!(response.error_code(), Some(ErrorCode::CategoryNotFound));
    }
}
