//! [`AppError`] and its axum rendering

use super::codes::ErrorCode;
use crate::response::AppResponse;
use http::StatusCode;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Request-level failure: a code, the message shown to the caller and
/// optional structured context (`slug`, `categoryId`, ...)
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        let what = what.into();
        Self::with_message(ErrorCode::NotFound, format!("{what} not found")).with_detail("resource", what)
    }

    /// Unknown, inactive or malformed slug
    pub fn restaurant_not_found(slug: &str) -> Self {
        Self::with_message(
            ErrorCode::RestaurantNotFound,
            format!("Restaurant '{slug}' not found"),
        )
        .with_detail("slug", slug)
    }

    /// Lazy request for a category the restaurant does not own
    pub fn category_not_found(slug: &str, category_id: impl Into<Value>) -> Self {
        Self::new(ErrorCode::CategoryNotFound)
            .with_detail("slug", slug)
            .with_detail("categoryId", category_id)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }

    pub fn migration_failed(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::MigrationFailed, msg)
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();

        // 系统错误只记录日志，响应体只带默认消息
        let body = if self.code.is_system() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed on server side");
            AppResponse::<()>::failure(&AppError::new(self.code))
        } else {
            AppResponse::<()>::failure(&self)
        };

        (status, axum::Json(body)).into_response()
    }
}
