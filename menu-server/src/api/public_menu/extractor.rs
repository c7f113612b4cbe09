//! 菜单查询参数提取器

use axum::extract::{FromRequestParts, Query};
use http::request::Parts;

use crate::utils::AppError;
use shared::MenuQuery;

/// [`MenuQuery`] 提取器
///
/// 查询串无法解析时 (例如重复的 key) 返回 `InvalidRequest` 响应体，
/// 而不是 axum 默认的纯文本 400。
pub struct MenuParams(pub MenuQuery);

impl<S> FromRequestParts<S> for MenuParams
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<MenuQuery>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::invalid_request(rejection.body_text())
                    .with_detail("query", parts.uri.query().unwrap_or_default())
            })?;
        Ok(Self(query))
    }
}
