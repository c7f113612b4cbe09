//! Public Menu API Handlers

use axum::extract::{Path, State};

use super::extractor::MenuParams;
use crate::core::ServerState;
use crate::services::MenuPayload;
use crate::utils::{AppError, AppResponse, AppResult};
use shared::models::is_valid_slug;

/// GET /api/public/menu/{slug} - 按模式返回公共菜单
///
/// 模式优先级: lazy (需 categoryId) > lite > full
pub async fn get_menu(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
    MenuParams(query): MenuParams,
) -> AppResult<AppResponse<MenuPayload>> {
    // 非法 slug 不可能存在，直接按未找到处理
    if !is_valid_slug(&slug) {
        return Err(AppError::restaurant_not_found(&slug));
    }

    let mode = query.mode()?;
    tracing::debug!(slug = %slug, mode = mode.name(), "Public menu request");

    let payload = state.menu.menu(&slug, &mode).await?;
    Ok(AppResponse::success(payload))
}
