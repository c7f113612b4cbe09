//! Public Menu API 模块
//!
//! 扫码点餐的公共菜单入口，无需认证。
//!
//! | 请求 | 模式 |
//! |------|------|
//! | GET /api/public/menu/{slug} | full |
//! | GET /api/public/menu/{slug}?lite=true | lite |
//! | GET /api/public/menu/{slug}?lazy=true&categoryId={id}[&limit={n}] | lazy |

mod extractor;
mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public/menu", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/{slug}", get(handler::get_menu))
}
