//! HTTP API 路由
//!
//! | 模块 | 路径 |
//! |------|------|
//! | [`health`] | /health, /health/detailed |
//! | [`public_menu`] | /api/public/menu/{slug} |

pub mod health;
pub mod public_menu;
