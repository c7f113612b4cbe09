//! 工具模块 - 通用工具函数和类型
//!
//! # 内容
//!
//! - [`AppError`] - 应用错误类型 (from shared::error)
//! - [`AppResponse`] - API 响应结构 (from shared::response)
//! - 日志初始化

pub mod logger;

pub use shared::error::{AppError, AppResult, ErrorCode};
pub use shared::response::AppResponse;
