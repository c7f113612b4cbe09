//! Menu Server - 扫码点餐公共菜单服务
//!
//! # 架构概述
//!
//! - **数据库** (`db`): SQLite (sqlx)，结构迁移 + 版本化数据迁移
//! - **服务** (`services`): 菜单分级输出 (lite / full / lazy)、HTTP 服务
//! - **HTTP API** (`api`): 公共菜单与健康检查
//!
//! # 模块结构
//!
//! ```text
//! menu-server/src/
//! ├── core/          # 配置、状态、错误、服务器
//! ├── db/            # 连接池、仓储、数据迁移
//! ├── services/      # 菜单服务、HTTP 服务
//! ├── api/           # HTTP 路由和处理器
//! └── utils/         # 日志、错误类型
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use core::{Config, Server, ServerError, ServerState};
pub use services::{HttpService, MenuPayload, MenuService};
pub use utils::{AppError, AppResponse, AppResult, ErrorCode};

// Re-export logger functions
pub use utils::logger::init_logger_with_file;

/// 设置运行环境: 加载 .env 并初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    // .env 文件可选
    if let Err(e) = dotenv::dotenv()
        && !e.not_found()
    {
        return Err(e.into());
    }

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok().filter(|v| !v.is_empty());
    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __  ___
   /  |/  /__  ____  __  __
  / /|_/ / _ \/ __ \/ / / /
 / /  / /  __/ / / / /_/ /
/_/  /_/\___/_/ /_/\__,_/
    "#
    );
}
