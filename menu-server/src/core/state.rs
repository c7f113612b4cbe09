use sqlx::SqlitePool;

use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::services::{HttpService, MenuService};

/// 服务器状态 - 持有所有服务的共享引用
///
/// 所有字段都是廉价克隆 (连接池内部为 Arc)，每个请求拿到一份拷贝。
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | pool | SqlitePool | SQLite 连接池 |
/// | menu | MenuService | 公共菜单分级服务 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// SQLite 连接池
    pub pool: SqlitePool,
    /// 公共菜单服务
    pub menu: MenuService,
}

impl ServerState {
    /// 使用已迁移的连接池构造状态
    ///
    /// 通常使用 [`ServerState::initialize`] 代替；测试中配合内存数据库使用
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let menu = MenuService::new(pool.clone(), config.lite_product_cap);
        Self { config, pool, menu }
    }

    /// 初始化服务器状态
    ///
    /// 1. 创建工作目录结构
    /// 2. 打开数据库并执行结构迁移与数据迁移
    /// 3. 构造服务
    pub async fn initialize(config: &Config) -> Result<Self> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| ServerError::Config(format!("Failed to create work directory: {e}")))?;

        let database_url = config.database_url();
        let db = DbService::new(&database_url).await.map_err(|e| {
            if e.code == shared::ErrorCode::MigrationFailed {
                ServerError::Migration(e.to_string())
            } else {
                ServerError::Database(e.to_string())
            }
        })?;

        tracing::info!(
            lite_product_cap = config.lite_product_cap,
            environment = %config.environment,
            "Server state initialized"
        );

        Ok(Self::new(config.clone(), db.pool))
    }

    /// 带状态和中间件的完整路由
    pub fn router(&self) -> axum::Router {
        crate::services::http::build_router(self.clone())
    }

    /// HTTP 服务
    pub fn http_service(&self) -> HttpService {
        HttpService::new(self.clone())
    }
}
