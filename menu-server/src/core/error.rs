use thiserror::Error;

/// 服务器启动与运行错误
///
/// 请求级错误使用 [`crate::utils::AppError`]，这里只覆盖进程生命周期。
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("数据库初始化失败: {0}")]
    Database(String),

    #[error("数据迁移失败: {0}")]
    Migration(String),

    #[error("内部服务器错误")]
    Internal(#[from] anyhow::Error),
}

/// 服务器生命周期 Result 类型别名
pub type Result<T> = std::result::Result<T, ServerError>;
