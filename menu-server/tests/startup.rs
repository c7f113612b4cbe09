// menu-server/tests/startup.rs
// 启动流程测试: 工作目录、文件数据库、迁移

use menu_server::db::repository::demo_request;
use menu_server::db::{DbService, data_migration};
use menu_server::{Config, ServerState};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> Config {
    let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
    config.database_url = None;
    config
}

#[tokio::test]
async fn initialize_creates_database_in_work_dir() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);

    let state = ServerState::initialize(&config).await.unwrap();
    assert!(config.database_dir().join("menu.db").exists());

    for m in data_migration::BUILTIN {
        assert!(data_migration::is_applied(&state.pool, m.version).await.unwrap());
    }
}

#[tokio::test]
async fn legacy_statuses_fixed_on_restart() {
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    let url = config.database_url();

    // First boot records the built-in migrations on an empty table
    let db = DbService::new(&url).await.unwrap();
    demo_request::create(&db.pool, "Ana", "ana@example.com", None, "scheduled")
        .await
        .unwrap();
    sqlx::query("DELETE FROM data_migration")
        .execute(&db.pool)
        .await
        .unwrap();
    db.pool.close().await;

    // Second boot applies them again to the legacy row
    let db = DbService::new(&url).await.unwrap();
    let rows = demo_request::find_all(&db.pool).await.unwrap();
    assert_eq!(rows[0].status, "SCHEDULED");
}
