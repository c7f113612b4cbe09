//! Demo Request Repository
//!
//! Status is written as a raw string so legacy values can be seeded and
//! remapped by data migrations.

use super::{RepoError, RepoResult};
use shared::models::DemoRequest;
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, name, email, restaurant_name, status, notes, created_at, updated_at";

pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    restaurant_name: Option<&str>,
    status: &str,
) -> RepoResult<DemoRequest> {
    let now = now_millis();
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO demo_request (name, email, restaurant_name, status, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(email)
    .bind(restaurant_name)
    .bind(status)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create demo request".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DemoRequest>> {
    let request = sqlx::query_as::<_, DemoRequest>(&format!(
        "SELECT {COLUMNS} FROM demo_request WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(request)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DemoRequest>> {
    let requests =
        sqlx::query_as::<_, DemoRequest>(&format!("SELECT {COLUMNS} FROM demo_request ORDER BY id"))
            .fetch_all(pool)
            .await?;
    Ok(requests)
}
