//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{Restaurant, RestaurantCreate, is_valid_slug};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteExecutor;

const COLUMNS: &str = "id, slug, name, description, logo_url, is_active";

/// Active restaurant by public slug
pub async fn find_by_slug<'e>(
    db: impl SqliteExecutor<'e>,
    slug: &str,
) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE slug = ? AND is_active = 1"
    ))
    .bind(slug)
    .fetch_optional(db)
    .await?;
    Ok(restaurant)
}

async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let restaurant = sqlx::query_as::<_, Restaurant>(&format!(
        "SELECT {COLUMNS} FROM restaurant WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(restaurant)
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    if !is_valid_slug(&data.slug) {
        return Err(RepoError::Validation(format!(
            "Invalid restaurant slug '{}'",
            data.slug
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO restaurant (slug, name, description, logo_url) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(&data.slug)
    .bind(&data.name)
    .bind(&data.description)
    .bind(&data.logo_url)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE restaurant SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    Ok(())
}
