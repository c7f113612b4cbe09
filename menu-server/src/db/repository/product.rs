//! Product Repository
//!
//! Public reads only ever return available products, ordered by
//! `sort_order` then id inside their category.

use super::{RepoError, RepoResult};
use shared::models::{Product, ProductCreate};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteExecutor;
use std::collections::HashMap;

const COLUMNS: &str = "id, category_id, name, description, price, image, is_available, sort_order";

/// Available products of one category, optionally truncated
pub async fn find_available_by_category<'e>(
    db: impl SqliteExecutor<'e>,
    category_id: i64,
    limit: Option<usize>,
) -> RepoResult<Vec<Product>> {
    // SQLite treats a negative LIMIT as "no limit"
    let limit = limit.map(|n| n as i64).unwrap_or(-1);
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM product WHERE category_id = ? AND is_available = 1 ORDER BY sort_order, id LIMIT ?"
    ))
    .bind(category_id)
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(products)
}

pub async fn count_available_by_category<'e>(
    db: impl SqliteExecutor<'e>,
    category_id: i64,
) -> RepoResult<usize> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM product WHERE category_id = ? AND is_available = 1",
    )
    .bind(category_id)
    .fetch_one(db)
    .await?;
    Ok(count as usize)
}

/// Every available product under the restaurant's active categories
pub async fn find_available_by_restaurant<'e>(
    db: impl SqliteExecutor<'e>,
    restaurant_id: i64,
) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT p.id, p.category_id, p.name, p.description, p.price, p.image, p.is_available, p.sort_order \
         FROM product p JOIN category c ON c.id = p.category_id \
         WHERE c.restaurant_id = ? AND c.is_active = 1 AND p.is_available = 1 \
         ORDER BY p.category_id, p.sort_order, p.id",
    )
    .bind(restaurant_id)
    .fetch_all(db)
    .await?;
    Ok(products)
}

/// First `cap` available products of every active category in one query
pub async fn find_available_capped_by_restaurant<'e>(
    db: impl SqliteExecutor<'e>,
    restaurant_id: i64,
    cap: usize,
) -> RepoResult<Vec<Product>> {
    let products = sqlx::query_as::<_, Product>(&format!(
        "SELECT {COLUMNS} FROM ( \
            SELECT p.*, ROW_NUMBER() OVER (PARTITION BY p.category_id ORDER BY p.sort_order, p.id) AS rn \
            FROM product p JOIN category c ON c.id = p.category_id \
            WHERE c.restaurant_id = ? AND c.is_active = 1 AND p.is_available = 1 \
         ) WHERE rn <= ? ORDER BY category_id, sort_order, id"
    ))
    .bind(restaurant_id)
    .bind(cap as i64)
    .fetch_all(db)
    .await?;
    Ok(products)
}

/// Available product count per active category, keyed by category id
///
/// Categories without available products are absent from the map.
pub async fn count_available_per_category<'e>(
    db: impl SqliteExecutor<'e>,
    restaurant_id: i64,
) -> RepoResult<HashMap<i64, usize>> {
    let rows: Vec<(i64, i64)> = sqlx::query_as(
        "SELECT p.category_id, COUNT(*) FROM product p JOIN category c ON c.id = p.category_id \
         WHERE c.restaurant_id = ? AND c.is_active = 1 AND p.is_available = 1 \
         GROUP BY p.category_id",
    )
    .bind(restaurant_id)
    .fetch_all(db)
    .await?;
    Ok(rows
        .into_iter()
        .map(|(category_id, count)| (category_id, count as usize))
        .collect())
}

async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Product>> {
    let product =
        sqlx::query_as::<_, Product>(&format!("SELECT {COLUMNS} FROM product WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(product)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<Product> {
    if data.price < 0 {
        return Err(RepoError::Validation(format!(
            "price must be non-negative, got {}",
            data.price
        )));
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO product (category_id, name, description, price, image, is_available, sort_order) \
         VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.category_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image)
    .bind(data.is_available.unwrap_or(true))
    .bind(data.sort_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}
