//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteExecutor;

const COLUMNS: &str = "id, restaurant_id, name, description, sort_order, is_active";

/// Active categories of a restaurant in display order
pub async fn find_by_restaurant<'e>(
    db: impl SqliteExecutor<'e>,
    restaurant_id: i64,
) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE restaurant_id = ? AND is_active = 1 ORDER BY sort_order, id"
    ))
    .bind(restaurant_id)
    .fetch_all(db)
    .await?;
    Ok(categories)
}

/// Active category, only if it belongs to `restaurant_id`
pub async fn find_in_restaurant<'e>(
    db: impl SqliteExecutor<'e>,
    restaurant_id: i64,
    category_id: i64,
) -> RepoResult<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE id = ? AND restaurant_id = ? AND is_active = 1"
    ))
    .bind(category_id)
    .bind(restaurant_id)
    .fetch_optional(db)
    .await?;
    Ok(category)
}

async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO category (restaurant_id, name, description, sort_order) VALUES (?, ?, ?, ?) RETURNING id",
    )
    .bind(data.restaurant_id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.sort_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn set_active(pool: &SqlitePool, id: i64, is_active: bool) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE category SET is_active = ? WHERE id = ?")
        .bind(is_active)
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::restaurant;
    use crate::db::repository::test_support::test_pool;
    use shared::models::RestaurantCreate;

    #[tokio::test]
    async fn test_display_order_ties_broken_by_insertion() {
        let pool = test_pool().await;
        let r = restaurant::create(&pool, RestaurantCreate::new("bistro", "Bistro"))
            .await
            .unwrap();

        let drinks = create(&pool, CategoryCreate::new(r.id, "Drinks").with_sort_order(2))
            .await
            .unwrap();
        let mains = create(&pool, CategoryCreate::new(r.id, "Mains").with_sort_order(1))
            .await
            .unwrap();
        let sides = create(&pool, CategoryCreate::new(r.id, "Sides").with_sort_order(1))
            .await
            .unwrap();

        let ids: Vec<i64> = find_by_restaurant(&pool, r.id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![mains.id, sides.id, drinks.id]);
    }

    #[tokio::test]
    async fn test_find_in_restaurant_scoped() {
        let pool = test_pool().await;
        let a = restaurant::create(&pool, RestaurantCreate::new("a", "A"))
            .await
            .unwrap();
        let b = restaurant::create(&pool, RestaurantCreate::new("b", "B"))
            .await
            .unwrap();
        let cat = create(&pool, CategoryCreate::new(a.id, "Mains")).await.unwrap();

        assert!(find_in_restaurant(&pool, a.id, cat.id).await.unwrap().is_some());
        assert!(find_in_restaurant(&pool, b.id, cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_inactive_category_hidden() {
        let pool = test_pool().await;
        let r = restaurant::create(&pool, RestaurantCreate::new("bistro", "Bistro"))
            .await
            .unwrap();
        let cat = create(&pool, CategoryCreate::new(r.id, "Seasonal")).await.unwrap();
        set_active(&pool, cat.id, false).await.unwrap();

        assert!(find_by_restaurant(&pool, r.id).await.unwrap().is_empty());
        assert!(find_in_restaurant(&pool, r.id, cat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_category_requires_existing_restaurant() {
        let pool = test_pool().await;
        let err = create(&pool, CategoryCreate::new(999, "Orphan")).await.unwrap_err();
        assert!(matches!(err, RepoError::Database(_)));
    }
}
