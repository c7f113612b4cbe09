//! Menu Service - shapes the public menu in lite, full and lazy mode
//!
//! Reads only. Every mode starts from the restaurant resolved by slug; lazy
//! mode additionally requires the category to belong to that restaurant.

use std::collections::HashMap;

use serde::Serialize;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

use crate::db::repository::{RepoError, category, product, restaurant};
use crate::utils::{AppError, AppResult};
use shared::menu::lazy_load_endpoint;
use shared::models::{Product, Restaurant};
use shared::{CategoryProducts, MenuCategory, MenuData, MenuMeta, MenuMode};

/// Payload of a public menu request, serialized as-is under `data`
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MenuPayload {
    Menu(MenuData),
    Category(CategoryProducts),
}

#[derive(Clone, Debug)]
pub struct MenuService {
    pool: SqlitePool,
    lite_product_cap: usize,
}

impl MenuService {
    pub fn new(pool: SqlitePool, lite_product_cap: usize) -> Self {
        Self {
            pool,
            lite_product_cap: lite_product_cap.max(1),
        }
    }

    pub fn lite_product_cap(&self) -> usize {
        self.lite_product_cap
    }

    /// Dispatch on an already validated mode
    pub async fn menu(&self, slug: &str, mode: &MenuMode) -> AppResult<MenuPayload> {
        match mode {
            MenuMode::Full => self.full_menu(slug).await.map(MenuPayload::Menu),
            MenuMode::Lite => self.lite_menu(slug).await.map(MenuPayload::Menu),
            MenuMode::Lazy { category_id, limit } => self
                .category_products(slug, category_id, *limit)
                .await
                .map(MenuPayload::Category),
        }
    }

    /// Read-only snapshot: every query of one menu sees the same data
    async fn snapshot(&self) -> AppResult<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await.map_err(RepoError::from)?)
    }

    async fn restaurant(conn: &mut SqliteConnection, slug: &str) -> AppResult<Restaurant> {
        restaurant::find_by_slug(conn, slug)
            .await?
            .ok_or_else(|| AppError::restaurant_not_found(slug))
    }

    /// Every available product of every active category, no `_meta`
    pub async fn full_menu(&self, slug: &str) -> AppResult<MenuData> {
        let mut tx = self.snapshot().await?;
        let restaurant = Self::restaurant(&mut tx, slug).await?;
        let categories = category::find_by_restaurant(&mut *tx, restaurant.id).await?;
        let mut by_category =
            group_by_category(product::find_available_by_restaurant(&mut *tx, restaurant.id).await?);
        tx.commit().await.map_err(RepoError::from)?;

        let categories = categories
            .into_iter()
            .map(|category| MenuCategory {
                products: by_category.remove(&category.id).unwrap_or_default(),
                category,
                total_products: None,
                has_more: None,
            })
            .collect();

        Ok(MenuData {
            restaurant,
            categories,
            meta: None,
        })
    }

    /// At most `lite_product_cap` products per category, plus `_meta`
    ///
    /// Categories, capped products and totals are read in one transaction so
    /// `hasMore` always agrees with the products returned.
    pub async fn lite_menu(&self, slug: &str) -> AppResult<MenuData> {
        let cap = self.lite_product_cap;
        let mut tx = self.snapshot().await?;
        let restaurant = Self::restaurant(&mut tx, slug).await?;
        let categories = category::find_by_restaurant(&mut *tx, restaurant.id).await?;
        let mut by_category = group_by_category(
            product::find_available_capped_by_restaurant(&mut *tx, restaurant.id, cap).await?,
        );
        let totals = product::count_available_per_category(&mut *tx, restaurant.id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        let categories: Vec<MenuCategory> = categories
            .into_iter()
            .map(|category| {
                let products = by_category.remove(&category.id).unwrap_or_default();
                let total = totals.get(&category.id).copied().unwrap_or(0);
                MenuCategory {
                    has_more: Some(total > products.len()),
                    total_products: Some(total),
                    products,
                    category,
                }
            })
            .collect();

        let shown: usize = categories.iter().map(|c| c.products.len()).sum();
        let meta = MenuMeta {
            is_lite_mode: true,
            supports_lazy_load: true,
            total_products_shown: shown,
            lazy_load_endpoint: lazy_load_endpoint(&restaurant.slug),
            products_per_category: Some(cap),
            total_products: None,
            has_more: None,
        };

        tracing::debug!(
            slug = %restaurant.slug,
            categories = categories.len(),
            shown,
            "Lite menu shaped"
        );

        Ok(MenuData {
            restaurant,
            categories,
            meta: Some(meta),
        })
    }

    /// Products of one category under the restaurant
    ///
    /// An id that does not parse or belongs to another restaurant is reported
    /// as not found; other tenants' data is never returned.
    pub async fn category_products(
        &self,
        slug: &str,
        category_id: &str,
        limit: Option<usize>,
    ) -> AppResult<CategoryProducts> {
        let mut tx = self.snapshot().await?;
        let restaurant = Self::restaurant(&mut tx, slug).await?;

        let Ok(id) = category_id.parse::<i64>() else {
            return Err(AppError::category_not_found(slug, category_id));
        };
        let category = category::find_in_restaurant(&mut *tx, restaurant.id, id)
            .await?
            .ok_or_else(|| AppError::category_not_found(slug, id))?;

        let products = product::find_available_by_category(&mut *tx, category.id, limit).await?;
        let total = product::count_available_by_category(&mut *tx, category.id).await?;
        tx.commit().await.map_err(RepoError::from)?;

        let meta = MenuMeta {
            is_lite_mode: false,
            supports_lazy_load: true,
            total_products_shown: products.len(),
            lazy_load_endpoint: lazy_load_endpoint(&restaurant.slug),
            products_per_category: None,
            total_products: Some(total),
            has_more: Some(total > products.len()),
        };

        Ok(CategoryProducts {
            category,
            products,
            meta,
        })
    }
}

/// Split products into per-category lists, keeping their order
fn group_by_category(products: Vec<Product>) -> HashMap<i64, Vec<Product>> {
    let mut grouped: HashMap<i64, Vec<Product>> = HashMap::new();
    for product in products {
        grouped.entry(product.category_id).or_default().push(product);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::test_pool;
    use shared::ErrorCode;
    use shared::models::{CategoryCreate, ProductCreate, RestaurantCreate};

    struct Seeded {
        service: MenuService,
        mains: i64,
        drinks: i64,
        empty: i64,
        foreign: i64,
    }

    /// bistro: Mains (6 available + 1 unavailable), Drinks (2), Empty (0)
    /// other: Secret (1)
    async fn seed() -> Seeded {
        let pool = test_pool().await;
        let bistro = restaurant::create(&pool, RestaurantCreate::new("bistro", "Bistro"))
            .await
            .unwrap();
        let other = restaurant::create(&pool, RestaurantCreate::new("other", "Other"))
            .await
            .unwrap();

        let mains = category::create(&pool, CategoryCreate::new(bistro.id, "Mains").with_sort_order(1))
            .await
            .unwrap()
            .id;
        let drinks = category::create(&pool, CategoryCreate::new(bistro.id, "Drinks").with_sort_order(2))
            .await
            .unwrap()
            .id;
        let empty = category::create(&pool, CategoryCreate::new(bistro.id, "Empty").with_sort_order(3))
            .await
            .unwrap()
            .id;
        let foreign = category::create(&pool, CategoryCreate::new(other.id, "Secret"))
            .await
            .unwrap()
            .id;

        for i in 0..6 {
            product::create(&pool, ProductCreate::new(mains, format!("Main {i}"), 1200).with_sort_order(i))
                .await
                .unwrap();
        }
        product::create(&pool, ProductCreate::new(mains, "Sold out", 1200).unavailable())
            .await
            .unwrap();
        for i in 0..2 {
            product::create(&pool, ProductCreate::new(drinks, format!("Drink {i}"), 300))
                .await
                .unwrap();
        }
        product::create(&pool, ProductCreate::new(foreign, "Secret dish", 9900))
            .await
            .unwrap();

        Seeded {
            service: MenuService::new(pool, 4),
            mains,
            drinks,
            empty,
            foreign,
        }
    }

    #[tokio::test]
    async fn test_full_menu_has_every_available_product() {
        let s = seed().await;
        let menu = s.service.full_menu("bistro").await.unwrap();

        assert!(menu.meta.is_none());
        assert_eq!(menu.categories.len(), 3);
        assert_eq!(menu.categories[0].category.id, s.mains);
        assert_eq!(menu.categories[0].products.len(), 6);
        assert_eq!(menu.categories[1].products.len(), 2);
        assert!(menu.categories[2].products.is_empty());
        assert_eq!(menu.product_count(), 8);
        assert!(
            menu.categories
                .iter()
                .flat_map(|c| &c.products)
                .all(|p| p.is_available)
        );
    }

    #[tokio::test]
    async fn test_lite_menu_caps_each_category() {
        let s = seed().await;
        let menu = s.service.lite_menu("bistro").await.unwrap();
        let meta = menu.meta.clone().unwrap();

        assert!(meta.is_lite_mode);
        assert!(meta.supports_lazy_load);
        assert_eq!(meta.total_products_shown, 6);
        assert_eq!(meta.total_products_shown, menu.product_count());
        assert!(meta.total_products_shown <= menu.categories.len() * 4);
        assert_eq!(
            meta.lazy_load_endpoint,
            "/api/public/menu/bistro?lazy=true&categoryId={categoryId}"
        );
        assert_eq!(meta.products_per_category, Some(4));

        let mains = &menu.categories[0];
        assert_eq!(mains.products.len(), 4);
        assert_eq!(mains.total_products, Some(6));
        assert_eq!(mains.has_more, Some(true));
        assert_eq!(
            mains.products.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            vec!["Main 0", "Main 1", "Main 2", "Main 3"]
        );

        let drinks = &menu.categories[1];
        assert_eq!(drinks.has_more, Some(false));
        assert_eq!(menu.partial_categories().count(), 1);
    }

    #[tokio::test]
    async fn test_lite_products_are_prefix_of_full() {
        let s = seed().await;
        let lite = s.service.lite_menu("bistro").await.unwrap();
        let full = s.service.full_menu("bistro").await.unwrap();

        for (l, f) in lite.categories.iter().zip(&full.categories) {
            assert_eq!(l.category, f.category);
            assert_eq!(l.products[..], f.products[..l.products.len()]);
        }
    }

    #[tokio::test]
    async fn test_category_products_with_limit() {
        let s = seed().await;
        let page = s
            .service
            .category_products("bistro", &s.mains.to_string(), Some(2))
            .await
            .unwrap();

        assert_eq!(page.category.id, s.mains);
        assert_eq!(page.products.len(), 2);
        assert!(page.products.iter().all(|p| p.category_id == s.mains));
        assert!(!page.meta.is_lite_mode);
        assert_eq!(page.meta.total_products_shown, 2);
        assert_eq!(page.meta.total_products, Some(6));
        assert_eq!(page.meta.has_more, Some(true));

        let all = s
            .service
            .category_products("bistro", &s.drinks.to_string(), None)
            .await
            .unwrap();
        assert_eq!(all.products.len(), 2);
        assert_eq!(all.meta.has_more, Some(false));
    }

    #[tokio::test]
    async fn test_limit_larger_than_category() {
        let s = seed().await;
        let page = s
            .service
            .category_products("bistro", &s.drinks.to_string(), Some(50))
            .await
            .unwrap();
        assert_eq!(page.products.len(), 2);

        let empty = s
            .service
            .category_products("bistro", &s.empty.to_string(), None)
            .await
            .unwrap();
        assert!(empty.products.is_empty());
        assert_eq!(empty.meta.total_products, Some(0));
    }

    #[tokio::test]
    async fn test_foreign_category_not_found() {
        let s = seed().await;
        let err = s
            .service
            .category_products("bistro", &s.foreign.to_string(), None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);

        let err = s
            .service
            .category_products("bistro", "not-a-number", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::CategoryNotFound);
    }

    #[tokio::test]
    async fn test_unknown_slug_wins_over_bad_category() {
        let s = seed().await;
        let err = s
            .service
            .category_products("nowhere", "abc", None)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);

        let err = s.service.lite_menu("nowhere").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RestaurantNotFound);
    }

    #[tokio::test]
    async fn test_dispatch_by_mode() {
        let s = seed().await;
        let lazy = MenuMode::lazy(s.drinks.to_string(), Some(1));
        match s.service.menu("bistro", &lazy).await.unwrap() {
            MenuPayload::Category(page) => assert_eq!(page.products.len(), 1),
            other => panic!("expected category payload, got {other:?}"),
        }
        match s.service.menu("bistro", &MenuMode::Full).await.unwrap() {
            MenuPayload::Menu(menu) => assert!(menu.meta.is_none()),
            other => panic!("expected menu payload, got {other:?}"),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_lite_totals_agree_with_products_during_writes() {
        let pool = test_pool().await;
        let busy = restaurant::create(&pool, RestaurantCreate::new("busy", "Busy"))
            .await
            .unwrap();
        let specials = category::create(&pool, CategoryCreate::new(busy.id, "Specials"))
            .await
            .unwrap()
            .id;
        let service = MenuService::new(pool.clone(), 4);

        let writer = tokio::spawn(async move {
            for i in 0..40 {
                product::create(&pool, ProductCreate::new(specials, format!("Special {i}"), 500))
                    .await
                    .unwrap();
                tokio::task::yield_now().await;
            }
        });

        while !writer.is_finished() {
            let menu = service.lite_menu("busy").await.unwrap();
            let specials = &menu.categories[0];
            let total = specials.total_products.unwrap();
            assert_eq!(specials.products.len(), total.min(4));
            assert_eq!(specials.has_more, Some(total > 4));
        }
        writer.await.unwrap();
    }

    #[tokio::test]
    async fn test_zero_cap_clamped() {
        let pool = test_pool().await;
        assert_eq!(MenuService::new(pool, 0).lite_product_cap(), 1);
    }
}
