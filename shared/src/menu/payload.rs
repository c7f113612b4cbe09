//! Menu response payloads

use serde::{Deserialize, Serialize};

use crate::models::{Category, Product, Restaurant};

/// Response annotation describing how the payload was shaped (`_meta`)
///
/// Never persisted. Present in lite and lazy responses only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuMeta {
    pub is_lite_mode: bool,
    pub supports_lazy_load: bool,
    /// Number of products actually serialized in this response
    pub total_products_shown: usize,
    /// Template for follow-up lazy requests, `{categoryId}` left to fill
    pub lazy_load_endpoint: String,
    /// Per-category cap applied (lite)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products_per_category: Option<usize>,
    /// Available products in the requested category (lazy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_products: Option<usize>,
    /// Whether the category has more products than were returned (lazy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// A category with its (possibly capped) product list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
    /// Available products in this category before capping (lite)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_products: Option<usize>,
    /// `true` when a lazy request is needed to see the rest (lite)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_more: Option<bool>,
}

/// Lite and full mode payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuData {
    pub restaurant: Restaurant,
    pub categories: Vec<MenuCategory>,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MenuMeta>,
}

impl MenuData {
    /// Products serialized across all categories
    pub fn product_count(&self) -> usize {
        self.categories.iter().map(|c| c.products.len()).sum()
    }

    /// Whether this payload came from lite mode
    pub fn is_lite(&self) -> bool {
        self.meta.as_ref().is_some_and(|m| m.is_lite_mode)
    }

    /// Categories that were cut short and need a lazy follow-up
    pub fn partial_categories(&self) -> impl Iterator<Item = &MenuCategory> {
        self.categories
            .iter()
            .filter(|c| c.has_more.unwrap_or(false))
    }
}

/// Lazy mode payload: one category's products
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProducts {
    pub category: Category,
    pub products: Vec<Product>,
    #[serde(rename = "_meta")]
    pub meta: MenuMeta,
}
