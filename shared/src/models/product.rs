//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    /// Category reference (required)
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Price in cents
    pub price: i64,
    pub image: Option<String>,
    /// Only available products are shown on the public menu
    pub is_available: bool,
    pub sort_order: i32,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub category_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: i64,
    pub image: Option<String>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i32>,
}

impl ProductCreate {
    pub fn new(category_id: i64, name: impl Into<String>, price: i64) -> Self {
        Self {
            category_id,
            name: name.into(),
            description: None,
            price,
            image: None,
            is_available: None,
            sort_order: None,
        }
    }

    pub fn unavailable(mut self) -> Self {
        self.is_available = Some(false);
        self
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }
}
