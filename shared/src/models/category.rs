//! Category Model

use serde::{Deserialize, Serialize};

/// Category entity
///
/// Belongs to exactly one restaurant. Displayed by `sort_order`, ties broken
/// by id (insertion order).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub restaurant_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}

impl CategoryCreate {
    pub fn new(restaurant_id: i64, name: impl Into<String>) -> Self {
        Self {
            restaurant_id,
            name: name.into(),
            description: None,
            sort_order: None,
        }
    }

    pub fn with_sort_order(mut self, sort_order: i32) -> Self {
        self.sort_order = Some(sort_order);
        self
    }
}
