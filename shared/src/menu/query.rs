//! Menu query flags and mode selection

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Base path of the public menu resource
pub const PUBLIC_MENU_PATH: &str = "/api/public/menu";

/// Path of one restaurant's public menu
pub fn menu_path(slug: &str) -> String {
    format!("{}/{}", PUBLIC_MENU_PATH, slug)
}

/// Follow-up endpoint template advertised in `_meta.lazyLoadEndpoint`
///
/// `{categoryId}` is left as a literal placeholder for the client to fill.
pub fn lazy_load_endpoint(slug: &str) -> String {
    format!("{}?lazy=true&categoryId={{categoryId}}", menu_path(slug))
}

/// Raw query string of `GET /api/public/menu/{slug}`
///
/// Flags are boolean-ish strings: only the exact value `"true"` enables them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    pub lite: Option<String>,
    pub lazy: Option<String>,
    pub category_id: Option<String>,
    pub limit: Option<String>,
}

fn is_true(flag: &Option<String>) -> bool {
    flag.as_deref() == Some("true")
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

impl MenuQuery {
    /// Select the delivery mode
    ///
    /// Precedence: lazy (needs a category id) > lite > full. `limit` is only
    /// read in lazy mode and must be a positive integer when present.
    pub fn mode(&self) -> AppResult<MenuMode> {
        if is_true(&self.lazy)
            && let Some(category_id) = non_empty(&self.category_id)
        {
            let limit = match non_empty(&self.limit) {
                None => None,
                Some(raw) => Some(parse_limit(raw)?),
            };
            return Ok(MenuMode::Lazy {
                category_id: category_id.to_string(),
                limit,
            });
        }

        if is_true(&self.lite) {
            return Ok(MenuMode::Lite);
        }

        Ok(MenuMode::Full)
    }
}

fn parse_limit(raw: &str) -> AppResult<usize> {
    match raw.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(
            AppError::invalid_request("limit must be a positive integer")
                .with_detail("field", "limit")
                .with_detail("value", raw),
        ),
    }
}

/// Validated delivery mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuMode {
    /// Every category, every available product
    Full,
    /// Every category, products capped per category by the server
    Lite,
    /// One category's products, optionally truncated
    Lazy {
        category_id: String,
        limit: Option<usize>,
    },
}

impl MenuMode {
    /// Lazy mode as requested by a caller; a zero limit means "no limit"
    pub fn lazy(category_id: impl Into<String>, limit: Option<u32>) -> Self {
        Self::Lazy {
            category_id: category_id.into(),
            limit: limit.filter(|n| *n > 0).map(|n| n as usize),
        }
    }

    /// Short name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Lite => "lite",
            Self::Lazy { .. } => "lazy",
        }
    }

    /// Query parameters that select this mode, in wire order
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Full => Vec::new(),
            Self::Lite => vec![("lite", "true".to_string())],
            Self::Lazy { category_id, limit } => {
                let mut pairs = vec![
                    ("lazy", "true".to_string()),
                    ("categoryId", category_id.clone()),
                ];
                if let Some(n) = limit {
                    pairs.push(("limit", n.to_string()));
                }
                pairs
            }
        }
    }
}
