//! Public menu delivery protocol
//!
//! Three tiers over one resource, `GET /api/public/menu/{slug}`:
//!
//! | Mode | Query | Shape |
//! |------|-------|-------|
//! | Lite | `lite=true` | all categories, products capped per category, `_meta` |
//! | Full | none | all categories, all products, no `_meta` |
//! | Lazy | `lazy=true&categoryId={id}[&limit={n}]` | one category's products, `_meta` |
//!
//! [`MenuQuery`] is the raw query string as received; [`MenuMode`] is the
//! validated selection both sides agree on.

mod payload;
mod query;

pub use payload::{CategoryProducts, MenuCategory, MenuData, MenuMeta};
pub use query::{MenuMode, MenuQuery, PUBLIC_MENU_PATH, lazy_load_endpoint, menu_path};
