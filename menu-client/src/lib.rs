//! Menu Client - typed HTTP client for the public menu API
//!
//! Three calls map onto the three delivery modes:
//!
//! | Call | Request |
//! |------|---------|
//! | [`MenuApi::get_menu_lite`] | `GET /api/public/menu/{slug}?lite=true` |
//! | [`MenuApi::get_menu_full`] | `GET /api/public/menu/{slug}` |
//! | [`MenuApi::get_category_products`] | `GET /api/public/menu/{slug}?lazy=true&categoryId={id}[&limit={n}]` |
//!
//! A response is returned only when both the HTTP status and the `success`
//! field say so; everything else becomes a [`ClientError`].

pub mod config;
pub mod error;
pub mod http;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{MenuApi, MenuClient};

// Re-export shared types for convenience
pub use shared::{CategoryProducts, MenuCategory, MenuData, MenuMeta, MenuMode};
