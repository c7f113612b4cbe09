//! Data models
//!
//! Shared between menu-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, assigned in insertion order).

pub mod category;
pub mod demo_request;
pub mod product;
pub mod restaurant;

// Re-exports
pub use category::*;
pub use demo_request::*;
pub use product::*;
pub use restaurant::*;
