//! Shared types for the QR menu service
//!
//! Wire types used by both `menu-server` and `menu-client`: entity models,
//! menu payloads and query flags, the unified error system and the
//! `{ success, data, error }` response envelope.

pub mod error;
pub mod menu;
pub mod models;
pub mod response;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{AppError, AppResult, ErrorCode};
pub use menu::{CategoryProducts, MenuCategory, MenuData, MenuMeta, MenuMode, MenuQuery};
pub use response::AppResponse;
