//! 服务模块
//!
//! - [`MenuService`] - 公共菜单分级输出 (lite / full / lazy)
//! - [`HttpService`] - HTTP 服务 (路由、中间件、监听)

pub mod http;
pub mod menu_service;

pub use http::HttpService;
pub use menu_service::{MenuPayload, MenuService};
