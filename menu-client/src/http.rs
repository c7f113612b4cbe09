// menu-client/src/http.rs
// HTTP 客户端 - 公共菜单接口

use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use shared::{AppResponse, CategoryProducts, ErrorCode, MenuData, MenuMode};
use std::time::{Duration, Instant};

/// Public menu API
#[async_trait]
pub trait MenuApi: Send + Sync {
    /// Capped products per category, with `_meta`
    async fn get_menu_lite(&self, slug: &str) -> ClientResult<MenuData>;

    /// Every product, no `_meta`
    async fn get_menu_full(&self, slug: &str) -> ClientResult<MenuData>;

    /// One category's products; `limit` of `None` or `Some(0)` is not sent
    async fn get_category_products(
        &self,
        slug: &str,
        category_id: &str,
        limit: Option<u32>,
    ) -> ClientResult<CategoryProducts>;
}

/// 网络菜单客户端
///
/// Stateless apart from the connection pool; clone freely across tasks.
#[derive(Debug, Clone)]
pub struct MenuClient {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl MenuClient {
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            ClientError::InvalidArgument(format!("invalid base url '{}': {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidArgument(format!(
                "base url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            base_url,
            timeout: config.timeout,
        })
    }

    /// Client configured from the environment
    pub fn from_env() -> ClientResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    /// 获取基础 URL
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `{base}/api/public/menu/{slug}` with the slug percent-encoded
    fn menu_url(&self, slug: &str) -> ClientResult<Url> {
        if slug.trim().is_empty() {
            return Err(ClientError::InvalidArgument("slug must not be empty".into()));
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidArgument("base url cannot carry a path".into()))?
            .pop_if_empty()
            .extend(["api", "public", "menu", slug]);
        Ok(url)
    }

    fn map_send_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout)
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err)
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, slug: &str, mode: &MenuMode) -> ClientResult<T> {
        let url = self.menu_url(slug)?;
        let start = Instant::now();
        tracing::debug!(slug, mode = mode.name(), "menu request started");

        let result = self.send(url, mode).await;
        let elapsed_ms = start.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => tracing::info!(slug, mode = mode.name(), elapsed_ms, "menu request completed"),
            Err(e) => tracing::warn!(
                slug,
                mode = mode.name(),
                elapsed_ms,
                error = %e,
                "menu request failed"
            ),
        }
        result
    }

    async fn send<T: DeserializeOwned>(&self, url: Url, mode: &MenuMode) -> ClientResult<T> {
        let response = self
            .client
            .get(url)
            .query(&mode.query_pairs())
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.map_send_error(e))?;
        handle_body(status, &body)
    }
}

/// Turn status plus body into data or a typed error
///
/// Both the HTTP status and the `success` field must report success.
fn handle_body<T: DeserializeOwned>(status: StatusCode, body: &str) -> ClientResult<T> {
    let envelope: AppResponse<T> = match serde_json::from_str(body) {
        Ok(envelope) => envelope,
        Err(e) if status.is_success() => {
            return Err(ClientError::Decode(format!("malformed response body: {e}")));
        }
        // 非 JSON 错误响应 (代理、网关等)
        Err(_) => return Err(error_from_status(status, None, body_snippet(body))),
    };

    if envelope.success && status.is_success() {
        return envelope
            .data
            .ok_or_else(|| ClientError::Decode("response has no data".into()));
    }

    let code = envelope.error_code();
    let message = envelope
        .error
        .clone()
        .unwrap_or_else(|| code.map_or("Unknown error", |c| c.message()).to_string());
    Err(error_from_status(status, code, message))
}

fn error_from_status(status: StatusCode, code: Option<ErrorCode>, message: String) -> ClientError {
    // 优先使用错误码对应的状态，服务端在 200 中返回失败时也能正确分类
    let effective = match code {
        Some(code) if status.is_success() => code.http_status(),
        _ => status,
    };
    match effective {
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST => ClientError::InvalidRequest(message),
        _ => ClientError::Server {
            status: effective.as_u16(),
            code: code.map(|c| c.code()),
            message,
        },
    }
}

fn body_snippet(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[async_trait]
impl MenuApi for MenuClient {
    async fn get_menu_lite(&self, slug: &str) -> ClientResult<MenuData> {
        self.fetch(slug, &MenuMode::Lite).await
    }

    async fn get_menu_full(&self, slug: &str) -> ClientResult<MenuData> {
        self.fetch(slug, &MenuMode::Full).await
    }

    async fn get_category_products(
        &self,
        slug: &str,
        category_id: &str,
        limit: Option<u32>,
    ) -> ClientResult<CategoryProducts> {
        if category_id.trim().is_empty() {
            return Err(ClientError::InvalidArgument(
                "category id must not be empty".into(),
            ));
        }
        self.fetch(slug, &MenuMode::lazy(category_id, limit)).await
    }
}
