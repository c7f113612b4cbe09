use crate::core::{Config, ServerState};
use crate::utils::{AppError, ErrorCode};
use axum::error_handling::HandleErrorLayer;
use axum::response::{IntoResponse, Response};
use axum::{BoxError, Router, middleware};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Duration;
use tower::{ServiceBuilder, ServiceExt};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

pub type OneshotResult = Result<http::Response<axum::body::Body>, Infallible>;

/// HTTP 请求日志中间件
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    tracing::info!(target: "http_access", elapsed_ms, "{} {} {}", method, uri, status);

    response
}

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(crate::api::health::router())
        .merge(crate::api::public_menu::router())
}

/// 超时等中间件错误也按统一响应体返回
async fn handle_middleware_error(err: BoxError) -> Response {
    if err.is::<tower::timeout::error::Elapsed>() {
        AppError::new(ErrorCode::TimeoutError).into_response()
    } else {
        AppError::internal(format!("Unhandled middleware error: {err}")).into_response()
    }
}

/// Router with state and the tower middleware stack applied
pub fn build_router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);
    with_middleware(build_app().with_state(state), timeout)
}

fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router
        // Tower HTTP 中间件
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(request_timeout),
        )
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // HTTP 请求日志中间件
        .layer(middleware::from_fn(log_request))
}

#[derive(Clone, Debug)]
pub struct HttpService {
    config: Config,
    router: Router,
}

impl HttpService {
    pub fn new(state: ServerState) -> Self {
        Self {
            config: state.config.clone(),
            router: build_router(state),
        }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Drive one request through the router without a socket
    pub async fn oneshot(&self, request: http::Request<axum::body::Body>) -> OneshotResult {
        self.router.clone().oneshot(request).await
    }

    /// Serve on `0.0.0.0:http_port` until `shutdown_signal` resolves
    pub async fn start_server<F>(&self, shutdown_signal: F) -> Result<(), AppError>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.http_port));
        tracing::info!("🚀 Starting HTTP server on {}", addr);

        let handle = axum_server::Handle::new();

        let grace = Duration::from_millis(self.config.shutdown_timeout_ms);
        let handle_clone = handle.clone();
        tokio::spawn(async move {
            shutdown_signal.await;
            handle_clone.graceful_shutdown(Some(grace));
        });

        axum_server::bind(addr)
            .handle(handle)
            .serve(self.router().into_make_service())
            .await
            .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

        Ok(())
    }
}
