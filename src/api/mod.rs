// HTTP 接口
//
// - GET  /health
// - POST /download-files
// 所有响应附带宽松的 CORS 头，预检请求直接返回 204

mod error;
mod handlers;
mod types;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, HeaderMap, HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::services::DownloadService;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    service: Arc<DownloadService>,
    include_logs: bool,
}

impl AppState {
    pub fn new(service: DownloadService, include_logs: bool) -> Self {
        Self {
            service: Arc::new(service),
            include_logs,
        }
    }
}

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/download-files", post(handlers::download_files))
        .layer(middleware::from_fn(cors))
        .with_state(state)
}

fn apply_cors_headers(headers: &mut HeaderMap) {
    let any = HeaderValue::from_static("*");
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any);
}

async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = StatusCode::NO_CONTENT.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}
