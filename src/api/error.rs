// HTTP 错误响应

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::models::FieldError;
use crate::ssh::SshError;

/// 接口层错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 请求字段校验失败
    #[error("invalid request ({} field error(s))", .0.len())]
    Validation(Vec<FieldError>),

    #[error(transparent)]
    Transfer(#[from] SshError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Transfer(e) => e.status(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::Validation(errors) => json!({ "detail": errors }),
            ApiError::Transfer(e) => json!({ "detail": e.to_string() }),
        };
        (status, Json(body)).into_response()
    }
}
