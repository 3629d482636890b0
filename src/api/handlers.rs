// 路由处理函数

use axum::extract::State;
use axum::Json;
use tracing::Instrument;
use uuid::Uuid;

use super::error::ApiError;
use super::types::{DownloadResponse, HealthResponse};
use super::AppState;
use crate::models::DownloadRequest;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

/// POST /download-files
pub async fn download_files(
    State(state): State<AppState>,
    Json(request): Json<DownloadRequest>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("request", id = %request_id);

    async move {
        if let Err(errors) = request.validate() {
            tracing::warn!("[API] Rejected request: {} invalid field(s)", errors.len());
            return Err(ApiError::Validation(errors));
        }

        tracing::info!(
            "[API] Download request: {}@{}:{} {} ({} file(s))",
            request.connection.username,
            request.connection.hostname,
            request.port(),
            request.remote_path,
            request.expected_files.len()
        );

        match state.service.download(&request).await {
            Ok(outcome) => Ok(Json(DownloadResponse::new(outcome, state.include_logs))),
            Err(e) => {
                tracing::error!("[API] Download request failed: {}", e);
                Err(e.into())
            }
        }
    }
    .instrument(span)
    .await
}
