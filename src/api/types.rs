// HTTP 响应体

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::constants::service;
use crate::models::{DownloadedFile, TransferStats};
use crate::services::DownloadOutcome;

/// 单个已下载文件，内容以 base64 传输
#[derive(Debug, Serialize)]
pub struct DownloadedFileBody {
    pub filename: String,
    pub content_base64: String,
    pub size: u64,
    pub download_time: String,
}

impl From<DownloadedFile> for DownloadedFileBody {
    fn from(file: DownloadedFile) -> Self {
        Self {
            content_base64: STANDARD.encode(&file.content),
            download_time: file.retrieved_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            filename: file.filename,
            size: file.size,
        }
    }
}

/// POST /download-files 的成功响应
#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub downloaded_files: Vec<DownloadedFileBody>,
    pub missing_files: Vec<String>,
    pub stats: TransferStats,
    pub logs: Vec<String>,
}

impl DownloadResponse {
    pub fn new(outcome: DownloadOutcome, include_logs: bool) -> Self {
        let report = outcome.report;
        Self {
            success: report.success,
            downloaded_files: report.downloaded.into_iter().map(Into::into).collect(),
            missing_files: report.missing,
            stats: report.stats,
            logs: if include_logs { outcome.logs } else { Vec::new() },
        }
    }
}

/// GET /health
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy",
            service: service::NAME,
            version: service::VERSION,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileOutcome, TransferReport};
    use chrono::TimeZone;
    use std::time::Instant;

    fn outcome() -> DownloadOutcome {
        let file = DownloadedFile {
            filename: "a.txt".into(),
            content: b"hello".to_vec(),
            size: 5,
            retrieved_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap(),
        };
        let report = TransferReport::from_outcomes(
            vec![
                FileOutcome::Downloaded(file),
                FileOutcome::Missing {
                    filename: "c.txt".into(),
                    reason: None,
                },
            ],
            Instant::now(),
        );
        DownloadOutcome {
            report,
            logs: vec!["[12:30:00] Listing files in /in...".into()],
        }
    }

    #[test]
    fn test_download_response_shape() {
        let body = serde_json::to_value(DownloadResponse::new(outcome(), true)).unwrap();

        assert_eq!(body["success"], false);
        assert_eq!(body["downloaded_files"][0]["filename"], "a.txt");
        assert_eq!(body["downloaded_files"][0]["content_base64"], "aGVsbG8=");
        assert_eq!(body["downloaded_files"][0]["size"], 5);
        assert_eq!(
            body["downloaded_files"][0]["download_time"],
            "2024-03-01T12:30:00Z"
        );
        assert_eq!(body["missing_files"], serde_json::json!(["c.txt"]));
        assert_eq!(body["stats"]["total_expected"], 2);
        assert_eq!(body["stats"]["total_size_bytes"], 5);
        assert_eq!(body["logs"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_logs_can_be_suppressed() {
        let response = DownloadResponse::new(outcome(), false);
        assert!(response.logs.is_empty());
    }

    #[test]
    fn test_health_body() {
        let body = serde_json::to_value(HealthResponse::healthy()).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "sftp-fetch");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));
    }
}
