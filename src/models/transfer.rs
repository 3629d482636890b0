// 传输结果类型
// 单文件结果 FileOutcome 以及汇总报告 TransferReport

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// 已下载的文件
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadedFile {
    pub filename: String,
    pub content: Vec<u8>,
    pub size: u64,
    pub retrieved_at: DateTime<Utc>,
}

/// 单个期望文件的处理结果
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Downloaded(DownloadedFile),
    /// 不在目录中，或读取失败（reason 为失败原因）
    Missing {
        filename: String,
        reason: Option<String>,
    },
}

/// 汇总统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferStats {
    pub total_expected: usize,
    pub total_downloaded: usize,
    pub total_missing: usize,
    pub total_size_bytes: u64,
    pub duration_seconds: f64,
}

/// 一次请求的最终报告
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReport {
    /// 没有缺失文件时为 true
    pub success: bool,
    pub downloaded: Vec<DownloadedFile>,
    pub missing: Vec<String>,
    pub stats: TransferStats,
}

impl TransferReport {
    /// 按期望文件的顺序汇总结果
    pub fn from_outcomes(outcomes: Vec<FileOutcome>, started: Instant) -> Self {
        let total_expected = outcomes.len();
        let mut downloaded = Vec::new();
        let mut missing = Vec::new();

        for outcome in outcomes {
            match outcome {
                FileOutcome::Downloaded(file) => downloaded.push(file),
                FileOutcome::Missing { filename, .. } => missing.push(filename),
            }
        }

        let total_size_bytes = downloaded.iter().map(|f| f.size).sum();
        let stats = TransferStats {
            total_expected,
            total_downloaded: downloaded.len(),
            total_missing: missing.len(),
            total_size_bytes,
            duration_seconds: round_secs(started.elapsed().as_secs_f64()),
        };

        Self {
            success: missing.is_empty(),
            downloaded,
            missing,
            stats,
        }
    }
}

/// 保留两位小数
fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
