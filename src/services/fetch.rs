// 目录列举与单文件拉取
//
// fetch_file 不返回错误：所有失败都折叠成 FileOutcome::Missing，
// 一个文件失败不影响后续文件。

use std::collections::HashSet;
use std::time::Instant;

use chrono::Utc;

use crate::constants::limits::LISTING_PREVIEW;
use crate::models::{DownloadedFile, FileOutcome};
use crate::services::sftp::{join_path, RemoteFs};
use crate::ssh::{SshError, TransferLog};

/// 列出远程目录，任何失败都归为路径错误
pub async fn list_remote_dir<F: RemoteFs + ?Sized>(
    fs: &F,
    path: &str,
    log: &mut TransferLog,
) -> Result<HashSet<String>, SshError> {
    log.info(format!("Listing files in {}...", path));

    let names = match fs.list_dir(path).await {
        Ok(names) => names,
        Err(e) => {
            log.error(format!("Listing failed: {}", e));
            return Err(SshError::Path {
                path: path.to_string(),
                message: e.to_string(),
            });
        }
    };

    log.info(format!("Available files: {}", names.len()));
    if names.len() <= LISTING_PREVIEW {
        log.info(format!("   Files: {}", names.join(", ")));
    } else {
        log.info(format!(
            "   First files: {}...",
            names[..LISTING_PREVIEW].join(", ")
        ));
    }

    Ok(names.into_iter().collect())
}

/// 拉取单个期望文件
pub async fn fetch_file<F: RemoteFs + ?Sized>(
    fs: &F,
    base_path: &str,
    listing: &HashSet<String>,
    filename: &str,
    log: &mut TransferLog,
) -> FileOutcome {
    if !listing.contains(filename) {
        log.warn(format!("Missing file: {}", filename));
        return FileOutcome::Missing {
            filename: filename.to_string(),
            reason: None,
        };
    }

    let remote_path = join_path(base_path, filename);
    log.info(format!("Downloading: {}", filename));
    let started = Instant::now();

    // 大小只用于日志，探测失败不影响读取
    match fs.file_size(&remote_path).await {
        Ok(size) => log.info(format!(
            "   Size: {:.2} MB",
            size as f64 / (1024.0 * 1024.0)
        )),
        Err(e) => log.warn(format!("   Size probe failed: {}", e)),
    }

    match fs.read_file(&remote_path).await {
        Ok(content) => {
            log.info(format!(
                "   Done in {:.2}s",
                started.elapsed().as_secs_f64()
            ));
            let size = content.len() as u64;
            log.info(format!("{} downloaded ({} bytes)", filename, size));
            FileOutcome::Downloaded(DownloadedFile {
                filename: filename.to_string(),
                content,
                size,
                retrieved_at: Utc::now(),
            })
        }
        Err(e) => {
            log.error(format!("Download failed for {}: {}", filename, e));
            FileOutcome::Missing {
                filename: filename.to_string(),
                reason: Some(e.to_string()),
            }
        }
    }
}
