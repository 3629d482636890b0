// SFTP 服务 - 封装 russh-sftp 客户端

use std::future::Future;
use std::time::Duration;

use russh_sftp::client::{Config, SftpSession};
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::ssh::SshError;

/// russh-sftp 默认单次请求 10 秒超时，这里换成配置的操作超时
fn sftp_config(op_timeout: Duration) -> Config {
    Config {
        request_timeout_secs: op_timeout.as_secs(),
        ..Config::default()
    }
}

/// SFTP 服务
/// 封装 russh-sftp 客户端，每次操作都套上同一个超时
pub struct SftpService {
    /// 会话 ID
    session_id: String,
    /// russh-sftp 客户端会话
    sftp: SftpSession,
    /// 单次操作超时
    op_timeout: Duration,
}

impl SftpService {
    /// 在已请求 sftp 子系统的通道流上初始化 SFTP 会话
    pub async fn new<S>(
        session_id: String,
        stream: S,
        op_timeout: Duration,
    ) -> Result<Self, SshError>
    where
        S: AsyncRead + AsyncWrite + Unpin + Send + 'static,
    {
        let sftp = SftpSession::new_with_config(stream, sftp_config(op_timeout))
            .await
            .map_err(|e| SshError::Sftp(format!("Failed to create SFTP session: {}", e)))?;

        info!("[SFTP] SFTP service created for session {}", session_id);

        Ok(Self {
            session_id,
            sftp,
            op_timeout,
        })
    }

    async fn with_timeout<T, F>(&self, fut: F) -> Result<T, SshError>
    where
        F: Future<Output = Result<T, russh_sftp::client::error::Error>>,
    {
        tokio::time::timeout(self.op_timeout, fut)
            .await
            .map_err(|_| SshError::Timeout {
                stage: "SFTP operation",
                secs: self.op_timeout.as_secs(),
            })?
            .map_err(SshError::from)
    }

    /// 读取目录条目名
    pub async fn list_dir(&self, path: &str) -> Result<Vec<String>, SshError> {
        debug!("[SFTP] Reading directory: {}", path);

        let dir = self.with_timeout(self.sftp.read_dir(path)).await?;
        let names: Vec<String> = dir
            .map(|entry| entry.file_name())
            .filter(|name| name != "." && name != "..")
            .collect();

        debug!("[SFTP] Read {} entries from {}", names.len(), path);
        Ok(names)
    }

    /// 获取文件大小
    pub async fn file_size(&self, path: &str) -> Result<u64, SshError> {
        let attrs = self.with_timeout(self.sftp.metadata(path)).await?;
        Ok(attrs.size.unwrap_or(0))
    }

    /// 读取整个文件
    pub async fn read_file(&self, path: &str) -> Result<Vec<u8>, SshError> {
        debug!("[SFTP] Reading file: {}", path);
        let content = self.with_timeout(self.sftp.read(path)).await?;
        debug!("[SFTP] Read {} bytes from {}", content.len(), path);
        Ok(content)
    }

    /// 关闭 SFTP 通道
    pub async fn close(&self) -> Result<(), SshError> {
        self.sftp.close().await.map_err(SshError::from)
    }
}

impl Drop for SftpService {
    fn drop(&mut self) {
        debug!(
            "[SFTP] Dropping SFTP service for session {}",
            self.session_id
        );
    }
}
