// SSH 会话管理
// 连接成功后的会话对象：持有传输层 Handle 与 SFTP 子会话

use async_trait::async_trait;
use russh::client::Handle;
use tracing::{debug, warn};

use super::error::SshError;
use super::handler::SshClientHandler;
use crate::services::sftp::{RemoteFs, RemoteSession, SftpService};

/// SSH 会话（连接成功后）
pub struct SshSession {
    /// 会话 ID
    id: String,
    /// russh Handle
    handle: Handle<SshClientHandler>,
    /// SFTP 子会话
    sftp: SftpService,
    /// 服务器主机名
    host: String,
    /// 用户名
    username: String,
    /// 是否已关闭
    closed: bool,
}

impl SshSession {
    /// 创建新的会话
    pub fn new(
        id: String,
        handle: Handle<SshClientHandler>,
        sftp: SftpService,
        host: String,
        username: String,
    ) -> Self {
        Self {
            id,
            handle,
            sftp,
            host,
            username,
            closed: false,
        }
    }
}

#[async_trait]
impl RemoteFs for SshSession {
    async fn list_dir(&self, path: &str) -> Result<Vec<String>, SshError> {
        self.sftp.list_dir(path).await
    }

    async fn file_size(&self, path: &str) -> Result<u64, SshError> {
        self.sftp.file_size(path).await
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, SshError> {
        self.sftp.read_file(path).await
    }
}

#[async_trait]
impl RemoteSession for SshSession {
    /// 关闭 SFTP 子会话与传输层，可重复调用，出错只记录不返回
    async fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        if let Err(e) = self.sftp.close().await {
            debug!("[SFTP] Close failed for session {}: {}", self.id, e);
        }
        if let Err(e) = self
            .handle
            .disconnect(russh::Disconnect::ByApplication, "", "en")
            .await
        {
            debug!("[SSH] Disconnect failed for session {}: {}", self.id, e);
        }
        debug!(
            "[SSH] Session {} ({}@{}) closed",
            self.id, self.username, self.host
        );
    }
}

impl Drop for SshSession {
    fn drop(&mut self) {
        // Handle 在 drop 时也会断开连接
        if !self.closed {
            warn!("[SSH] Session {} dropped without close", self.id);
        }
    }
}
