// SSH 客户端 Handler 实现
// 实现 russh::client::Handler trait

use russh::keys::PublicKey;
use std::future::Future;
use tokio::sync::mpsc;

use super::config::HostKeyPolicy;
use super::error::SshError;
use super::log::LogEntry;

/// SSH 客户端 Handler
/// 处理握手过程中的服务器公钥校验
pub struct SshClientHandler {
    /// 日志发送器（握手结束后由客户端合并进请求日志）
    log_sender: mpsc::UnboundedSender<LogEntry>,
    /// 服务器主机名（用于日志）
    host: String,
    /// 主机密钥策略
    policy: HostKeyPolicy,
}

impl SshClientHandler {
    /// 创建新的 Handler
    pub fn new(
        log_sender: mpsc::UnboundedSender<LogEntry>,
        host: String,
        policy: HostKeyPolicy,
    ) -> Self {
        Self {
            log_sender,
            host,
            policy,
        }
    }

    /// 发送日志事件
    fn log(&self, entry: LogEntry) {
        let _ = self.log_sender.send(entry);
    }
}

impl russh::client::Handler for SshClientHandler {
    type Error = SshError;

    /// 检查服务器公钥
    fn check_server_key(
        &mut self,
        server_public_key: &PublicKey,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send {
        let fingerprint = server_public_key
            .fingerprint(russh::keys::ssh_key::HashAlg::Sha256)
            .to_string();
        let key_type = server_public_key.algorithm().to_string();

        let result = match &self.policy {
            HostKeyPolicy::AcceptAny => {
                // 首次信任：不校验，只留下指纹供事后核对
                self.log(LogEntry::warn(format!(
                    "Host key for {} accepted without verification ({} {})",
                    self.host, key_type, fingerprint
                )));
                Ok(true)
            }
            policy if policy.allows(&fingerprint) => {
                self.log(LogEntry::info(format!(
                    "Host key for {} matches pinned fingerprint {}",
                    self.host, fingerprint
                )));
                Ok(true)
            }
            _ => {
                self.log(LogEntry::error(format!(
                    "Host key for {} is not pinned ({} {})",
                    self.host, key_type, fingerprint
                )));
                Err(SshError::HostKey(format!(
                    "{} presented unpinned key {}",
                    self.host, fingerprint
                )))
            }
        };

        async move { result }
    }
}
