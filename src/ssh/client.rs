// SSH 客户端核心实现
//
// 连接顺序：TCP 连接 -> SSH 握手 -> 公钥认证 -> 打开 SFTP 子系统。
// 每一步都有独立超时，任一步失败即中止。

use std::sync::Arc;

use russh::client::Handle;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::time::timeout;

use super::config::SshConfig;
use super::error::SshError;
use super::handler::SshClientHandler;
use super::keys::LoadedKey;
use super::log::{LogEntry, TransferLog};
use super::session::SshSession;
use crate::services::sftp::SftpService;

/// SSH 客户端
/// 负责建立 SSH 连接并返回 SshSession
pub struct SshClient {
    /// 连接配置
    config: SshConfig,
}

impl SshClient {
    /// 创建新的 SSH 客户端
    pub fn new(config: SshConfig) -> Self {
        Self { config }
    }

    /// 执行连接（异步）
    /// 返回带 SFTP 子会话的 SshSession
    pub async fn connect(
        &self,
        session_id: String,
        key: LoadedKey,
        log: &mut TransferLog,
    ) -> Result<SshSession, SshError> {
        let timeouts = &self.config.timeouts;
        log.info(format!(
            "Connecting to {}:{}",
            self.config.host, self.config.port
        ));
        log.info(format!("User: {}", self.config.username));

        // 阶段 1: TCP 连接（含 DNS 解析）
        let tcp_stream = timeout(
            timeouts.connect(),
            TcpStream::connect((self.config.host.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| SshError::Timeout {
            stage: "Connection",
            secs: timeouts.connect_secs,
        })?
        .map_err(SshError::Io)?;

        // 阶段 2: SSH 握手
        let (log_tx, mut log_rx) = mpsc::unbounded_channel::<LogEntry>();
        let handler = SshClientHandler::new(
            log_tx,
            self.config.host.clone(),
            self.config.host_key_policy.clone(),
        );
        let russh_config = Arc::new(self.config.to_russh_config());

        let handshake = timeout(
            timeouts.banner(),
            russh::client::connect_stream(russh_config, tcp_stream, handler),
        )
        .await;

        // Handler 在握手期间产生的日志并入请求日志
        while let Ok(entry) = log_rx.try_recv() {
            log.push(entry);
        }

        let mut handle = handshake
            .map_err(|_| SshError::Timeout {
                stage: "Banner",
                secs: timeouts.banner_secs,
            })??;

        // 阶段 3: 认证
        let algorithm = key.algorithm;
        timeout(timeouts.auth(), self.authenticate(&mut handle, key))
            .await
            .map_err(|_| SshError::Timeout {
                stage: "Authentication",
                secs: timeouts.auth_secs,
            })??;
        log.info(format!(
            "SSH connection established ({} key accepted)",
            algorithm
        ));

        // 阶段 4: SFTP 子系统
        log.info("Opening SFTP session...");
        let sftp = timeout(timeouts.sftp(), self.open_sftp(&handle, &session_id))
            .await
            .map_err(|_| SshError::Timeout {
                stage: "SFTP session",
                secs: timeouts.sftp_secs,
            })??;
        log.info("SFTP session established");

        Ok(SshSession::new(
            session_id,
            handle,
            sftp,
            self.config.host.clone(),
            self.config.username.clone(),
        ))
    }

    /// 执行公钥认证
    async fn authenticate(
        &self,
        handle: &mut Handle<SshClientHandler>,
        key: LoadedKey,
    ) -> Result<(), SshError> {
        use russh::client::AuthResult;

        // RSA 私钥按服务器支持的最佳哈希签名
        let hash_alg = handle.best_supported_rsa_hash().await?.flatten();
        let key_with_alg = russh::keys::PrivateKeyWithHashAlg::new(Arc::new(key.key), hash_alg);

        let auth_result = handle
            .authenticate_publickey(&self.config.username, key_with_alg)
            .await?;

        match auth_result {
            AuthResult::Success => Ok(()),
            AuthResult::Failure {
                remaining_methods,
                partial_success,
            } => {
                if partial_success {
                    return Err(SshError::Auth(
                        "Partial authentication - additional auth required".to_string(),
                    ));
                }
                Err(SshError::Auth(format!(
                    "Public key rejected for user '{}'. Server suggests: {:?}",
                    self.config.username, remaining_methods
                )))
            }
        }
    }

    /// 打开会话通道并请求 SFTP 子系统
    async fn open_sftp(
        &self,
        handle: &Handle<SshClientHandler>,
        session_id: &str,
    ) -> Result<SftpService, SshError> {
        let channel = handle
            .channel_open_session()
            .await
            .map_err(|e| SshError::Channel(format!("Failed to open channel: {}", e)))?;

        channel
            .request_subsystem(true, "sftp")
            .await
            .map_err(|e| SshError::Channel(format!("Failed to request sftp subsystem: {}", e)))?;

        SftpService::new(
            session_id.to_string(),
            channel.into_stream(),
            self.config.timeouts.sftp(),
        )
        .await
    }
}
