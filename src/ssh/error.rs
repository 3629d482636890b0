// SSH / SFTP 错误类型定义

use axum::http::StatusCode;
use thiserror::Error;

/// SSH 错误类型
#[derive(Debug, Error)]
pub enum SshError {
    /// IO 错误（网络连接等）
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// 认证失败
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// SSH 协议错误
    #[error("SSH protocol error: {0}")]
    Protocol(String),

    /// 私钥无法加载
    #[error("Unable to load private key: {0}")]
    Key(String),

    /// 主机密钥被策略拒绝
    #[error("Host key rejected: {0}")]
    HostKey(String),

    /// 远程目录不可访问
    #[error("Unable to access directory {path}: {message}")]
    Path { path: String, message: String },

    /// 操作超时
    #[error("{stage} timeout after {secs}s")]
    Timeout { stage: &'static str, secs: u64 },

    /// 通道错误
    #[error("Channel error: {0}")]
    Channel(String),

    /// SFTP 子系统错误
    #[error("SFTP error: {0}")]
    Sftp(String),
}

impl SshError {
    /// 对应的 HTTP 状态码
    ///
    /// 密钥与路径属于调用方输入错误，认证失败单独返回 401，
    /// 其余（网络、协议、超时）一律视为服务端基础设施故障。
    pub fn status(&self) -> StatusCode {
        match self {
            SshError::Key(_) | SshError::Path { .. } => StatusCode::BAD_REQUEST,
            SshError::Auth(_) => StatusCode::UNAUTHORIZED,
            SshError::Io(_)
            | SshError::Protocol(_)
            | SshError::HostKey(_)
            | SshError::Timeout { .. }
            | SshError::Channel(_)
            | SshError::Sftp(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<russh::Error> for SshError {
    fn from(e: russh::Error) -> Self {
        SshError::Protocol(e.to_string())
    }
}

impl From<russh::keys::Error> for SshError {
    fn from(e: russh::keys::Error) -> Self {
        SshError::Key(e.to_string())
    }
}

impl From<russh_sftp::client::error::Error> for SshError {
    fn from(e: russh_sftp::client::error::Error) -> Self {
        SshError::Sftp(e.to_string())
    }
}
