// SSH 连接配置

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::ssh as defaults;

/// SSH 连接配置
#[derive(Clone, Debug)]
pub struct SshConfig {
    /// 目标主机
    pub host: String,
    /// 端口
    pub port: u16,
    /// 用户名
    pub username: String,
    /// 各阶段超时
    pub timeouts: TimeoutConfig,
    /// 主机密钥校验策略
    pub host_key_policy: HostKeyPolicy,
}

impl Default for SshConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            port: defaults::DEFAULT_PORT,
            username: String::new(),
            timeouts: TimeoutConfig::default(),
            host_key_policy: HostKeyPolicy::default(),
        }
    }
}

/// 超时配置（秒）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// DNS 解析 + TCP 连接
    pub connect_secs: u64,
    /// 版本交换与密钥交换
    pub banner_secs: u64,
    /// 公钥认证
    pub auth_secs: u64,
    /// SFTP 单次操作
    pub sftp_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: defaults::CONNECT_TIMEOUT_SECS,
            banner_secs: defaults::BANNER_TIMEOUT_SECS,
            auth_secs: defaults::AUTH_TIMEOUT_SECS,
            sftp_secs: defaults::SFTP_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn connect(&self) -> Duration {
        Duration::from_secs(self.connect_secs)
    }

    pub fn banner(&self) -> Duration {
        Duration::from_secs(self.banner_secs)
    }

    pub fn auth(&self) -> Duration {
        Duration::from_secs(self.auth_secs)
    }

    pub fn sftp(&self) -> Duration {
        Duration::from_secs(self.sftp_secs)
    }
}

/// 主机密钥校验策略
///
/// 默认 `AcceptAny`：首次信任，任何服务器公钥都会被接受，只记录指纹。
/// 这是已知的信任边界弱点，部署方可以改为 `Pinned` 固定指纹。
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum HostKeyPolicy {
    #[default]
    AcceptAny,
    /// 只接受列出的 SHA256 指纹（形如 `SHA256:...`）
    Pinned { fingerprints: Vec<String> },
}

impl HostKeyPolicy {
    /// 按策略判断给定指纹是否可信
    pub fn allows(&self, fingerprint: &str) -> bool {
        match self {
            HostKeyPolicy::AcceptAny => true,
            HostKeyPolicy::Pinned { fingerprints } => {
                fingerprints.iter().any(|f| f.trim() == fingerprint)
            }
        }
    }
}

/// russh 客户端配置构建
impl SshConfig {
    /// 构建 russh 配置
    pub fn to_russh_config(&self) -> russh::client::Config {
        let mut config = russh::client::Config::default();
        // 传输阶段的空闲上限与 SFTP 操作超时保持一致
        config.inactivity_timeout = Some(self.timeouts.sftp());
        config
    }

    /// 日志用的目标描述
    pub fn target(&self) -> String {
        format!("{}@{}:{}", self.username, self.host, self.port)
    }
}
