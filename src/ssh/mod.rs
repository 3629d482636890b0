// SSH 连接模块
//
// 模块结构:
// - config: 连接配置 (SshConfig, TimeoutConfig, HostKeyPolicy)
// - error: 错误类型 (SshError)
// - keys: 私钥解析与规范化 (LoadedKey, KeyAlgorithm)
// - log: 请求级日志 (TransferLog, LogEntry)
// - handler: russh Handler 实现（主机密钥策略）
// - client: SSH 客户端核心
// - session: SSH 会话（传输层 + SFTP 子会话）
// - connector: 连接启动器 (Connector, SshConnector)

pub mod client;
pub mod config;
pub mod connector;
pub mod error;
pub mod handler;
pub mod keys;
pub mod log;
pub mod session;

// 公开导出
pub use config::{HostKeyPolicy, SshConfig, TimeoutConfig};
pub use connector::{Connector, SshConnector};
pub use error::SshError;
pub use keys::load_private_key;
pub use log::{LogSource, TransferLog};
