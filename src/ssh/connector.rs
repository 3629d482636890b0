// 连接启动器
// 下载流程通过 Connector 获取远程会话，测试中可替换为内存实现

use async_trait::async_trait;
use uuid::Uuid;

use super::client::SshClient;
use super::config::SshConfig;
use super::error::SshError;
use super::keys::LoadedKey;
use super::log::TransferLog;
use crate::services::sftp::RemoteSession;

/// 建立已认证、已打开 SFTP 的远程会话
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        config: &SshConfig,
        key: LoadedKey,
        log: &mut TransferLog,
    ) -> Result<Box<dyn RemoteSession>, SshError>;
}

/// 基于 russh 的真实连接器
#[derive(Clone, Copy, Debug, Default)]
pub struct SshConnector;

#[async_trait]
impl Connector for SshConnector {
    async fn connect(
        &self,
        config: &SshConfig,
        key: LoadedKey,
        log: &mut TransferLog,
    ) -> Result<Box<dyn RemoteSession>, SshError> {
        let session_id = Uuid::new_v4().to_string();
        let session = SshClient::new(config.clone())
            .connect(session_id, key, log)
            .await?;
        Ok(Box::new(session))
    }
}
