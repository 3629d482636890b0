// SFTP 后端服务

mod path;
mod service;

use async_trait::async_trait;

use crate::ssh::SshError;

pub use path::join_path;
pub use service::SftpService;

/// 远程文件系统的只读操作
#[async_trait]
pub trait RemoteFs: Send + Sync {
    /// 列出目录下的条目名（不含 `.` 与 `..`，不区分文件与目录）
    async fn list_dir(&self, path: &str) -> Result<Vec<String>, SshError>;

    /// 远程文件大小
    async fn file_size(&self, path: &str) -> Result<u64, SshError>;

    /// 整个文件读入内存
    async fn read_file(&self, path: &str) -> Result<Vec<u8>, SshError>;
}

/// 已建立的远程会话，使用完毕必须关闭
#[async_trait]
pub trait RemoteSession: RemoteFs {
    async fn close(&mut self);
}
