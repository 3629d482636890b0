// 业务服务模块
//
// - download: 下载流程编排
// - fetch: 目录列举与单文件拉取
// - settings: 服务配置加载
// - sftp: SFTP 后端与远程文件系统抽象

pub mod download;
pub mod fetch;
pub mod settings;
pub mod sftp;

pub use download::{DownloadOutcome, DownloadService};
