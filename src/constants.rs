// 服务常量

/// 服务标识（health 接口返回）
pub mod service {
    pub const NAME: &str = "sftp-fetch";
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 8000;
}

/// SSH 默认值
pub mod ssh {
    pub const DEFAULT_PORT: u16 = 22;
    pub const CONNECT_TIMEOUT_SECS: u64 = 120;
    pub const AUTH_TIMEOUT_SECS: u64 = 60;
    pub const BANNER_TIMEOUT_SECS: u64 = 60;
    pub const SFTP_TIMEOUT_SECS: u64 = 180;
}

/// 请求字段长度限制
pub mod limits {
    pub const MAX_HOSTNAME_LEN: usize = 255;
    pub const MAX_USERNAME_LEN: usize = 255;
    pub const MIN_PRIVATE_KEY_LEN: usize = 10;
    pub const MAX_REMOTE_PATH_LEN: usize = 1000;
    pub const MAX_FILENAME_LEN: usize = 255;
    /// 目录列表日志里最多展示的文件名数量
    pub const LISTING_PREVIEW: usize = 10;
}
