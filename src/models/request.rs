// 下载请求模型与字段校验

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::limits;
use crate::constants::ssh::DEFAULT_PORT;
use crate::ssh::keys::has_private_key_markers;

/// 期望下载的文件
#[derive(Clone, Debug, Deserialize)]
pub struct ExpectedFile {
    pub filename: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// 连接参数
#[derive(Clone, Deserialize)]
pub struct ConnectionRequest {
    pub hostname: String,
    #[serde(default = "default_port")]
    pub port: u32,
    pub username: String,
    pub private_key: String,
}

fn default_port() -> u32 {
    DEFAULT_PORT as u32
}

// 私钥不进入任何日志
impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("hostname", &self.hostname)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// 下载请求
#[derive(Clone, Debug, Deserialize)]
pub struct DownloadRequest {
    pub connection: ConnectionRequest,
    pub remote_path: String,
    pub expected_files: Vec<ExpectedFile>,
}

/// 字段校验错误
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

fn check_length(
    errors: &mut Vec<FieldError>,
    field: &str,
    value: &str,
    min: usize,
    max: Option<usize>,
) {
    let len = value.chars().count();
    if len < min {
        errors.push(FieldError::new(
            field,
            format!("must be at least {} characters", min),
        ));
    } else if let Some(max) = max {
        if len > max {
            errors.push(FieldError::new(
                field,
                format!("must be at most {} characters", max),
            ));
        }
    }
}

impl DownloadRequest {
    /// 校验所有字段，返回全部错误而不是第一个
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let conn = &self.connection;

        check_length(
            &mut errors,
            "connection.hostname",
            &conn.hostname,
            1,
            Some(limits::MAX_HOSTNAME_LEN),
        );
        if !(1..=65535).contains(&conn.port) {
            errors.push(FieldError::new(
                "connection.port",
                "must be between 1 and 65535",
            ));
        }
        check_length(
            &mut errors,
            "connection.username",
            &conn.username,
            1,
            Some(limits::MAX_USERNAME_LEN),
        );
        check_length(
            &mut errors,
            "connection.private_key",
            &conn.private_key,
            limits::MIN_PRIVATE_KEY_LEN,
            None,
        );
        if !has_private_key_markers(&conn.private_key) {
            errors.push(FieldError::new(
                "connection.private_key",
                "Invalid private key format",
            ));
        }
        check_length(
            &mut errors,
            "remote_path",
            &self.remote_path,
            1,
            Some(limits::MAX_REMOTE_PATH_LEN),
        );
        for (i, file) in self.expected_files.iter().enumerate() {
            check_length(
                &mut errors,
                &format!("expected_files[{}].filename", i),
                &file.filename,
                1,
                Some(limits::MAX_FILENAME_LEN),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 校验通过后的端口
    pub fn port(&self) -> u16 {
        u16::try_from(self.connection.port).unwrap_or(DEFAULT_PORT)
    }
}
