// 服务配置
//
// 配置文件: <config_dir>/sftp-fetch/settings.json，可用 SFTP_FETCH_CONFIG 指定
// 文件不存在时使用默认值，环境变量覆盖文件中的值

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::constants::service;
use crate::ssh::{HostKeyPolicy, TimeoutConfig};

pub const CONFIG_PATH_ENV: &str = "SFTP_FETCH_CONFIG";
pub const BIND_ENV: &str = "SFTP_FETCH_BIND";
pub const PORT_ENV: &str = "SFTP_FETCH_PORT";
pub const INCLUDE_LOGS_ENV: &str = "SFTP_FETCH_INCLUDE_LOGS";

/// 服务设置
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    pub bind_address: String,
    pub port: u16,
    /// 是否在响应中返回请求日志
    pub include_logs: bool,
    pub timeouts: TimeoutConfig,
    pub host_key_policy: HostKeyPolicy,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            bind_address: service::DEFAULT_BIND_ADDRESS.to_string(),
            port: service::DEFAULT_PORT,
            include_logs: true,
            timeouts: TimeoutConfig::default(),
            host_key_policy: HostKeyPolicy::default(),
        }
    }
}

impl ServiceSettings {
    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_address, self.port)
            .parse()
            .with_context(|| format!("无效的监听地址: {}:{}", self.bind_address, self.port))
    }

    /// 用环境变量覆盖设置，lookup 便于测试注入
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup(BIND_ENV) {
            self.bind_address = bind;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("{} 不是有效端口: {}", PORT_ENV, port))?;
        }
        if let Some(flag) = lookup(INCLUDE_LOGS_ENV) {
            self.include_logs = parse_flag(&flag)
                .with_context(|| format!("{} 不是有效布尔值: {}", INCLUDE_LOGS_ENV, flag))?;
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// 获取配置目录路径
/// Linux: ~/.config/sftp-fetch
pub fn get_config_dir() -> Result<PathBuf> {
    Ok(dirs::config_dir()
        .context("无法获取系统配置目录")?
        .join(service::NAME))
}

/// 配置文件路径，环境变量优先
pub fn get_settings_file() -> Result<PathBuf> {
    match std::env::var_os(CONFIG_PATH_ENV) {
        Some(path) => Ok(PathBuf::from(path)),
        None => Ok(get_config_dir()?.join("settings.json")),
    }
}

/// 从指定文件加载设置，文件不存在时返回默认值
pub fn load_settings_from(path: &Path) -> Result<ServiceSettings> {
    if !path.exists() {
        return Ok(ServiceSettings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
    let settings: ServiceSettings = serde_json::from_str(&content)
        .with_context(|| format!("无法解析配置文件: {}", path.display()))?;
    Ok(settings)
}

/// 加载设置并应用环境变量覆盖
pub fn load_settings() -> Result<ServiceSettings> {
    let path = get_settings_file()?;
    let mut settings = load_settings_from(&path)?;
    settings.apply_overrides(|key| std::env::var(key).ok())?;
    tracing::debug!("[API] Settings loaded from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}", uuid::Uuid::new_v4(), name));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join(format!("{}-absent.json", uuid::Uuid::new_v4()));
        let settings = load_settings_from(&path).unwrap();
        assert_eq!(settings, ServiceSettings::default());
        assert_eq!(settings.port, 8000);
        assert!(settings.include_logs);
        assert_eq!(settings.timeouts.connect_secs, 120);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = temp_file(
            "settings.json",
            r#"{"port": 9090, "timeouts": {"sftp_secs": 30}}"#,
        );
        let settings = load_settings_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.port, 9090);
        assert_eq!(settings.bind_address, "0.0.0.0");
        assert_eq!(settings.timeouts.sftp_secs, 30);
        assert_eq!(settings.timeouts.auth_secs, 60);
    }

    #[test]
    fn test_invalid_file_is_error() {
        let path = temp_file("broken.json", "{ port: ");
        let result = load_settings_from(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            (BIND_ENV, "127.0.0.1"),
            (PORT_ENV, " 8081 "),
            (INCLUDE_LOGS_ENV, "off"),
        ]
        .into();
        let mut settings = ServiceSettings::default();
        settings
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(settings.bind_address, "127.0.0.1");
        assert_eq!(settings.port, 8081);
        assert!(!settings.include_logs);
        assert_eq!(settings.socket_addr().unwrap().to_string(), "127.0.0.1:8081");
    }

    #[test]
    fn test_bad_override_is_error() {
        let mut settings = ServiceSettings::default();
        assert!(settings
            .apply_overrides(|key| (key == PORT_ENV).then(|| "http".to_string()))
            .is_err());
        assert!(settings
            .apply_overrides(|key| (key == INCLUDE_LOGS_ENV).then(|| "maybe".to_string()))
            .is_err());
    }
}
