// 请求级日志
//
// 每个请求持有自己的 TransferLog，按引用逐层传递，
// 并发请求之间不会互相穿插日志。每条日志同时输出到 tracing。

use chrono::{DateTime, Utc};

/// 日志级别
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// 日志来源，决定转发到 tracing 时的前缀
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogSource {
    #[default]
    Ssh,
    Sftp,
}

impl LogSource {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Ssh => "[SSH]",
            Self::Sftp => "[SFTP]",
        }
    }
}

/// 日志条目
#[derive(Clone, Debug)]
pub struct LogEntry {
    /// 时间戳
    pub timestamp: DateTime<Utc>,
    /// 日志级别
    pub level: LogLevel,
    /// 消息内容
    pub message: String,
}

impl LogEntry {
    /// 创建新的日志条目
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(LogLevel::Error, message)
    }

    /// 响应中的展示格式：`[HH:MM:SS] message`
    pub fn format_line(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// 单个请求的日志收集器
#[derive(Debug, Default)]
pub struct TransferLog {
    entries: Vec<LogEntry>,
    source: LogSource,
}

impl TransferLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换后续日志的来源
    pub fn set_source(&mut self, source: LogSource) {
        self.source = source;
    }

    fn traced_line(&self, entry: &LogEntry) -> String {
        format!("{} {}", self.source.tag(), entry.message)
    }

    /// 记录一条日志并转发到 tracing
    pub fn push(&mut self, entry: LogEntry) {
        let line = self.traced_line(&entry);
        match entry.level {
            LogLevel::Info => tracing::info!("{}", line),
            LogLevel::Warn => tracing::warn!("{}", line),
            LogLevel::Error => tracing::error!("{}", line),
        }
        self.entries.push(entry);
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(LogEntry::info(message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.push(LogEntry::warn(message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(LogEntry::error(message));
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// 转换为响应中的日志行
    pub fn into_lines(self) -> Vec<String> {
        self.entries.iter().map(LogEntry::format_line).collect()
    }
}
