//! 日志模块
//!
//! 前端共用的日志级别和条目定义，TUI 日志面板用它来过滤和着色。

use crate::notify::{Notice, Severity};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 日志级别
///
/// 实现了 `PartialOrd` 以便过滤：数值越大越详细。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    /// 获取对应的 Emoji 图标
    pub fn icon(&self) -> &'static str {
        match self {
            LogLevel::Error => "❌",
            LogLevel::Warn => "⚠️",
            LogLevel::Info => "ℹ️",
            LogLevel::Debug => "🔍",
            LogLevel::Trace => "📝",
        }
    }

    /// 获取显示名称
    pub fn name(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// 面板过滤级别在 Info 和 Debug 之间切换
    pub fn toggle_verbose(self) -> Self {
        match self {
            LogLevel::Debug | LogLevel::Trace => LogLevel::Info,
            LogLevel::Error | LogLevel::Warn | LogLevel::Info => LogLevel::Debug,
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "TRACE" => Ok(LogLevel::Trace),
            other => Err(format!("unknown log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<Severity> for LogLevel {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Error => LogLevel::Warn,
            Severity::Info | Severity::Success => LogLevel::Info,
        }
    }
}

/// 日志条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    /// 把用户通知记入日志
    pub fn from_notice(notice: &Notice) -> Self {
        Self::new(
            notice.severity.into(),
            format!("{}: {}", notice.title, notice.description),
        )
    }

    /// 是否应在给定过滤级别下显示
    pub fn visible_at(&self, filter: LogLevel) -> bool {
        self.level <= filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_filtering() {
        let debug = LogEntry::new(LogLevel::Debug, "tick");
        let warn = LogEntry::new(LogLevel::Warn, "careful");

        assert!(!debug.visible_at(LogLevel::Info));
        assert!(debug.visible_at(LogLevel::Debug));
        assert!(warn.visible_at(LogLevel::Info));
    }

    #[test]
    fn test_toggle_verbose() {
        assert_eq!(LogLevel::Info.toggle_verbose(), LogLevel::Debug);
        assert_eq!(LogLevel::Debug.toggle_verbose(), LogLevel::Info);
    }

    #[test]
    fn test_from_notice() {
        let notice = Notice::new("No files selected", "Pick one.", Severity::Error);
        let entry = LogEntry::from_notice(&notice);
        assert_eq!(entry.level, LogLevel::Warn);
        assert_eq!(entry.message, "No files selected: Pick one.");
    }
}
