//! 用户通知
//!
//! 向导通过注入的 [`NotificationSink`] 发出通知，不依赖任何全局状态。

use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn icon(&self) -> &'static str {
        match self {
            Severity::Info => "ℹ️",
            Severity::Success => "✅",
            Severity::Error => "❌",
        }
    }
}

/// 一条通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity.icon(), self.title, self.description)
    }
}

/// 通知接收端
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notice: &Notice);
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, notice: &Notice) {
        (**self).notify(notice);
    }
}

/// 把通知转发到 channel，供 UI 事件循环消费
pub struct ChannelSink {
    tx: mpsc::Sender<Notice>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::Receiver<Notice>) {
        let (tx, rx) = mpsc::channel(32);
        (Self { tx }, rx)
    }
}

impl NotificationSink for ChannelSink {
    fn notify(&self, notice: &Notice) {
        // 非阻塞；队列满或接收端关闭时丢弃
        match self.tx.try_send(notice.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(dropped)) => {
                log::debug!("Notice queue full, dropping \"{}\"", dropped.title);
            }
            Err(TrySendError::Closed(dropped)) => {
                log::debug!("Notice receiver gone, dropping \"{}\"", dropped.title);
            }
        }
    }
}

/// 把通知写入日志
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn notify(&self, notice: &Notice) {
        match notice.severity {
            Severity::Error => log::warn!("{}: {}", notice.title, notice.description),
            Severity::Info | Severity::Success => {
                log::info!("{}: {}", notice.title, notice.description);
            }
        }
    }
}
