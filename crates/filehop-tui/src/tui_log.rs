//! TUI 日志层
//!
//! 自定义 tracing Layer，将日志发送到 TUI 的日志面板。

use crate::app::AppEvent;
use std::fmt;
use tokio::sync::mpsc;
use tracing::{Event, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::layer::Context;

/// 发送日志到 TUI 的 Layer
pub struct TuiLogLayer {
    tx: mpsc::Sender<AppEvent>,
}

impl TuiLogLayer {
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl<S> Layer<S> for TuiLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = event.metadata().level().to_string();

        let mut message = String::new();
        event.record(&mut MessageVisitor(&mut message));

        // 经 tracing-log 桥接的记录没有 message 字段时退回到 target
        if message.is_empty() {
            message = event.metadata().target().to_string();
        }

        // 非阻塞；面板来不及消费时丢弃
        let _ = self.tx.try_send(AppEvent::LogMessage { level, message });
    }
}

/// 提取事件中的 message 字段
struct MessageVisitor<'a>(&'a mut String);

impl tracing::field::Visit for MessageVisitor<'_> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        } else if self.0.is_empty() {
            *self.0 = format!("{}={:?}", field.name(), value);
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        } else if self.0.is_empty() {
            *self.0 = format!("{}={}", field.name(), value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt;

    #[test]
    fn test_forwards_events() {
        let (tx, mut rx) = mpsc::channel(8);
        let subscriber = tracing_subscriber::registry().with(TuiLogLayer::new(tx));

        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!("quota almost full");
            tracing::info!(step = "review");
        });

        let AppEvent::LogMessage { level, message } = rx.try_recv().unwrap();
        assert_eq!(level, "WARN");
        assert_eq!(message, "quota almost full");

        let AppEvent::LogMessage { message, .. } = rx.try_recv().unwrap();
        assert_eq!(message, "step=review");
    }
}
