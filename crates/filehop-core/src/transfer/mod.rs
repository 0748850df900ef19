//! 模拟传输
//!
//! 传输本身不存在：后台任务每隔固定间隔把进度增加 [`PROGRESS_STEP`]，
//! 直到 100。任务通过 channel 发送 [`ProgressEvent`]，由向导的所有者逐个应用。
//!
//! # 使用示例
//!
//! ```ignore
//! let mut handle = wizard.run_transfer()?;
//! while let Some(event) = handle.next_event().await {
//!     wizard.apply(event);
//! }
//! ```

mod simulator;

pub use simulator::TransferHandle;

use crate::catalog::{PlatformKind, ProviderKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 每次 tick 增加的进度
pub const PROGRESS_STEP: u8 = 5;

/// 进度上限
pub const PROGRESS_MAX: u8 = 100;

/// 默认 tick 间隔
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(200);

/// 一次运行的标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(uuid::Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 进度事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressEvent {
    pub run: RunId,
    pub progress: u8,
}

/// 一次运行的状态
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRun {
    pub id: RunId,
    pub progress: u8,
    pub transferring: bool,
    /// 开始时勾选的文件数
    pub file_count: usize,
    pub platform: PlatformKind,
    pub destination: ProviderKind,
}

impl TransferRun {
    pub(crate) fn start(file_count: usize, platform: PlatformKind, destination: ProviderKind) -> Self {
        Self {
            id: RunId::new(),
            progress: 0,
            transferring: true,
            file_count,
            platform,
            destination,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= PROGRESS_MAX
    }

    /// 应用一个进度值，返回本次是否刚好完成
    ///
    /// 进度只增不减，且不超过 100；完成后不再变化。
    pub(crate) fn advance_to(&mut self, progress: u8) -> bool {
        if self.is_complete() {
            return false;
        }
        self.progress = self.progress.max(progress.min(PROGRESS_MAX));
        if self.is_complete() {
            self.transferring = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_is_monotonic() {
        let mut run = TransferRun::start(2, PlatformKind::Telegram, ProviderKind::Dropbox);
        assert!(!run.advance_to(40));
        assert!(!run.advance_to(10));
        assert_eq!(run.progress, 40);
    }

    #[test]
    fn test_progress_is_bounded() {
        let mut run = TransferRun::start(1, PlatformKind::Telegram, ProviderKind::Dropbox);
        assert!(run.advance_to(250));
        assert_eq!(run.progress, PROGRESS_MAX);
        assert!(!run.transferring);
    }

    #[test]
    fn test_complete_run_is_terminal() {
        let mut run = TransferRun::start(1, PlatformKind::Telegram, ProviderKind::Dropbox);
        assert!(run.advance_to(100));
        assert!(!run.advance_to(100));
        assert_eq!(run.progress, 100);
    }

    #[test]
    fn test_twenty_steps_to_complete() {
        let mut run = TransferRun::start(3, PlatformKind::Discord, ProviderKind::GoogleDrive);
        let mut ticks = 0;
        let mut progress = 0;
        while !run.is_complete() {
            progress += PROGRESS_STEP;
            run.advance_to(progress);
            ticks += 1;
        }
        assert_eq!(ticks, 20);
    }
}
