//! Filehop Core Library
//!
//! 把社交平台上的文件搬到云存储的传输向导。所有数据都是内置的演示数据，
//! 传输过程由定时递增的进度模拟。
//!
//! # 模块
//!
//! - **catalog**: 来源平台、目标存储和候选文件
//! - **wizard**: 多步向导状态机
//! - **transfer**: 可取消的进度模拟任务
//! - **notify**: 注入式通知接口
//! - **config**: 设置的加载与保存
//!
//! # 使用示例
//!
//! ```ignore
//! use filehop_core::{AppSettings, ChannelSink, PlatformKind, Wizard};
//!
//! let settings = AppSettings::load();
//! let (sink, mut notices) = ChannelSink::new();
//! let mut wizard = Wizard::new(settings.catalog()?, sink)
//!     .with_tick_interval(settings.tick_interval())
//!     .with_organization(settings.default_organization);
//!
//! wizard.select_platform(PlatformKind::Telegram)?;
//! wizard.advance()?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod logging;
pub mod notify;
pub mod transfer;
pub mod wizard;

// Catalog re-exports
pub use catalog::{
    CandidateFile, Catalog, DestinationProvider, FileCategory, FileId, PlatformKind,
    ProviderKind, SourcePlatform,
};

pub use config::AppSettings;
pub use error::WizardError;
pub use logging::{LogEntry, LogLevel};
pub use notify::{ChannelSink, LogSink, Notice, NotificationSink, Severity};

// Transfer re-exports
pub use transfer::{
    DEFAULT_TICK_INTERVAL, PROGRESS_MAX, PROGRESS_STEP, ProgressEvent, RunId, TransferHandle,
    TransferRun,
};

// Wizard re-exports
pub use wizard::{FolderNode, OrganizationSettings, Step, TransferSummary, Transition, Wizard};
