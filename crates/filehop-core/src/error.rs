//! 错误类型
//!
//! 向导操作失败时返回的错误。除 `NoFilesSelected` 外都不会产生用户通知，
//! 由调用方决定是否记录日志。

use crate::catalog::{FileId, PlatformKind, ProviderKind};
use crate::wizard::Step;

#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("Unknown platform: {0}")]
    UnknownPlatform(String),

    #[error("Unknown destination: {0}")]
    UnknownDestination(String),

    #[error("Platform {0} is not in the catalog")]
    PlatformMissing(PlatformKind),

    #[error("Destination {0} is not in the catalog")]
    DestinationMissing(ProviderKind),

    #[error("Platform {0} is not connected")]
    PlatformNotConnected(PlatformKind),

    #[error("Destination {0} is not connected")]
    DestinationNotConnected(ProviderKind),

    #[error("File not found: {0}")]
    UnknownFile(FileId),

    #[error("No platform selected")]
    NoPlatformSelected,

    #[error("No files selected")]
    NoFilesSelected,

    #[error("No destination selected")]
    NoDestinationSelected,

    #[error("Cannot advance past {0:?}")]
    NoNextStep(Step),

    #[error("A transfer is already running")]
    TransferInProgress,

    #[error("The transfer has finished; restart to begin a new one")]
    TransferFinished,

    #[error("Transfers start from Review, not {0:?}")]
    NotAtReview(Step),

    #[error("Failed to load catalog: {0}")]
    Catalog(String),
}
