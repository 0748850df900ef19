//! 来源平台、存储服务和文件类别的封闭枚举
//!
//! 字符串 ID 只在解析边界（`FromStr` 和 serde）出现，其余代码一律穷尽匹配。

use crate::error::WizardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 来源平台
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformKind {
    Telegram,
    Discord,
    WhatsApp,
    Reddit,
}

impl PlatformKind {
    pub const ALL: [PlatformKind; 4] = [
        PlatformKind::Telegram,
        PlatformKind::Discord,
        PlatformKind::WhatsApp,
        PlatformKind::Reddit,
    ];

    /// 稳定 ID（命令行参数和 JSON 中使用）
    pub fn id(&self) -> &'static str {
        match self {
            PlatformKind::Telegram => "telegram",
            PlatformKind::Discord => "discord",
            PlatformKind::WhatsApp => "whatsapp",
            PlatformKind::Reddit => "reddit",
        }
    }

    /// 显示名称
    pub fn name(&self) -> &'static str {
        match self {
            PlatformKind::Telegram => "Telegram",
            PlatformKind::Discord => "Discord",
            PlatformKind::WhatsApp => "WhatsApp",
            PlatformKind::Reddit => "Reddit",
        }
    }
}

impl fmt::Display for PlatformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlatformKind {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        PlatformKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted || kind.name().to_lowercase() == wanted)
            .ok_or_else(|| WizardError::UnknownPlatform(s.to_string()))
    }
}

/// 云存储服务
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    #[serde(rename = "gdrive")]
    GoogleDrive,
    #[serde(rename = "dropbox")]
    Dropbox,
    #[serde(rename = "onedrive")]
    OneDrive,
}

impl ProviderKind {
    pub const ALL: [ProviderKind; 3] = [
        ProviderKind::GoogleDrive,
        ProviderKind::Dropbox,
        ProviderKind::OneDrive,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::GoogleDrive => "gdrive",
            ProviderKind::Dropbox => "dropbox",
            ProviderKind::OneDrive => "onedrive",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::GoogleDrive => "Google Drive",
            ProviderKind::Dropbox => "Dropbox",
            ProviderKind::OneDrive => "OneDrive",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ProviderKind {
    type Err = WizardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.id() == wanted || kind.name().to_lowercase() == wanted)
            .ok_or_else(|| WizardError::UnknownDestination(s.to_string()))
    }
}

/// 文件类别
///
/// 声明顺序即文件夹预览中的顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileCategory {
    Image,
    Video,
    Document,
    Audio,
}

impl FileCategory {
    pub fn label(&self) -> &'static str {
        match self {
            FileCategory::Image => "image",
            FileCategory::Video => "video",
            FileCategory::Document => "document",
            FileCategory::Audio => "audio",
        }
    }

    /// 整理时使用的文件夹名
    pub fn folder_name(&self) -> &'static str {
        match self {
            FileCategory::Image => "Images",
            FileCategory::Video => "Videos",
            FileCategory::Document => "Documents",
            FileCategory::Audio => "Audio",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            FileCategory::Image => "🖼️",
            FileCategory::Video => "🎬",
            FileCategory::Document => "📄",
            FileCategory::Audio => "🎵",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_from_str() {
        assert_eq!("telegram".parse::<PlatformKind>().unwrap(), PlatformKind::Telegram);
        assert_eq!("WhatsApp".parse::<PlatformKind>().unwrap(), PlatformKind::WhatsApp);
        assert!(matches!(
            "myspace".parse::<PlatformKind>(),
            Err(WizardError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_provider_from_str() {
        assert_eq!("gdrive".parse::<ProviderKind>().unwrap(), ProviderKind::GoogleDrive);
        assert_eq!("Google Drive".parse::<ProviderKind>().unwrap(), ProviderKind::GoogleDrive);
        assert!("s3".parse::<ProviderKind>().is_err());
    }

    #[test]
    fn test_serde_ids_match() {
        for kind in ProviderKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
        for kind in PlatformKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }
}
