//! 内置演示数据

use super::{
    CandidateFile, Catalog, DestinationProvider, FileCategory, FileId, PlatformKind,
    ProviderKind, SourcePlatform,
};

impl Catalog {
    /// 演示数据：两个已连接平台、两个已连接存储、六个未勾选文件
    pub fn demo() -> Self {
        let platforms = vec![
            platform(PlatformKind::Telegram, "@john_doe", true),
            platform(PlatformKind::Discord, "john_doe#1234", true),
            platform(PlatformKind::WhatsApp, "+1 234 567 8900", false),
            platform(PlatformKind::Reddit, "u/johndoe123", false),
        ];

        let destinations = vec![
            destination(ProviderKind::GoogleDrive, "john.doe@gmail.com", true, 45.0, 100.0),
            destination(ProviderKind::Dropbox, "john.doe@example.com", true, 12.0, 16.0),
            destination(ProviderKind::OneDrive, "john.doe@outlook.com", false, 0.0, 5.0),
        ];

        let files = vec![
            file(1, "vacation-photos-2024.zip", "245 MB", FileCategory::Image),
            file(2, "meeting-recording.mp4", "1.2 GB", FileCategory::Video),
            file(3, "project-documents.pdf", "45 MB", FileCategory::Document),
            file(4, "podcast-episode.mp3", "89 MB", FileCategory::Audio),
            file(5, "presentation-slides.pptx", "12 MB", FileCategory::Document),
            file(6, "family-video.mov", "2.1 GB", FileCategory::Video),
        ];

        Self {
            platforms,
            destinations,
            files,
        }
    }
}

fn platform(kind: PlatformKind, account_name: &str, connected: bool) -> SourcePlatform {
    SourcePlatform {
        kind,
        account_name: account_name.to_string(),
        connected,
    }
}

fn destination(
    kind: ProviderKind,
    account_email: &str,
    connected: bool,
    storage_used: f64,
    storage_limit: f64,
) -> DestinationProvider {
    DestinationProvider {
        kind,
        account_email: account_email.to_string(),
        connected,
        storage_used,
        storage_limit,
    }
}

fn file(id: u32, name: &str, size: &str, category: FileCategory) -> CandidateFile {
    CandidateFile {
        id: FileId(id),
        name: name.to_string(),
        size: size.to_string(),
        category,
        selected: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog() {
        let catalog = Catalog::demo();

        assert_eq!(catalog.platforms.len(), 4);
        assert_eq!(catalog.destinations.len(), 3);
        assert_eq!(catalog.files.len(), 6);
        assert_eq!(catalog.selected_count(), 0);

        assert!(catalog.platform(PlatformKind::Telegram).unwrap().connected);
        assert!(!catalog.platform(PlatformKind::Reddit).unwrap().connected);
        assert!(!catalog.destination(ProviderKind::OneDrive).unwrap().connected);
        assert_eq!(
            catalog
                .destination(ProviderKind::GoogleDrive)
                .unwrap()
                .usage_percent(),
            45
        );
    }
}
