//! 静态数据源
//!
//! 向导读取的三个只读集合：来源平台、目标存储和候选文件。
//! 候选文件的勾选状态是唯一可变的字段。

mod demo;
mod kinds;

pub use kinds::{FileCategory, PlatformKind, ProviderKind};

use crate::error::WizardError;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

/// 候选文件 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 来源平台
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourcePlatform {
    pub kind: PlatformKind,
    pub account_name: String,
    pub connected: bool,
}

/// 目标存储
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationProvider {
    pub kind: ProviderKind,
    pub account_email: String,
    pub connected: bool,
    /// 已用空间 (GB)
    pub storage_used: f64,
    /// 总空间 (GB)
    pub storage_limit: f64,
}

impl DestinationProvider {
    /// 已用空间百分比，限制在 [0, 100]
    pub fn usage_percent(&self) -> u16 {
        if self.storage_limit <= 0.0 {
            return 0;
        }
        let percent = (self.storage_used / self.storage_limit * 100.0).round();
        percent.clamp(0.0, 100.0) as u16
    }

    /// 例如 `45 GB / 100 GB`
    pub fn storage_label(&self) -> String {
        format!("{} GB / {} GB", self.storage_used, self.storage_limit)
    }
}

/// 候选文件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFile {
    pub id: FileId,
    pub name: String,
    pub size: String,
    pub category: FileCategory,
    #[serde(default)]
    pub selected: bool,
}

/// 向导使用的全部数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub platforms: Vec<SourcePlatform>,
    pub destinations: Vec<DestinationProvider>,
    pub files: Vec<CandidateFile>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

impl Catalog {
    /// 从 JSON 文本解析
    ///
    /// 文件 ID 必须为正数且互不相同。
    pub fn from_json_str(json: &str) -> Result<Self, WizardError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|e| WizardError::Catalog(e.to_string()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), WizardError> {
        let mut seen = HashSet::new();
        for file in &self.files {
            if file.id.0 == 0 {
                return Err(WizardError::Catalog(format!(
                    "file \"{}\" has id 0; ids start at 1",
                    file.name
                )));
            }
            if !seen.insert(file.id) {
                return Err(WizardError::Catalog(format!(
                    "duplicate file id {}",
                    file.id
                )));
            }
        }
        Ok(())
    }

    /// 从 JSON 文件加载
    pub fn from_json_file(path: &Path) -> Result<Self, WizardError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| WizardError::Catalog(format!("{}: {}", path.display(), e)))?;
        let catalog = Self::from_json_str(&content)?;
        debug!(
            "Loaded catalog from {:?}: {} platforms, {} destinations, {} files",
            path,
            catalog.platforms.len(),
            catalog.destinations.len(),
            catalog.files.len()
        );
        Ok(catalog)
    }

    pub fn platform(&self, kind: PlatformKind) -> Option<&SourcePlatform> {
        self.platforms.iter().find(|p| p.kind == kind)
    }

    pub fn destination(&self, kind: ProviderKind) -> Option<&DestinationProvider> {
        self.destinations.iter().find(|d| d.kind == kind)
    }

    pub fn file(&self, id: FileId) -> Option<&CandidateFile> {
        self.files.iter().find(|f| f.id == id)
    }

    pub(crate) fn file_mut(&mut self, id: FileId) -> Option<&mut CandidateFile> {
        self.files.iter_mut().find(|f| f.id == id)
    }

    pub fn selected_files(&self) -> impl Iterator<Item = &CandidateFile> {
        self.files.iter().filter(|f| f.selected)
    }

    pub fn selected_count(&self) -> usize {
        self.selected_files().count()
    }

    pub(crate) fn set_all_selected(&mut self, selected: bool) {
        for file in &mut self.files {
            file.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(used: f64, limit: f64) -> DestinationProvider {
        DestinationProvider {
            kind: ProviderKind::Dropbox,
            account_email: "someone@example.com".to_string(),
            connected: true,
            storage_used: used,
            storage_limit: limit,
        }
    }

    #[test]
    fn test_usage_percent() {
        assert_eq!(provider(45.0, 100.0).usage_percent(), 45);
        assert_eq!(provider(12.0, 16.0).usage_percent(), 75);
        assert_eq!(provider(0.0, 0.0).usage_percent(), 0);
        assert_eq!(provider(20.0, 16.0).usage_percent(), 100);
    }

    #[test]
    fn test_storage_label() {
        assert_eq!(provider(45.0, 100.0).storage_label(), "45 GB / 100 GB");
        assert_eq!(provider(12.8, 16.0).storage_label(), "12.8 GB / 16 GB");
    }

    #[test]
    fn test_catalog_json_shape() {
        let json = r#"{
            "platforms": [
                { "kind": "telegram", "accountName": "@someone", "connected": true }
            ],
            "destinations": [
                {
                    "kind": "gdrive",
                    "accountEmail": "someone@example.com",
                    "connected": false,
                    "storageUsed": 1.5,
                    "storageLimit": 15
                }
            ],
            "files": [
                { "id": 7, "name": "notes.txt", "size": "1 KB", "category": "document" }
            ]
        }"#;

        let catalog = Catalog::from_json_str(json).unwrap();

        assert_eq!(catalog.platforms[0].kind, PlatformKind::Telegram);
        assert_eq!(catalog.destinations[0].kind, ProviderKind::GoogleDrive);
        assert!(!catalog.destinations[0].connected);
        assert_eq!(catalog.files[0].id, FileId(7));
        assert!(!catalog.files[0].selected);
    }

    #[test]
    fn test_catalog_json_rejects_unknown_kind() {
        let json = r#"{
            "platforms": [{ "kind": "myspace", "accountName": "x", "connected": true }],
            "destinations": [],
            "files": []
        }"#;

        assert!(matches!(
            Catalog::from_json_str(json),
            Err(WizardError::Catalog(_))
        ));
    }

    #[test]
    fn test_catalog_json_rejects_bad_file_ids() {
        let with_files = |files: &str| {
            format!(r#"{{ "platforms": [], "destinations": [], "files": [{}] }}"#, files)
        };
        let file = |id: u32| {
            format!(
                r#"{{ "id": {}, "name": "f{}.txt", "size": "1 KB", "category": "document" }}"#,
                id, id
            )
        };

        let duplicate = with_files(&[file(3), file(4), file(3)].join(","));
        let err = Catalog::from_json_str(&duplicate).unwrap_err();
        assert!(matches!(&err, WizardError::Catalog(msg) if msg.contains("duplicate file id 3")));

        let zero = with_files(&file(0));
        assert!(matches!(
            Catalog::from_json_str(&zero),
            Err(WizardError::Catalog(_))
        ));

        let ok = with_files(&[file(1), file(2)].join(","));
        assert_eq!(Catalog::from_json_str(&ok).unwrap().files.len(), 2);
    }

    #[test]
    fn test_select_all_and_clear() {
        let mut catalog = Catalog::demo();
        catalog.set_all_selected(true);
        assert_eq!(catalog.selected_count(), catalog.files.len());
        catalog.set_all_selected(false);
        assert_eq!(catalog.selected_count(), 0);
    }
}
