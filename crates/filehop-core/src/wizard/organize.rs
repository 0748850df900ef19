//! 整理选项和文件夹结构预览

use crate::catalog::{CandidateFile, FileCategory};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 三个互相独立的整理开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationSettings {
    /// 根据内容和元数据自动打标签
    pub auto_tag: bool,
    /// 按类型和日期创建文件夹
    pub create_folders: bool,
    /// 传输成功后删除来源平台上的文件
    pub remove_original: bool,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            auto_tag: true,
            create_folders: true,
            remove_original: false,
        }
    }
}

/// 预览中的一个文件夹
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderNode {
    pub depth: usize,
    pub name: String,
}

impl OrganizationSettings {
    /// 文件夹结构预览: `YYYY/` → `Month/` → 各类别文件夹
    ///
    /// 只包含勾选文件中出现过的类别；未开启 `create_folders` 时为空。
    pub fn folder_preview<'a>(
        &self,
        files: impl IntoIterator<Item = &'a CandidateFile>,
        date: NaiveDate,
    ) -> Vec<FolderNode> {
        if !self.create_folders {
            return Vec::new();
        }

        let categories: BTreeSet<FileCategory> = files
            .into_iter()
            .filter(|f| f.selected)
            .map(|f| f.category)
            .collect();

        let mut nodes = vec![
            FolderNode {
                depth: 0,
                name: format!("{}/", date.year()),
            },
            FolderNode {
                depth: 1,
                name: format!("{}/", date.format("%B")),
            },
        ];
        nodes.extend(categories.into_iter().map(|category| FolderNode {
            depth: 2,
            name: format!("{}/", category.folder_name()),
        }));
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn june() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 7).unwrap()
    }

    #[test]
    fn test_defaults() {
        let settings = OrganizationSettings::default();
        assert!(settings.auto_tag);
        assert!(settings.create_folders);
        assert!(!settings.remove_original);
    }

    #[test]
    fn test_preview_uses_selected_categories() {
        let mut catalog = Catalog::demo();
        // 视频和音频
        for file in &mut catalog.files {
            file.selected = matches!(file.name.as_str(), "family-video.mov" | "podcast-episode.mp3");
        }

        let preview = OrganizationSettings::default().folder_preview(&catalog.files, june());
        let names: Vec<&str> = preview.iter().map(|n| n.name.as_str()).collect();

        assert_eq!(names, ["2024/", "June/", "Videos/", "Audio/"]);
        assert_eq!(preview[2].depth, 2);
    }

    #[test]
    fn test_preview_empty_without_folders() {
        let mut catalog = Catalog::demo();
        catalog.set_all_selected(true);
        let settings = OrganizationSettings {
            create_folders: false,
            ..Default::default()
        };

        assert!(settings.folder_preview(&catalog.files, june()).is_empty());
    }
}
