//! 应用配置和持久化
//!
//! 提供 tick 间隔、默认整理选项、自定义数据目录等设置的存储和读取。

use crate::catalog::Catalog;
use crate::error::WizardError;
use crate::wizard::OrganizationSettings;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 应用设置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// 模拟传输每次 tick 的间隔（毫秒）
    pub tick_interval_ms: u64,
    /// 自定义数据目录 (JSON)，为空时使用内置演示数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog_path: Option<PathBuf>,
    /// 详细日志模式
    pub verbose: bool,
    /// 新向导使用的整理选项（TOML 表，必须放在最后）
    pub default_organization: OrganizationSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 200,
            catalog_path: None,
            verbose: false,
            default_organization: OrganizationSettings::default(),
        }
    }
}

impl AppSettings {
    /// 获取配置文件路径
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("filehop");
        config_dir.join("settings.toml")
    }

    /// 加载设置（如果文件不存在则使用默认值）
    pub fn load() -> Self {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match fs::read_to_string(path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => {
                        debug!("Loaded settings from {:?}", path);
                        return settings;
                    }
                    Err(e) => {
                        log::warn!("Failed to parse settings: {}, using defaults", e);
                    }
                },
                Err(e) => {
                    log::warn!("Failed to read settings file: {}, using defaults", e);
                }
            }
        }
        Self::default()
    }

    /// 保存设置
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        // 0 会让模拟任务空转
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    /// 加载配置的数据目录，未配置时返回演示数据
    pub fn catalog(&self) -> Result<Catalog, WizardError> {
        match &self.catalog_path {
            Some(path) => Catalog::from_json_file(path),
            None => Ok(Catalog::demo()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = AppSettings::default();
        assert_eq!(settings.tick_interval(), Duration::from_millis(200));
        assert!(settings.default_organization.auto_tag);
        assert!(settings.catalog_path.is_none());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.toml");

        let settings = AppSettings {
            tick_interval_ms: 50,
            default_organization: OrganizationSettings {
                auto_tag: false,
                create_folders: true,
                remove_original: true,
            },
            catalog_path: Some(PathBuf::from("/tmp/catalog.json")),
            verbose: true,
        };
        settings.save_to(&path).unwrap();

        assert_eq!(AppSettings::load_from(&path), settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "tick_interval_ms = 10\n").unwrap();

        let settings = AppSettings::load_from(&path);
        assert_eq!(settings.tick_interval_ms, 10);
        assert_eq!(settings.default_organization, OrganizationSettings::default());
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        fs::write(&path, "tick_interval_ms = \"fast\"").unwrap();

        assert_eq!(AppSettings::load_from(&path), AppSettings::default());
    }

    #[test]
    fn test_zero_interval_clamped() {
        let settings = AppSettings {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_catalog_defaults_to_demo() {
        let catalog = AppSettings::default().catalog().unwrap();
        assert_eq!(catalog, Catalog::demo());
    }
}
