use crate::error::{Result, TimelineError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 既定のデータファイル名
pub const DEFAULT_DATA_FILE: &str = "trait_theme_timeline.csv";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 既定のデータソース（ファイルパスまたはURL）
    pub data_path: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| TimelineError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("timeline-viewer").join("config.json"))
    }

    /// データソースを決定: 引数 → 設定 → 既定ファイル名
    pub fn resolve_data_source(&self, arg: Option<&str>) -> String {
        arg.map(str::to_string)
            .or_else(|| self.data_path.clone())
            .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string())
    }

    pub fn set_data_path(&mut self, path: String) -> Result<()> {
        self.data_path = Some(path);
        self.save()
    }
}
