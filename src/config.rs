use crate::error::{ImportError, Result};
use serde::{Deserialize, Serialize};
use shot_import_common::{DEFAULT_TASKS, HEADER_LABEL};
use std::path::PathBuf;

/// 日付の2桁年に付与する世紀
pub const DEFAULT_CENTURY_HINT: u32 = 19;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 読み込むシート名
    pub sheet: String,
    /// ヘッダー行の判定に使う名前列のタイトル
    pub header_label: String,
    /// JSONストアのパス（未設定時は設定ディレクトリ直下）
    pub store_path: Option<PathBuf>,
    pub author: Option<String>,
    pub century_hint: u32,
    /// 正式なタスク一覧
    pub tasks: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ImportError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("shot-import"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            sheet: "Sheet1".into(),
            header_label: HEADER_LABEL.into(),
            store_path: None,
            author: None,
            century_hint: DEFAULT_CENTURY_HINT,
            tasks: DEFAULT_TASKS.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// ストアのパス（引数 > 設定 > 既定）
    pub fn resolve_store_path(&self, explicit: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = explicit.or_else(|| self.store_path.clone()) {
            return Ok(path);
        }
        Ok(Self::config_dir()?.join("store.json"))
    }

    pub fn get_author(&self) -> String {
        // 環境変数を優先
        if let Ok(author) = std::env::var("SHOT_IMPORT_AUTHOR") {
            return author;
        }

        self.author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .unwrap_or_else(|| "unknown".into())
    }

    pub fn set_store_path(&mut self, path: PathBuf) -> Result<()> {
        self.store_path = Some(path);
        self.save()
    }

    pub fn set_author(&mut self, author: String) -> Result<()> {
        self.author = Some(author);
        self.save()
    }
}
