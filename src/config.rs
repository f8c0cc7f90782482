use crate::error::{ConfiguratorError, Result};
use configurator_common::asset::{DEFAULT_ASSETS_DIR, DEFAULT_ASSET_EXTENSION, DEFAULT_CHAIR};
use configurator_common::configurator::DEFAULT_CATEGORY;
use configurator_common::{AssetResolver, Classifier, Settings, DEFAULT_CHAIR_KEYWORDS};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 取得元URLを上書きする環境変数
pub const SOURCE_URL_ENV: &str = "CHAIR_CATALOG_URL";

const DEFAULT_SHEET_ID: &str = "1vCs6YeHgKqlYwg8rvJOqVzNRnXeATJCBuK-zh3NNj78";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sheet_id: String,
    pub sheet_name: String,
    pub source_url: Option<String>,
    pub assets_dir: String,
    pub asset_extension: String,
    pub default_chair: String,
    pub default_category: String,
    pub chair_keywords: Vec<String>,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_id: DEFAULT_SHEET_ID.into(),
            sheet_name: "Dane".into(),
            source_url: None,
            assets_dir: DEFAULT_ASSETS_DIR.into(),
            asset_extension: DEFAULT_ASSET_EXTENSION.into(),
            default_chair: DEFAULT_CHAIR.into(),
            default_category: DEFAULT_CATEGORY.into(),
            chair_keywords: DEFAULT_CHAIR_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_json(&content)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(content)?;
        Ok(config)
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

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ConfiguratorError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("chair-configurator").join("config.json"))
    }

    /// スプレッドシートのCSVエクスポートURL
    pub fn sheet_url(&self) -> String {
        format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
            self.sheet_id, self.sheet_name
        )
    }

    /// カタログ取得元URL（環境変数 > source_url > シートURL）
    pub fn catalog_url(&self) -> String {
        if let Ok(url) = std::env::var(SOURCE_URL_ENV) {
            if !url.trim().is_empty() {
                return url;
            }
        }

        self.source_url.clone().unwrap_or_else(|| self.sheet_url())
    }

    pub fn classifier(&self) -> Result<Classifier> {
        Ok(Classifier::new(&self.chair_keywords)?)
    }

    pub fn settings(&self) -> Settings {
        Settings {
            resolver: AssetResolver::new(&self.assets_dir, &self.asset_extension, &self.default_chair),
            default_chair: self.default_chair.clone(),
            default_category: self.default_category.clone(),
        }
    }

    pub fn set_source_url(&mut self, url: String) -> Result<()> {
        self.source_url = Some(url);
        self.save()
    }

    pub fn set_assets_dir(&mut self, dir: String) -> Result<()> {
        self.assets_dir = dir;
        self.save()
    }
}
