//! アセット解決モジュール
//!
//! 選択エントリの名前から 3Dモデルの相対パス `<assets_dir>/<name>.<ext>` を導出する。
//! 解決できない名前は `AssetNotFound` として呼び出し元に返す。

use crate::error::{Error, Result};
use crate::types::CatalogEntry;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ASSETS_DIR: &str = "chairs";
pub const DEFAULT_ASSET_EXTENSION: &str = "glb";
pub const DEFAULT_CHAIR: &str = "Amy-2";

/// 解決済みのアセットパス（常に `/` 区切りの相対パス）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetPath(String);

impl AssetPath {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetResolver {
    assets_dir: String,
    extension: String,
    default_name: String,
}

impl AssetResolver {
    pub fn new(assets_dir: &str, extension: &str, default_name: &str) -> Self {
        Self {
            assets_dir: assets_dir.trim_end_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
            default_name: default_name.to_string(),
        }
    }

    pub fn assets_dir(&self) -> &str {
        &self.assets_dir
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// 名前からアセットパスを解決
    ///
    /// 空の名前、パス区切りや `..` を含む名前は `AssetNotFound`。
    pub fn resolve_name(&self, name: &str) -> Result<AssetPath> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::AssetNotFound("名前が空のエントリ".into()));
        }
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(Error::AssetNotFound(format!("不正な名前: {}", name)));
        }

        Ok(AssetPath(format!("{}/{}.{}", self.assets_dir, name, self.extension)))
    }

    pub fn resolve(&self, entry: &CatalogEntry) -> Result<AssetPath> {
        self.resolve_name(&entry.name)
    }

    /// 既定のアセットパス
    pub fn default_asset(&self) -> AssetPath {
        AssetPath(format!("{}/{}.{}", self.assets_dir, self.default_name, self.extension))
    }

    /// 解決できなければ既定のアセットを返す
    pub fn resolve_or_default(&self, entry: &CatalogEntry) -> AssetPath {
        self.resolve(entry).unwrap_or_else(|e| {
            log::debug!("{} → 既定アセットを使用", e);
            self.default_asset()
        })
    }
}

impl Default for AssetResolver {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS_DIR, DEFAULT_ASSET_EXTENSION, DEFAULT_CHAIR)
    }
}
