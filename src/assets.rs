//! アセット監査モジュール
//!
//! アセットフォルダを走査し、カタログとの対応をチェックする:
//! - モデルファイルが無いエントリ
//! - カタログに無いモデルファイル

use crate::error::{ConfiguratorError, Result};
use configurator_common::{AssetResolver, Catalog, CatalogEntry};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetAudit {
    /// モデルファイルがあるエントリ名
    pub present: Vec<String>,
    /// モデルファイルが無いエントリ名（解決不能な名前も含む）
    pub missing: Vec<String>,
    /// カタログに無いモデルファイル名（拡張子なし）
    pub orphaned: Vec<String>,
}

impl AssetAudit {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// 選択エントリのモデルファイルがディスク上にあるか確認
///
/// `root` はアセットパスの基準フォルダ。
pub fn verify_on_disk(resolver: &AssetResolver, entry: &CatalogEntry, root: &Path) -> Result<PathBuf> {
    let asset = resolver.resolve(entry)?;
    let path = root.join(asset.as_str());
    if path.is_file() {
        Ok(path)
    } else {
        Err(configurator_common::Error::AssetNotFound(path.display().to_string()).into())
    }
}

/// アセットフォルダを走査してカタログと突き合わせる
pub fn audit(resolver: &AssetResolver, catalog: &Catalog, root: &Path) -> Result<AssetAudit> {
    let assets_dir = root.join(resolver.assets_dir());
    if !assets_dir.is_dir() {
        return Err(ConfiguratorError::SourceUnavailable(format!(
            "アセットフォルダが見つかりません: {}",
            assets_dir.display()
        )));
    }

    let mut on_disk: BTreeSet<String> = BTreeSet::new();
    for entry in WalkDir::new(&assets_dir)
        .max_depth(1)  // 直下のみ
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches_ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(resolver.extension()))
            .unwrap_or(false);
        if let (true, Some(stem)) = (matches_ext, path.file_stem()) {
            on_disk.insert(stem.to_string_lossy().to_string());
        }
    }

    let mut report = AssetAudit::default();
    let mut referenced: BTreeSet<String> = BTreeSet::new();

    for entry in catalog.entries() {
        match resolver.resolve(entry) {
            Ok(_) if on_disk.contains(entry.name.trim()) => {
                referenced.insert(entry.name.trim().to_string());
                report.present.push(entry.name.clone());
            }
            _ => report.missing.push(entry.display_name().to_string()),
        }
    }

    report.orphaned = on_disk.difference(&referenced).cloned().collect();
    log::debug!(
        "アセット監査: あり{} / 無し{} / 孤立{}",
        report.present.len(),
        report.missing.len(),
        report.orphaned.len()
    );

    Ok(report)
}
