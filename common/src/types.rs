//! カタログの型定義
//!
//! - CatalogEntry: 1脚分の商品レコード（読み込み後は不変）
//! - CatalogOrigin: カタログの取得元（リモート or フォールバック）

use serde::{Deserialize, Serialize};

/// サムネイル画像が無いときのデフォルトアイコン
pub const DEFAULT_ICON: &str = "icons/chair_icon.png";

/// 名前が空のときの表示名
pub const UNNAMED: &str = "unnamed";

/// カタログの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogEntry {
    /// 商品名（アセットファイル名の解決にも使用）
    pub name: String,

    /// カテゴリ（小文字化・trim済み）
    pub category: String,

    pub group_hint: String,       // グループ（分類判定用）

    pub type_hint: String,        // タイプ（分類判定用）

    /// サムネイル参照
    pub image_ref: String,

    pub visible: bool,
}

impl CatalogEntry {
    /// 名前とカテゴリだけを持つエントリを作成
    ///
    /// カテゴリは取り込み時と同じく小文字化・trimされる。
    pub fn new(name: impl Into<String>, category: &str) -> Self {
        Self {
            name: name.into(),
            category: normalize_category(category),
            image_ref: DEFAULT_ICON.to_string(),
            visible: true,
            ..Default::default()
        }
    }

    /// 表示名（空なら "unnamed"）
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            UNNAMED
        } else {
            &self.name
        }
    }

    /// サムネイルの参照パスを正規化
    ///
    /// 先頭の `./` を外した上で、`http` でも `/` でも始まらなければ `./` を付ける。
    pub fn thumbnail_src(&self) -> String {
        let raw = self.image_ref.trim();
        let raw = if raw.is_empty() { DEFAULT_ICON } else { raw };
        let stripped = raw.strip_prefix("./").unwrap_or(raw);

        if stripped.starts_with("http") || stripped.starts_with('/') {
            stripped.to_string()
        } else {
            format!("./{}", stripped)
        }
    }

    /// カテゴリが一致するか（大文字小文字・前後空白を無視した完全一致）
    pub fn in_category(&self, category: &str) -> bool {
        normalize_category(&self.category) == normalize_category(category)
    }
}

/// カテゴリ文字列を比較用に正規化
pub fn normalize_category(category: &str) -> String {
    category.trim().to_lowercase()
}

/// カタログの取得元
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "reason")]
pub enum CatalogOrigin {
    /// リモート（またはローカルCSV）から読み込んだ
    Remote,
    /// 読み込みに失敗し、組み込みのカタログを使用
    Fallback(String),
}

impl CatalogOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, CatalogOrigin::Fallback(_))
    }
}
