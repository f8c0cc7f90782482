//! カタログ取り込みモジュール
//!
//! CSVテキストからカタログを構築する:
//! 1. 非表示行（Visible = false）を除外
//! 2. 「椅子らしい」行だけを残す（グループ・タイプ・カテゴリの部分一致）
//! 3. 失敗時・0件時は組み込みのフォールバックカタログに差し替え

use crate::columns::Column;
use crate::error::{Error, Result};
use crate::parser::{CsvTable, Record};
use crate::types::{normalize_category, CatalogEntry, CatalogOrigin, DEFAULT_ICON};
use std::sync::Arc;

/// 椅子判定キーワード（小文字）
pub const DEFAULT_CHAIR_KEYWORDS: &[&str] = &[
    "krzesło", "krzesła", "krzeslo", "krzesla", "kubełek", "kubelek", "chair", "bucket",
];

/// 椅子らしさの判定器
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: Vec<String>,
}

impl Classifier {
    /// キーワードを指定して作成（空のキーワードは無視）
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        if keywords.is_empty() {
            return Err(Error::Config("椅子判定キーワードが空です".into()));
        }

        Ok(Self { keywords })
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// いずれかのフィールドがキーワードを含むか（大文字小文字無視の部分一致）
    pub fn is_chair_like(&self, fields: &[&str]) -> bool {
        fields.iter().any(|field| {
            let field = field.to_lowercase();
            self.keywords.iter().any(|keyword| field.contains(keyword.as_str()))
        })
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_CHAIR_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// 読み込み済みカタログ（読み込み順を保持）
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Arc<CatalogEntry>>,
    visible_rows: usize,
    origin: CatalogOrigin,
}

impl Catalog {
    /// CSV文字列からカタログを構築
    ///
    /// # Returns
    /// * `Ok(Catalog)` - 椅子0件でも成功
    /// * `Err` - ヘッダー行が無い場合
    pub fn from_csv_str(content: &str, classifier: &Classifier) -> Result<Self> {
        let table = CsvTable::parse(content)?;

        let visible: Vec<CatalogEntry> = table
            .records()
            .map(|record| entry_from_record(&record))
            .filter(|entry| entry.visible)
            .collect();
        let visible_rows = visible.len();

        let entries: Vec<Arc<CatalogEntry>> = visible
            .into_iter()
            .filter(|entry| {
                classifier.is_chair_like(&[
                    entry.group_hint.as_str(),
                    entry.type_hint.as_str(),
                    entry.category.as_str(),
                ])
            })
            .map(Arc::new)
            .collect();

        log::debug!(
            "取り込み: {}行中 表示{}行 / 椅子{}件",
            table.len(),
            visible_rows,
            entries.len()
        );

        Ok(Self {
            entries,
            visible_rows,
            origin: CatalogOrigin::Remote,
        })
    }

    /// 組み込みのフォールバックカタログ
    pub fn fallback(reason: impl Into<String>) -> Self {
        let entries: Vec<Arc<CatalogEntry>> = fallback_entries().into_iter().map(Arc::new).collect();
        Self {
            visible_rows: entries.len(),
            entries,
            origin: CatalogOrigin::Fallback(reason.into()),
        }
    }

    /// エントリ一覧から直接作成
    pub fn from_entries(entries: Vec<CatalogEntry>) -> Self {
        let entries: Vec<Arc<CatalogEntry>> = entries
            .into_iter()
            .filter(|entry| entry.visible)
            .map(Arc::new)
            .collect();
        Self {
            visible_rows: entries.len(),
            entries,
            origin: CatalogOrigin::Remote,
        }
    }

    pub fn entries(&self) -> &[Arc<CatalogEntry>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 分類前の表示対象行数
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }

    /// 名前で検索（大文字小文字無視の完全一致）
    pub fn find_by_name(&self, name: &str) -> Option<Arc<CatalogEntry>> {
        let name = name.trim().to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.name.trim().to_lowercase() == name)
            .cloned()
    }

    /// カテゴリ一覧と件数（初出順）
    pub fn categories(&self) -> Vec<(String, usize)> {
        let mut categories: Vec<(String, usize)> = Vec::new();
        for entry in &self.entries {
            match categories.iter_mut().find(|(name, _)| *name == entry.category) {
                Some((_, count)) => *count += 1,
                None => categories.push((entry.category.clone(), 1)),
            }
        }
        categories
    }
}

/// CSVを取り込み、失敗時・0件時はフォールバックカタログを返す
///
/// 呼び出し側にエラーは返さない。商品が0件の画面は出さない。
pub fn ingest(content: &str, classifier: &Classifier) -> Catalog {
    match Catalog::from_csv_str(content, classifier) {
        Ok(catalog) if catalog.is_empty() => {
            log::warn!("椅子が0件のためフォールバックカタログを使用");
            Catalog::fallback("椅子が0件")
        }
        Ok(catalog) => catalog,
        Err(e) => {
            log::warn!("CSV取り込み失敗、フォールバックカタログを使用: {}", e);
            Catalog::fallback(e.to_string())
        }
    }
}

/// フォールバック用のエントリ
pub fn fallback_entries() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Amy-2", "krzesla"),
        CatalogEntry::new("Ava", "hooker"),
        CatalogEntry::new("Carine", "biurowe"),
    ]
}

fn entry_from_record(record: &Record<'_>) -> CatalogEntry {
    let image_ref = Column::Image.read(record);
    CatalogEntry {
        name: Column::Name.read(record).to_string(),
        category: normalize_category(Column::Category.read(record)),
        group_hint: Column::Group.read(record).to_string(),
        type_hint: Column::Type.read(record).to_string(),
        image_ref: if image_ref.is_empty() { DEFAULT_ICON.to_string() } else { image_ref.to_string() },
        visible: !Column::Visible.read(record).eq_ignore_ascii_case("false"),
    }
}
