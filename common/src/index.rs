//! カタログインデックス
//!
//! 読み込み済みカタログと現在の絞り込み状態を保持し、表示対象を導出する。
//!
//! 優先順位:
//! - カテゴリ絞り込みは検索を解除する
//! - 空でない検索語はカテゴリ絞り込みより優先（カテゴリボタンの強調は消える）
//! - 検索語を空に戻すと、直前のカテゴリ絞り込みを再適用する

use crate::catalog::Catalog;
use crate::types::{normalize_category, CatalogEntry};
use serde::Serialize;
use std::sync::Arc;

/// 現在有効な絞り込み（常にどれか1つ）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "mode", content = "value")]
pub enum FilterMode {
    None,
    Category(String),
    Search(String),
}

#[derive(Debug, Clone)]
pub struct CatalogIndex {
    catalog: Catalog,
    mode: FilterMode,
    /// 検索中も保持しておくカテゴリ（検索語クリア時に再適用）
    remembered_category: Option<String>,
}

impl CatalogIndex {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            mode: FilterMode::None,
            remembered_category: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// カタログ全体
    pub fn full_catalog(&self) -> &[Arc<CatalogEntry>] {
        self.catalog.entries()
    }

    pub fn mode(&self) -> &FilterMode {
        &self.mode
    }

    /// 強調表示すべきカテゴリ（検索中は None）
    pub fn active_category(&self) -> Option<&str> {
        match &self.mode {
            FilterMode::Category(category) => Some(category.as_str()),
            _ => None,
        }
    }

    /// カテゴリで絞り込み（完全一致・大文字小文字無視）
    ///
    /// 検索中であれば検索を解除する。
    pub fn filter_by_category(&mut self, category: &str) -> Vec<Arc<CatalogEntry>> {
        let category = normalize_category(category);
        self.remembered_category = Some(category.clone());
        self.mode = FilterMode::Category(category);
        self.visible_set()
    }

    /// 名前で検索（部分一致・大文字小文字無視）
    ///
    /// 空の検索語は、カテゴリ絞り込みが残っていればそれを再適用し、
    /// 無ければカタログ全体を返す。
    pub fn filter_by_search(&mut self, term: &str) -> Vec<Arc<CatalogEntry>> {
        let term = term.trim().to_lowercase();

        self.mode = if !term.is_empty() {
            FilterMode::Search(term)
        } else if let Some(category) = &self.remembered_category {
            FilterMode::Category(category.clone())
        } else {
            FilterMode::None
        };

        self.visible_set()
    }

    /// 絞り込みを全て解除
    pub fn clear_filter(&mut self) -> Vec<Arc<CatalogEntry>> {
        self.remembered_category = None;
        self.mode = FilterMode::None;
        self.visible_set()
    }

    /// 現在の絞り込みでの表示対象（読み込み順）
    pub fn visible_set(&self) -> Vec<Arc<CatalogEntry>> {
        let entries = self.catalog.entries().iter();
        match &self.mode {
            FilterMode::None => entries.cloned().collect(),
            FilterMode::Category(category) => entries
                .filter(|entry| entry.in_category(category))
                .cloned()
                .collect(),
            FilterMode::Search(term) => entries
                .filter(|entry| entry.name.to_lowercase().contains(term.as_str()))
                .cloned()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> CatalogIndex {
        CatalogIndex::new(Catalog::from_entries(vec![
            CatalogEntry::new("Amy-2", "krzesla"),
            CatalogEntry::new("Ava", "hooker"),
            CatalogEntry::new("Amelia", "Krzesla"),
            CatalogEntry::new("Carine", "biurowe"),
        ]))
    }

    fn names(entries: &[Arc<CatalogEntry>]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_initial_mode_shows_everything() {
        let index = index();
        assert_eq!(index.mode(), &FilterMode::None);
        assert_eq!(index.visible_set().len(), 4);
    }

    #[test]
    fn test_filter_by_category_exact_and_ordered() {
        let mut index = index();
        let result = index.filter_by_category(" KRZESLA ");
        assert_eq!(names(&result), vec!["Amy-2", "Amelia"]);
        assert_eq!(index.active_category(), Some("krzesla"));

        assert!(index.filter_by_category("krzes").is_empty());
    }

    #[test]
    fn test_filter_by_search_substring() {
        let mut index = index();
        let result = index.filter_by_search("AM");
        assert_eq!(names(&result), vec!["Amy-2", "Amelia"]);
        assert_eq!(index.mode(), &FilterMode::Search("am".into()));
    }

    #[test]
    fn test_search_clears_category_highlight() {
        let mut index = index();
        index.filter_by_category("krzesla");
        let result = index.filter_by_search("ava");
        assert_eq!(names(&result), vec!["Ava"]);
        assert_eq!(index.active_category(), None);
    }

    #[test]
    fn test_empty_search_reapplies_category() {
        let mut index = index();
        let direct = index.filter_by_category("krzesla");
        let fallback = index.filter_by_search("");
        assert_eq!(direct, fallback);

        index.filter_by_search("car");
        let restored = index.filter_by_search("  ");
        assert_eq!(names(&restored), vec!["Amy-2", "Amelia"]);
        assert_eq!(index.active_category(), Some("krzesla"));
    }

    #[test]
    fn test_empty_search_without_category_returns_full_catalog() {
        let mut index = index();
        assert_eq!(index.filter_by_search("").len(), 4);
        assert_eq!(index.mode(), &FilterMode::None);
    }

    #[test]
    fn test_category_cancels_search() {
        let mut index = index();
        index.filter_by_search("ava");
        let result = index.filter_by_category("biurowe");
        assert_eq!(names(&result), vec!["Carine"]);
        assert_eq!(index.mode(), &FilterMode::Category("biurowe".into()));
    }

    #[test]
    fn test_clear_filter_forgets_category() {
        let mut index = index();
        index.filter_by_category("hooker");
        index.clear_filter();
        assert_eq!(index.filter_by_search("").len(), 4);
    }

    #[test]
    fn test_filters_never_mutate_entries() {
        let mut index = index();
        let before: Vec<CatalogEntry> = index.full_catalog().iter().map(|e| (**e).clone()).collect();
        index.filter_by_category("krzesla");
        index.filter_by_search("a");
        let after: Vec<CatalogEntry> = index.full_catalog().iter().map(|e| (**e).clone()).collect();
        assert_eq!(before, after);
    }
}
