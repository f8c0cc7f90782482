//! コンフィギュレーター状態
//!
//! カタログインデックス・選択状態・現在のアセットを1つのオブジェクトにまとめる。
//! アセット解決は選択状態マシンの購読者として登録され、選択のたびに更新される。

use crate::asset::{AssetPath, AssetResolver, DEFAULT_CHAIR};
use crate::catalog::Catalog;
use crate::index::{CatalogIndex, FilterMode};
use crate::selection::{SelectionEvent, SelectionMachine, SubscriptionId};
use crate::types::{CatalogEntry, CatalogOrigin};
use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

pub const DEFAULT_CATEGORY: &str = "krzesla";

/// 起動時の既定値
#[derive(Debug, Clone)]
pub struct Settings {
    pub resolver: AssetResolver,
    pub default_chair: String,
    /// 空文字列なら起動時にカテゴリで絞り込まない
    pub default_category: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolver: AssetResolver::default(),
            default_chair: DEFAULT_CHAIR.to_string(),
            default_category: DEFAULT_CATEGORY.to_string(),
        }
    }
}

/// 現在のアセット解決状態
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "detail")]
pub enum AssetStatus {
    Pending,
    Resolved(AssetPath),
    NotFound(String),
}

/// デバッグ用の状態ダンプ
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub data_rows: usize,
    pub chairs: usize,
    pub visible: usize,
    pub selected: Option<Arc<CatalogEntry>>,
    pub current_category: Option<String>,
    pub filter: FilterMode,
    pub current_asset: AssetStatus,
    pub origin: CatalogOrigin,
}

#[derive(Debug)]
pub struct Configurator {
    index: CatalogIndex,
    selection: SelectionMachine,
    current_asset: Rc<RefCell<AssetStatus>>,
    settings: Settings,
}

impl Configurator {
    /// カタログから状態を構築し、既定のカテゴリ絞り込みと既定の選択を行う
    pub fn new(catalog: Catalog, settings: Settings) -> Self {
        let mut index = CatalogIndex::new(catalog);
        if !settings.default_category.trim().is_empty() {
            index.filter_by_category(&settings.default_category);
        }

        let current_asset = Rc::new(RefCell::new(AssetStatus::Pending));
        let mut selection = SelectionMachine::new();
        let resolver = settings.resolver.clone();
        let sink = Rc::clone(&current_asset);
        selection.subscribe(move |event: &SelectionEvent| {
            let status = match resolver.resolve(&event.entry) {
                Ok(path) => AssetStatus::Resolved(path),
                Err(e) => {
                    log::warn!("{}", e);
                    AssetStatus::NotFound(e.to_string())
                }
            };
            *sink.borrow_mut() = status;
        });

        let mut configurator = Self {
            index,
            selection,
            current_asset,
            settings,
        };

        let default_entry = configurator.default_entry();
        configurator.selection.select(default_entry);
        configurator
    }

    fn default_entry(&self) -> Arc<CatalogEntry> {
        let name = &self.settings.default_chair;
        self.index.catalog().find_by_name(name).unwrap_or_else(|| {
            Arc::new(CatalogEntry::new(name.as_str(), &self.settings.default_category))
        })
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }

    pub fn selection(&self) -> &SelectionMachine {
        &self.selection
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn filter_by_category(&mut self, category: &str) -> Vec<Arc<CatalogEntry>> {
        self.index.filter_by_category(category)
    }

    pub fn filter_by_search(&mut self, term: &str) -> Vec<Arc<CatalogEntry>> {
        self.index.filter_by_search(term)
    }

    pub fn clear_filter(&mut self) -> Vec<Arc<CatalogEntry>> {
        self.index.clear_filter()
    }

    pub fn visible_set(&self) -> Vec<Arc<CatalogEntry>> {
        self.index.visible_set()
    }

    /// 選択変更の購読（アセット解決の後に呼ばれる）
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent) + 'static,
    {
        self.selection.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.selection.unsubscribe(id)
    }

    /// 任意のエントリを選択（カタログ所属は問わない）
    pub fn select(&mut self, entry: Arc<CatalogEntry>) {
        self.selection.select(entry);
    }

    /// 名前で選択
    ///
    /// カタログに無い名前は既定カテゴリのエントリとして選択する。
    /// 戻り値はカタログに含まれていたかどうか。
    pub fn pick(&mut self, name: &str) -> bool {
        match self.index.catalog().find_by_name(name) {
            Some(entry) => {
                self.selection.select(entry);
                true
            }
            None => {
                log::warn!("カタログに無いエントリを選択: {}", name);
                let entry = CatalogEntry::new(name.trim(), &self.settings.default_category);
                self.selection.select(Arc::new(entry));
                false
            }
        }
    }

    pub fn selected(&self) -> Option<&Arc<CatalogEntry>> {
        self.selection.current()
    }

    pub fn current_asset(&self) -> AssetStatus {
        self.current_asset.borrow().clone()
    }

    /// レンダラーに渡すアセット（解決できなければ既定アセット）
    pub fn render_asset(&self) -> AssetPath {
        match self.current_asset() {
            AssetStatus::Resolved(path) => path,
            _ => self.settings.resolver.default_asset(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let catalog = self.index.catalog();
        Snapshot {
            data_rows: catalog.visible_rows(),
            chairs: catalog.len(),
            visible: self.index.visible_set().len(),
            selected: self.selected().cloned(),
            current_category: self.index.active_category().map(str::to_string),
            filter: self.index.mode().clone(),
            current_asset: self.current_asset(),
            origin: catalog.origin().clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configurator() -> Configurator {
        Configurator::new(Catalog::fallback("テスト"), Settings::default())
    }

    #[test]
    fn test_startup_selects_default_chair() {
        let configurator = configurator();
        assert_eq!(configurator.selected().map(|e| e.name.as_str()), Some("Amy-2"));
        assert_eq!(
            configurator.current_asset(),
            AssetStatus::Resolved(AssetResolver::default().resolve_name("Amy-2").unwrap())
        );
    }

    #[test]
    fn test_startup_applies_default_category() {
        let configurator = configurator();
        assert_eq!(configurator.index().active_category(), Some("krzesla"));
        let names: Vec<_> = configurator.visible_set().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["Amy-2"]);
    }

    #[test]
    fn test_no_default_category_shows_everything() {
        let settings = Settings {
            default_category: String::new(),
            ..Settings::default()
        };
        let configurator = Configurator::new(Catalog::fallback("テスト"), settings);
        assert_eq!(configurator.visible_set().len(), 3);
        assert_eq!(configurator.index().mode(), &FilterMode::None);
    }

    #[test]
    fn test_default_chair_outside_catalog_still_selected() {
        let settings = Settings {
            default_chair: "Prototyp".to_string(),
            ..Settings::default()
        };
        let configurator = Configurator::new(Catalog::fallback("テスト"), settings);
        let selected = configurator.selected().expect("選択なし");
        assert_eq!(selected.name, "Prototyp");
        assert_eq!(selected.category, "krzesla");
    }

    #[test]
    fn test_pick_updates_asset() {
        let mut configurator = configurator();
        assert!(configurator.pick("carine"));
        assert_eq!(configurator.selected().map(|e| e.name.as_str()), Some("Carine"));
        assert_eq!(configurator.render_asset().as_str(), "chairs/Carine.glb");
    }

    #[test]
    fn test_pick_unlisted_entry() {
        let mut configurator = configurator();
        assert!(!configurator.pick("Nieznane"));
        assert_eq!(configurator.selected().map(|e| e.name.as_str()), Some("Nieznane"));
        assert_eq!(configurator.render_asset().as_str(), "chairs/Nieznane.glb");
    }

    #[test]
    fn test_unresolvable_selection_falls_back_for_renderer() {
        let mut configurator = configurator();
        configurator.select(Arc::new(CatalogEntry::new("", "krzesla")));
        assert!(matches!(configurator.current_asset(), AssetStatus::NotFound(_)));
        assert_eq!(configurator.render_asset().as_str(), "chairs/Amy-2.glb");
    }

    #[test]
    fn test_external_subscriber_sees_event() {
        let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));
        let mut configurator = configurator();
        let sink = Rc::clone(&seen);
        configurator.subscribe(move |event| sink.borrow_mut().push(event.name().to_string()));

        configurator.pick("Ava");
        assert_eq!(*seen.borrow(), vec!["Ava".to_string()]);
    }

    #[test]
    fn test_snapshot() {
        let mut configurator = configurator();
        configurator.filter_by_search("a");
        let snapshot = configurator.snapshot();
        assert_eq!(snapshot.chairs, 3);
        assert_eq!(snapshot.visible, 3);
        assert_eq!(snapshot.current_category, None);
        assert!(snapshot.origin.is_fallback());

        let json = serde_json::to_value(&snapshot).expect("シリアライズ失敗");
        assert_eq!(json["filter"]["mode"], "search");
        assert_eq!(json["selected"]["name"], "Amy-2");
    }
}
