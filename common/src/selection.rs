//! 選択状態マシン
//!
//! 現在選択中の1件を保持し、変更のたびに購読者へ同期的に通知する。
//! 通知は購読順に、呼び出し元のコンテキストでそのまま配送される（キューイングなし）。
//! `select` は `&mut self` を取るため、通知中に別の遷移を起こすことはできない。

use crate::types::CatalogEntry;
use serde::Serialize;
use std::sync::Arc;

/// 選択状態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    NoSelection,
    Selected(Arc<CatalogEntry>),
}

impl SelectionState {
    pub fn entry(&self) -> Option<&Arc<CatalogEntry>> {
        match self {
            SelectionState::Selected(entry) => Some(entry),
            SelectionState::NoSelection => None,
        }
    }
}

/// 選択変更の通知
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionEvent {
    pub entry: Arc<CatalogEntry>,
}

impl SelectionEvent {
    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn category(&self) -> &str {
        &self.entry.category
    }
}

/// 購読解除用のID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&SelectionEvent)>;

pub struct SelectionMachine {
    state: SelectionState,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_id: u64,
}

impl SelectionMachine {
    /// 未選択で開始
    pub fn new() -> Self {
        Self {
            state: SelectionState::NoSelection,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// 既定エントリを選択済みの状態で開始（通知は行わない）
    pub fn with_default(entry: CatalogEntry) -> Self {
        let mut machine = Self::new();
        machine.state = SelectionState::Selected(Arc::new(entry));
        machine
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn current(&self) -> Option<&Arc<CatalogEntry>> {
        self.state.entry()
    }

    /// 購読者を登録（通知は登録順）
    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&SelectionEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// 購読解除（登録されていなければ false）
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// エントリを選択し、全購読者に通知
    ///
    /// カタログに含まれるかどうかは検証しない。
    pub fn select(&mut self, entry: Arc<CatalogEntry>) {
        log::info!("選択: {} ({})", entry.display_name(), entry.category);

        self.state = SelectionState::Selected(Arc::clone(&entry));
        let event = SelectionEvent { entry };
        for (_, subscriber) in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SelectionMachine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionMachine")
            .field("state", &self.state)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
