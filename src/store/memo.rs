use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::date::format_day;
use crate::model::Memo;
use crate::notify::{ChangeKind, ChangeNotifier, Observable, StoreChange};
use crate::storage::{Gateway, StoreKey};

/// Day memos, at most one per calendar day.
///
/// Persisted as a single `{"YYYY-MM-DD": "content"}` document.
pub struct MemoStore {
    memos: BTreeMap<NaiveDate, String>,
    gateway: Gateway,
    notifier: ChangeNotifier,
}

impl MemoStore {
    pub fn hydrate(gateway: Gateway) -> Self {
        let memos: BTreeMap<NaiveDate, String> =
            gateway.load(StoreKey::Memos).unwrap_or_default();
        info!(store = %StoreKey::Memos, records = memos.len(), "store hydrated");
        Self {
            memos,
            gateway,
            notifier: ChangeNotifier::new(),
        }
    }

    /// The memo for `date`. An empty memo reads as none.
    pub fn get(&self, date: NaiveDate) -> Option<&str> {
        self.memos
            .get(&date)
            .map(String::as_str)
            .filter(|content| !content.is_empty())
    }

    /// Insert or overwrite the memo for `date`.
    pub fn set(&mut self, date: NaiveDate, content: impl Into<String>) {
        let kind = match self.memos.insert(date, content.into()) {
            Some(_) => ChangeKind::Updated,
            None => ChangeKind::Added,
        };
        debug!(date = %date, ?kind, "memo saved");
        self.commit(kind, date);
    }

    /// Remove the memo for `date`. Returns false if there was none.
    pub fn delete(&mut self, date: NaiveDate) -> bool {
        if self.memos.remove(&date).is_none() {
            return false;
        }
        debug!(date = %date, "memo deleted");
        self.commit(ChangeKind::Removed, date);
        true
    }

    /// Days that have a memo, ascending.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.memos.keys().copied().collect()
    }

    pub fn all(&self) -> Vec<Memo> {
        self.memos
            .iter()
            .map(|(date, content)| Memo {
                date: *date,
                content: content.clone(),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.memos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.memos.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.memos.clear();
        self.notifier
            .notify(StoreChange::new(StoreKey::Memos, ChangeKind::Cleared, None));
    }

    fn commit(&mut self, kind: ChangeKind, date: NaiveDate) {
        self.gateway.save(StoreKey::Memos, &self.memos);
        self.notifier.notify(StoreChange::new(
            StoreKey::Memos,
            kind,
            Some(format_day(date)),
        ));
    }
}

impl Observable for MemoStore {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }
}
