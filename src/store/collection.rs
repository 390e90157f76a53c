//! Collection - the shared CRUD core of the entity stores.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::Cursor;
use crate::id::{new_id, EntityKind};
use crate::notify::{ChangeKind, ChangeNotifier, Observable, StoreChange};
use crate::storage::{Gateway, StoreKey};

/// An entity kind that lives in a [`Collection`].
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Storage key of the whole collection.
    const KEY: StoreKey;
    /// Prefix used for generated ids.
    const KIND: EntityKind;
    /// Whether the collection carries a selection cursor.
    const SELECTABLE: bool = false;

    /// Caller-supplied fields for a new entity.
    type New;
    /// Partial update.
    type Patch;

    fn id(&self) -> &str;

    /// Display order. `None` keeps insertion order.
    fn sort_key(&self) -> Option<i32> {
        None
    }

    fn create(id: String, now: DateTime<Utc>, new: Self::New) -> Self;

    fn patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a, R> {
    records: &'a [R],
    #[serde(skip_serializing_if = "Option::is_none")]
    selected_id: Option<&'a str>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<R> {
    #[serde(default = "Vec::new")]
    records: Vec<R>,
    #[serde(default)]
    selected_id: Option<String>,
}

/// An ordered, persisted collection of one entity kind.
///
/// The in-memory `Vec` is authoritative. Every mutation writes the full
/// collection through the gateway and then notifies subscribers. Unknown
/// ids on update/delete are silent no-ops.
pub struct Collection<R: Record> {
    records: Vec<R>,
    cursor: Cursor,
    gateway: Gateway,
    notifier: ChangeNotifier,
}

impl<R: Record> Collection<R> {
    /// Load the collection from the gateway; an absent or unreadable
    /// document yields an empty collection.
    pub fn hydrate(gateway: Gateway) -> Self {
        let (records, selected) = match gateway.load::<Snapshot<R>>(R::KEY) {
            Some(snapshot) => (snapshot.records, snapshot.selected_id),
            None => (Vec::new(), None),
        };
        info!(store = %R::KEY, records = records.len(), "store hydrated");

        let cursor = if R::SELECTABLE {
            Cursor::restore(selected)
        } else {
            Cursor::default()
        };

        Self {
            records,
            cursor,
            gateway,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Entities in insertion order.
    pub fn as_slice(&self) -> &[R] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Option<&R> {
        self.records.iter().find(|r| predicate(r))
    }

    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<&R> {
        self.records.iter().filter(|r| predicate(r)).collect()
    }

    /// Entities matching `predicate`, ordered by sort key. The sort is
    /// stable, so ties keep insertion order.
    pub fn sorted_where(&self, predicate: impl Fn(&R) -> bool) -> Vec<&R> {
        let mut matching = self.filter(predicate);
        matching.sort_by_key(|r| r.sort_key());
        matching
    }

    pub fn sorted(&self) -> Vec<&R> {
        self.sorted_where(|_| true)
    }

    /// Create an entity with a fresh id and creation time. Returns the id.
    pub fn insert(&mut self, new: R::New) -> String {
        let id = new_id(R::KIND);
        let record = R::create(id.clone(), Utc::now(), new);
        let was_empty = self.records.is_empty();
        self.records.push(record);
        if R::SELECTABLE && self.cursor.on_insert(was_empty, &id) {
            debug!(store = %R::KEY, id = %id, "first entity auto-selected");
        }
        debug!(store = %R::KEY, id = %id, "entity added");
        self.commit(ChangeKind::Added, Some(id.clone()));
        id
    }

    /// Merge `patch` into the entity with `id`. Returns false if absent.
    pub fn update(&mut self, id: &str, patch: R::Patch) -> bool {
        let Some(record) = self.records.iter_mut().find(|r| r.id() == id) else {
            debug!(store = %R::KEY, id = %id, "update ignored; no such entity");
            return false;
        };
        record.patch(patch, Utc::now());
        debug!(store = %R::KEY, id = %id, "entity updated");
        self.commit(ChangeKind::Updated, Some(id.to_string()));
        true
    }

    /// Hard-delete the entity with `id`. Returns false if absent.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            debug!(store = %R::KEY, id = %id, "delete ignored; no such entity");
            return false;
        };
        self.records.remove(index);
        if self.cursor.on_remove(id) {
            debug!(store = %R::KEY, id = %id, "selection cleared");
        }
        debug!(store = %R::KEY, id = %id, "entity deleted");
        self.commit(ChangeKind::Removed, Some(id.to_string()));
        true
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.cursor.get()
    }

    /// The selected entity, if the cursor points at one that still exists.
    pub fn selected(&self) -> Option<&R> {
        self.cursor.get().and_then(|id| self.get(id))
    }

    pub fn select(&mut self, id: &str) {
        self.cursor.select(id);
        self.commit(ChangeKind::Selected, Some(id.to_string()));
    }

    /// Drop every entity and the selection without writing a snapshot.
    /// Used when the persisted keys are being removed wholesale.
    pub(crate) fn reset(&mut self) {
        self.records.clear();
        self.cursor.clear();
        self.notifier
            .notify(StoreChange::new(R::KEY, ChangeKind::Cleared, None));
    }

    fn commit(&mut self, kind: ChangeKind, id: Option<String>) {
        self.gateway.save(
            R::KEY,
            &SnapshotRef {
                records: &self.records,
                selected_id: self.cursor.get(),
            },
        );
        self.notifier.notify(StoreChange::new(R::KEY, kind, id));
    }
}

impl<R: Record> Observable for Collection<R> {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }
}
