use chrono::{DateTime, Utc};

use super::{Collection, Record};
use crate::id::EntityKind;
use crate::model::{Group, GroupPatch, NewGroup};
use crate::notify::{ChangeNotifier, Observable};
use crate::storage::{Gateway, StoreKey};

impl Record for Group {
    const KEY: StoreKey = StoreKey::Groups;
    const KIND: EntityKind = EntityKind::Group;
    const SELECTABLE: bool = true;
    type New = NewGroup;
    type Patch = GroupPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> Option<i32> {
        Some(self.sort_order)
    }

    fn create(id: String, now: DateTime<Utc>, new: NewGroup) -> Self {
        Group::from_new(id, now, new)
    }

    fn patch(&mut self, patch: GroupPatch, _now: DateTime<Utc>) {
        self.apply(patch);
    }
}

/// Groups, plus the "current group" cursor.
pub struct GroupStore {
    groups: Collection<Group>,
}

impl GroupStore {
    pub fn hydrate(gateway: Gateway) -> Self {
        Self {
            groups: Collection::hydrate(gateway),
        }
    }

    /// Add a group. The first group added to an empty store is selected.
    pub fn add(&mut self, group: NewGroup) -> String {
        self.groups.insert(group)
    }

    pub fn update(&mut self, id: &str, patch: GroupPatch) -> bool {
        self.groups.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.groups.remove(id)
    }

    /// All groups by ascending sort order.
    pub fn get_all(&self) -> Vec<&Group> {
        self.groups.sorted()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn select(&mut self, id: &str) {
        self.groups.select(id);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.groups.selected_id()
    }

    pub fn selected(&self) -> Option<&Group> {
        self.groups.selected()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.groups.reset();
    }
}

impl Observable for GroupStore {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        self.groups.notifier()
    }
}
