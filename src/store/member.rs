use chrono::{DateTime, Utc};

use super::{Collection, Record};
use crate::id::EntityKind;
use crate::model::{Member, MemberPatch, NewMember};
use crate::notify::{ChangeNotifier, Observable};
use crate::storage::{Gateway, StoreKey};

impl Record for Member {
    const KEY: StoreKey = StoreKey::Members;
    const KIND: EntityKind = EntityKind::Member;
    const SELECTABLE: bool = true;
    type New = NewMember;
    type Patch = MemberPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> Option<i32> {
        Some(self.sort_order)
    }

    fn create(id: String, now: DateTime<Utc>, new: NewMember) -> Self {
        Member::from_new(id, now, new)
    }

    fn patch(&mut self, patch: MemberPatch, _now: DateTime<Utc>) {
        self.apply(patch);
    }
}

/// Members, plus the "current member" cursor.
///
/// A member's `group_id` is stored as given; deleting a group leaves its
/// members in place.
pub struct MemberStore {
    members: Collection<Member>,
}

impl MemberStore {
    pub fn hydrate(gateway: Gateway) -> Self {
        Self {
            members: Collection::hydrate(gateway),
        }
    }

    /// Add a member. The first member added to an empty store is selected.
    pub fn add(&mut self, member: NewMember) -> String {
        self.members.insert(member)
    }

    pub fn update(&mut self, id: &str, patch: MemberPatch) -> bool {
        self.members.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.members.remove(id)
    }

    pub fn get_all(&self) -> Vec<&Member> {
        self.members.sorted()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn members_by_group(&self, group_id: &str) -> Vec<&Member> {
        self.members.sorted_where(|m| m.group_id == group_id)
    }

    pub fn favorites(&self) -> Vec<&Member> {
        self.members.sorted_where(|m| m.is_favorite)
    }

    pub fn select(&mut self, id: &str) {
        self.members.select(id);
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.members.selected_id()
    }

    pub fn selected(&self) -> Option<&Member> {
        self.members.selected()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.members.reset();
    }
}

impl Observable for MemberStore {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        self.members.notifier()
    }
}
