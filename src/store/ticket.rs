use chrono::{DateTime, Utc};

use super::{Collection, Record};
use crate::id::EntityKind;
use crate::model::{NewTicketType, TicketType, TicketTypePatch};
use crate::notify::{ChangeNotifier, Observable};
use crate::storage::{Gateway, StoreKey};

impl Record for TicketType {
    const KEY: StoreKey = StoreKey::Tickets;
    const KIND: EntityKind = EntityKind::Ticket;
    type New = NewTicketType;
    type Patch = TicketTypePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn sort_key(&self) -> Option<i32> {
        Some(self.sort_order)
    }

    fn create(id: String, now: DateTime<Utc>, new: NewTicketType) -> Self {
        TicketType::from_new(id, now, new)
    }

    fn patch(&mut self, patch: TicketTypePatch, _now: DateTime<Utc>) {
        self.apply(patch);
    }
}

/// The ticket-type catalog.
pub struct TicketStore {
    tickets: Collection<TicketType>,
}

impl TicketStore {
    pub fn hydrate(gateway: Gateway) -> Self {
        Self {
            tickets: Collection::hydrate(gateway),
        }
    }

    pub fn add(&mut self, ticket: NewTicketType) -> String {
        self.tickets.insert(ticket)
    }

    pub fn update(&mut self, id: &str, patch: TicketTypePatch) -> bool {
        self.tickets.update(id, patch)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        self.tickets.remove(id)
    }

    pub fn get_all(&self) -> Vec<&TicketType> {
        self.tickets.sorted()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&TicketType> {
        self.tickets.get(id)
    }

    /// Unit price of a ticket type, if it still exists.
    pub fn price_of(&self, id: &str) -> Option<u32> {
        self.get_by_id(id).map(|t| t.price)
    }

    /// Ticket types bound to `group_id`. Group-agnostic ticket types are
    /// not included.
    pub fn tickets_by_group(&self, group_id: &str) -> Vec<&TicketType> {
        self.tickets.sorted_where(|t| t.belongs_to(group_id))
    }

    pub fn active_tickets_by_group(&self, group_id: &str) -> Vec<&TicketType> {
        self.tickets
            .sorted_where(|t| t.belongs_to(group_id) && t.is_active)
    }

    /// Ticket types that are not bound to any group.
    pub fn shared_tickets(&self) -> Vec<&TicketType> {
        self.tickets.sorted_where(|t| t.group_id.is_none())
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.tickets.reset();
    }
}

impl Observable for TicketStore {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        self.tickets.notifier()
    }
}
