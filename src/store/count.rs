use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::{Collection, Record};
use crate::date::today;
use crate::id::EntityKind;
use crate::model::{CountPatch, CountRecord, NewCount};
use crate::notify::{ChangeNotifier, Observable};
use crate::storage::{Gateway, StoreKey};

impl Record for CountRecord {
    const KEY: StoreKey = StoreKey::Counts;
    const KIND: EntityKind = EntityKind::Record;
    type New = NewCount;
    type Patch = CountPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn create(id: String, now: DateTime<Utc>, new: NewCount) -> Self {
        CountRecord::from_new(id, now, new)
    }

    fn patch(&mut self, patch: CountPatch, now: DateTime<Utc>) {
        self.apply(patch, now);
    }
}

/// Count records, written two ways.
///
/// - Append (`add_count*`): every call creates a new record, even for a
///   (day, member, ticket type) that already has one.
/// - Tally (`increment_count*` / `decrement_count*`): keeps a single record
///   per (day, member, ticket type), bumping its count in place, creating it
///   at 1 and deleting it when it would drop to 0.
///
/// Both paths create records through [`CountStore::create`], so the stored
/// shape never diverges.
pub struct CountStore {
    records: Collection<CountRecord>,
}

impl CountStore {
    pub fn hydrate(gateway: Gateway) -> Self {
        Self {
            records: Collection::hydrate(gateway),
        }
    }

    fn create(
        &mut self,
        date: NaiveDate,
        member_id: &str,
        ticket_type_id: &str,
        count: u32,
        price_per_item: u32,
    ) -> String {
        self.records.insert(NewCount {
            date,
            member_id: member_id.to_string(),
            ticket_type_id: ticket_type_id.to_string(),
            count,
            price_per_item,
        })
    }

    /// The tally record for a (day, member, ticket type) triple.
    fn find_tally(&self, date: NaiveDate, member_id: &str, ticket_type_id: &str) -> Option<&CountRecord> {
        self.records
            .find(|r| r.matches(date, member_id, ticket_type_id))
    }

    /// Append a record for today. Returns the new record id.
    pub fn add_count(
        &mut self,
        member_id: &str,
        ticket_type_id: &str,
        count: u32,
        price_per_item: u32,
    ) -> String {
        self.add_count_on(today(), member_id, ticket_type_id, count, price_per_item)
    }

    /// Append a record for `date`. Returns the new record id.
    pub fn add_count_on(
        &mut self,
        date: NaiveDate,
        member_id: &str,
        ticket_type_id: &str,
        count: u32,
        price_per_item: u32,
    ) -> String {
        self.create(date, member_id, ticket_type_id, count, price_per_item)
    }

    /// Tally one more for today. Returns the id of the tally record.
    pub fn increment_count(&mut self, member_id: &str, ticket_type_id: &str, price: u32) -> String {
        self.increment_count_on(today(), member_id, ticket_type_id, price)
    }

    /// Tally one more on `date`. An existing record keeps its own
    /// `price_per_item`; `price` is only used when the record is created.
    pub fn increment_count_on(
        &mut self,
        date: NaiveDate,
        member_id: &str,
        ticket_type_id: &str,
        price: u32,
    ) -> String {
        match self
            .find_tally(date, member_id, ticket_type_id)
            .map(|r| (r.id.clone(), r.count))
        {
            Some((id, count)) => {
                self.records
                    .update(&id, CountPatch::count(count.saturating_add(1)));
                id
            }
            None => self.create(date, member_id, ticket_type_id, 1, price),
        }
    }

    /// Tally one less for today. See [`CountStore::decrement_count_on`].
    pub fn decrement_count(&mut self, member_id: &str, ticket_type_id: &str) -> Option<u32> {
        self.decrement_count_on(today(), member_id, ticket_type_id)
    }

    /// Tally one less on `date`.
    ///
    /// Returns the remaining count, `Some(0)` when the record was deleted,
    /// or `None` when there was nothing to decrement. A record already at
    /// zero is left alone.
    pub fn decrement_count_on(
        &mut self,
        date: NaiveDate,
        member_id: &str,
        ticket_type_id: &str,
    ) -> Option<u32> {
        let (id, count) = self
            .find_tally(date, member_id, ticket_type_id)
            .map(|r| (r.id.clone(), r.count))?;

        match count {
            0 => {
                debug!(id = %id, "decrement ignored; record already at zero");
                None
            }
            1 => {
                self.records.remove(&id);
                Some(0)
            }
            n => {
                self.records.update(&id, CountPatch::count(n - 1));
                Some(n - 1)
            }
        }
    }

    /// Patch a record; `total_price` and `updated_at` are recomputed.
    pub fn update_record(&mut self, id: &str, patch: CountPatch) -> bool {
        self.records.update(id, patch)
    }

    pub fn delete_record(&mut self, id: &str) -> bool {
        self.records.remove(id)
    }

    /// Every record in insertion order.
    pub fn get_all(&self) -> &[CountRecord] {
        self.records.as_slice()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&CountRecord> {
        self.records.get(id)
    }

    pub fn records_by_date(&self, date: NaiveDate) -> Vec<&CountRecord> {
        self.records.filter(|r| r.date == date)
    }

    pub fn records_by_member(&self, member_id: &str) -> Vec<&CountRecord> {
        self.records.filter(|r| r.member_id == member_id)
    }

    pub fn today_records(&self) -> Vec<&CountRecord> {
        self.records_by_date(today())
    }

    /// Total count for a (day, member, ticket type) across all records.
    pub fn count_on(&self, date: NaiveDate, member_id: &str, ticket_type_id: &str) -> u64 {
        self.records
            .filter(|r| r.matches(date, member_id, ticket_type_id))
            .into_iter()
            .map(|r| u64::from(r.count))
            .sum()
    }

    pub fn today_count(&self, member_id: &str, ticket_type_id: &str) -> u64 {
        self.count_on(today(), member_id, ticket_type_id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.records.reset();
    }
}

impl Observable for CountStore {
    fn notifier(&mut self) -> &mut ChangeNotifier {
        self.records.notifier()
    }
}
