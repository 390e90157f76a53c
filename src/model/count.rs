use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One tallied amount of a ticket type for a member on a calendar day.
///
/// `total_price` always equals `count * price_per_item`; it is recomputed
/// on creation and on every patch. `date` is the aggregation key and is
/// independent of `timestamp`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountRecord {
    pub id: String,
    pub date: NaiveDate,
    pub timestamp: DateTime<Utc>,
    pub member_id: String,
    pub ticket_type_id: String,
    pub count: u32,
    pub price_per_item: u32,
    pub total_price: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCount {
    pub date: NaiveDate,
    pub member_id: String,
    pub ticket_type_id: String,
    pub count: u32,
    pub price_per_item: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountPatch {
    pub date: Option<NaiveDate>,
    pub member_id: Option<String>,
    pub ticket_type_id: Option<String>,
    pub count: Option<u32>,
    pub price_per_item: Option<u32>,
}

impl CountPatch {
    pub fn count(count: u32) -> Self {
        Self {
            count: Some(count),
            ..Default::default()
        }
    }
}

impl CountRecord {
    pub(crate) fn from_new(id: String, now: DateTime<Utc>, new: NewCount) -> Self {
        Self {
            id,
            date: new.date,
            timestamp: now,
            member_id: new.member_id,
            ticket_type_id: new.ticket_type_id,
            count: new.count,
            price_per_item: new.price_per_item,
            total_price: line_total(new.count, new.price_per_item),
            created_at: now,
            updated_at: now,
        }
    }

    pub(crate) fn apply(&mut self, patch: CountPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(member_id) = patch.member_id {
            self.member_id = member_id;
        }
        if let Some(ticket_type_id) = patch.ticket_type_id {
            self.ticket_type_id = ticket_type_id;
        }
        if let Some(count) = patch.count {
            self.count = count;
        }
        if let Some(price_per_item) = patch.price_per_item {
            self.price_per_item = price_per_item;
        }
        self.total_price = line_total(self.count, self.price_per_item);
        self.updated_at = now;
    }

    pub fn matches(&self, date: NaiveDate, member_id: &str, ticket_type_id: &str) -> bool {
        self.date == date && self.member_id == member_id && self.ticket_type_id == ticket_type_id
    }
}

pub(crate) fn line_total(count: u32, price: u32) -> u64 {
    u64::from(count) * u64::from(price)
}
