//! Aggregation over count records.
//!
//! Everything here is a pure function of the store contents passed in.
//! Nothing is cached or indexed; callers re-run the functions they need when
//! a store notifies them of a change.
//!
//! Amounts are priced with the ticket type's *current* price. A record whose
//! ticket type has been deleted still contributes its count, but adds 0 to
//! amounts. Missing members and ticket types are labelled [`UNKNOWN_LABEL`].

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::Serialize;

use crate::date::in_month;
use crate::model::CountRecord;
use crate::store::{CountStore, MemberStore, TicketStore};

pub const UNKNOWN_LABEL: &str = "unknown";

/// A count and the money it represents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Totals {
    pub count: u64,
    pub amount: u64,
}

impl Totals {
    fn add(&mut self, record: &CountRecord, tickets: &TicketStore) {
        let count = u64::from(record.count);
        let price = tickets.price_of(&record.ticket_type_id).unwrap_or(0);
        self.count += count;
        self.amount += count * u64::from(price);
    }
}

/// Records dated `date`.
pub fn records_for_date(counts: &CountStore, date: NaiveDate) -> Vec<&CountRecord> {
    counts.records_by_date(date)
}

/// Sum of counts per day across every record. Days without records are
/// absent, which reads as 0.
pub fn date_count_map(counts: &CountStore) -> BTreeMap<NaiveDate, u64> {
    let mut map = BTreeMap::new();
    for record in counts.get_all() {
        *map.entry(record.date).or_insert(0) += u64::from(record.count);
    }
    map
}

/// Sum of counts for one member and ticket type within `records`.
pub fn member_ticket_count(records: &[&CountRecord], member_id: &str, ticket_type_id: &str) -> u64 {
    records
        .iter()
        .filter(|r| r.member_id == member_id && r.ticket_type_id == ticket_type_id)
        .map(|r| u64::from(r.count))
        .sum()
}

/// Count and amount for one member within `records`.
pub fn member_total(records: &[&CountRecord], member_id: &str, tickets: &TicketStore) -> Totals {
    let mut totals = Totals::default();
    for record in records.iter().filter(|r| r.member_id == member_id) {
        totals.add(record, tickets);
    }
    totals
}

/// Count and amount over all of `records`.
pub fn grand_total(records: &[&CountRecord], tickets: &TicketStore) -> Totals {
    let mut totals = Totals::default();
    for record in records {
        totals.add(record, tickets);
    }
    totals
}

pub fn member_label<'a>(members: &'a MemberStore, member_id: &str) -> &'a str {
    members
        .get_by_id(member_id)
        .map(|m| m.name.as_str())
        .unwrap_or(UNKNOWN_LABEL)
}

pub fn ticket_label<'a>(tickets: &'a TicketStore, ticket_type_id: &str) -> &'a str {
    tickets
        .get_by_id(ticket_type_id)
        .map(|t| t.name.as_str())
        .unwrap_or(UNKNOWN_LABEL)
}

/// One row of a day's itemized list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayLine {
    pub record_id: String,
    pub member_name: String,
    pub ticket_name: String,
    pub count: u32,
    pub amount: u64,
}

/// Itemize `records` with resolved member and ticket names.
pub fn day_breakdown(
    records: &[&CountRecord],
    members: &MemberStore,
    tickets: &TicketStore,
) -> Vec<DayLine> {
    records
        .iter()
        .map(|r| DayLine {
            record_id: r.id.clone(),
            member_name: member_label(members, &r.member_id).to_string(),
            ticket_name: ticket_label(tickets, &r.ticket_type_id).to_string(),
            count: r.count,
            amount: u64::from(r.count)
                * u64::from(tickets.price_of(&r.ticket_type_id).unwrap_or(0)),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_count: u64,
    pub total_price: u64,
    /// member id -> count
    pub member_counts: BTreeMap<String, u64>,
}

pub fn daily_summary(counts: &CountStore, tickets: &TicketStore, date: NaiveDate) -> DailySummary {
    let records = records_for_date(counts, date);
    summarize_day(date, &records, tickets)
}

fn summarize_day(date: NaiveDate, records: &[&CountRecord], tickets: &TicketStore) -> DailySummary {
    let totals = grand_total(records, tickets);
    let mut member_counts = BTreeMap::new();
    for record in records {
        *member_counts.entry(record.member_id.clone()).or_insert(0) += u64::from(record.count);
    }
    DailySummary {
        date,
        total_count: totals.count,
        total_price: totals.amount,
        member_counts,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRanking {
    pub member_id: String,
    pub count: u64,
    pub price: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_count: u64,
    pub total_price: u64,
    /// Only days with at least one record.
    pub daily: BTreeMap<NaiveDate, DailySummary>,
    /// Members by count, then amount, both descending.
    pub top_members: Vec<MemberRanking>,
}

pub fn monthly_summary(
    counts: &CountStore,
    tickets: &TicketStore,
    year: i32,
    month: u32,
) -> MonthlySummary {
    let mut by_day: BTreeMap<NaiveDate, Vec<&CountRecord>> = BTreeMap::new();
    for record in counts.get_all().iter().filter(|r| in_month(r.date, year, month)) {
        by_day.entry(record.date).or_default().push(record);
    }

    let mut totals = Totals::default();
    let mut per_member: HashMap<&str, Totals> = HashMap::new();
    for record in by_day.values().flatten() {
        totals.add(record, tickets);
        per_member
            .entry(record.member_id.as_str())
            .or_default()
            .add(record, tickets);
    }

    let daily = by_day
        .iter()
        .map(|(date, records)| (*date, summarize_day(*date, records, tickets)))
        .collect();

    let mut top_members: Vec<MemberRanking> = per_member
        .into_iter()
        .map(|(member_id, t)| MemberRanking {
            member_id: member_id.to_string(),
            count: t.count,
            price: t.amount,
        })
        .collect();
    top_members.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(b.price.cmp(&a.price))
            .then_with(|| a.member_id.cmp(&b.member_id))
    });

    MonthlySummary {
        year,
        month,
        total_count: totals.count,
        total_price: totals.amount,
        daily,
        top_members,
    }
}
