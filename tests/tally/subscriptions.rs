#![cfg(feature = "emitter")]

use std::sync::{Arc, Mutex};

use oshi_tally::aggregate::{grand_total, records_for_date};
use oshi_tally::{ChangeKind, Observable, StoreChange, StoreKey, TallyBook};

use crate::support::{day, seeded};

fn recorder() -> (Arc<Mutex<Vec<StoreChange>>>, impl Fn(StoreChange) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |change| sink.lock().unwrap().push(change))
}

#[test]
fn count_mutations_are_announced_in_order() {
    let mut s = seeded(TallyBook::in_memory());
    let (seen, listener) = recorder();
    s.book.counts_mut().subscribe(listener);

    let d = day(2025, 9, 1);
    let id = s.book.counts_mut().increment_count_on(d, &s.m1, &s.t1, 500);
    s.book.counts_mut().increment_count_on(d, &s.m1, &s.t1, 500);
    s.book.counts_mut().decrement_count_on(d, &s.m1, &s.t1);
    s.book.counts_mut().decrement_count_on(d, &s.m1, &s.t1);
    // nothing left: no notification
    s.book.counts_mut().decrement_count_on(d, &s.m1, &s.t1);

    let kinds: Vec<ChangeKind> = seen.lock().unwrap().iter().map(|c| c.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChangeKind::Added,
            ChangeKind::Updated,
            ChangeKind::Updated,
            ChangeKind::Removed
        ]
    );
    assert!(seen
        .lock()
        .unwrap()
        .iter()
        .all(|c| c.store == StoreKey::Counts && c.id.as_deref() == Some(id.as_str())));
}

#[test]
fn subscriber_can_recompute_after_change() {
    let mut s = seeded(TallyBook::in_memory());
    let (seen, listener) = recorder();
    s.book.counts_mut().subscribe(listener);

    let d = day(2025, 9, 2);
    s.book.counts_mut().add_count_on(d, &s.m1, &s.t1, 2, 500);
    assert_eq!(seen.lock().unwrap().len(), 1);

    let records = records_for_date(s.book.counts(), d);
    assert_eq!(grand_total(&records, s.book.tickets()).amount, 1000);
}

#[test]
fn unsubscribe_stops_delivery() {
    let mut s = seeded(TallyBook::in_memory());
    let (seen, listener) = recorder();
    let sub = s.book.groups_mut().subscribe(listener);

    s.book.groups_mut().select(&s.group);
    assert!(s.book.groups_mut().unsubscribe(&sub));
    s.book.groups_mut().delete(&s.group);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].kind, ChangeKind::Selected);
}

#[test]
fn erase_all_announces_cleared_stores() {
    let mut s = seeded(TallyBook::in_memory());
    let (memo_seen, memo_listener) = recorder();
    let (ticket_seen, ticket_listener) = recorder();
    s.book.memos_mut().subscribe(memo_listener);
    s.book.tickets_mut().subscribe(ticket_listener);

    s.book.memos_mut().set(day(2025, 9, 3), "memo");
    s.book.erase_all();

    let memo_kinds: Vec<ChangeKind> = memo_seen.lock().unwrap().iter().map(|c| c.kind).collect();
    assert_eq!(memo_kinds, vec![ChangeKind::Added, ChangeKind::Cleared]);
    assert_eq!(memo_seen.lock().unwrap()[0].id.as_deref(), Some("2025-09-03"));

    let ticket_seen = ticket_seen.lock().unwrap();
    assert_eq!(ticket_seen.len(), 1);
    assert_eq!(ticket_seen[0].kind, ChangeKind::Cleared);
    assert_eq!(ticket_seen[0].store, StoreKey::Tickets);
}
