use oshi_tally::aggregate::{
    date_count_map, day_breakdown, grand_total, member_label, member_total, records_for_date,
};
use oshi_tally::{TallyBook, Totals, UNKNOWN_LABEL};

use crate::support::{day, seeded};

#[test]
fn day_and_member_totals() {
    let mut s = seeded(TallyBook::in_memory());
    let d1 = day(2025, 7, 1);
    s.book.counts_mut().add_count_on(d1, &s.m1, &s.t1, 2, 500);
    s.book.counts_mut().add_count_on(d1, &s.m2, &s.t1, 1, 500);

    let records = records_for_date(s.book.counts(), d1);
    assert_eq!(
        grand_total(&records, s.book.tickets()),
        Totals {
            count: 3,
            amount: 1500
        }
    );
    assert_eq!(
        member_total(&records, &s.m1, s.book.tickets()),
        Totals {
            count: 2,
            amount: 1000
        }
    );
}

#[test]
fn date_map_agrees_with_manual_filter() {
    let mut s = seeded(TallyBook::in_memory());
    let days = [day(2025, 7, 1), day(2025, 7, 2), day(2025, 7, 9)];
    for (i, d) in days.iter().enumerate() {
        for n in 0..=i as u32 {
            s.book.counts_mut().add_count_on(*d, &s.m1, &s.t1, n + 1, 500);
            s.book.counts_mut().increment_count_on(*d, &s.m2, &s.t1, 500);
        }
    }

    let map = date_count_map(s.book.counts());
    for d in days.iter().chain([day(2025, 7, 3)].iter()) {
        let manual: u64 = s
            .book
            .counts()
            .get_all()
            .iter()
            .filter(|r| r.date == *d)
            .map(|r| u64::from(r.count))
            .sum();
        assert_eq!(map.get(d).copied().unwrap_or(0), manual);
    }
    let all: u64 = s.book.counts().get_all().iter().map(|r| u64::from(r.count)).sum();
    assert_eq!(map.values().sum::<u64>(), all);
}

#[test]
fn orphaned_member_records_still_aggregate() {
    let mut s = seeded(TallyBook::in_memory());
    let d = day(2025, 7, 4);
    s.book.counts_mut().add_count_on(d, &s.m1, &s.t1, 2, 500);
    s.book.counts_mut().add_count_on(d, &s.m2, &s.t1, 1, 500);

    assert!(s.book.members_mut().delete(&s.m1));
    assert_eq!(s.book.counts().len(), 2);

    let records = records_for_date(s.book.counts(), d);
    assert_eq!(member_label(s.book.members(), &s.m1), UNKNOWN_LABEL);
    assert_eq!(
        member_total(&records, &s.m1, s.book.tickets()),
        Totals {
            count: 2,
            amount: 1000
        }
    );
    assert_eq!(grand_total(&records, s.book.tickets()).amount, 1500);

    let lines = day_breakdown(&records, s.book.members(), s.book.tickets());
    assert_eq!(lines[0].member_name, UNKNOWN_LABEL);
    assert_eq!(lines[1].member_name, "Aoi Rin");
}

#[test]
fn orphaned_ticket_records_count_without_amount() {
    let mut s = seeded(TallyBook::in_memory());
    let d = day(2025, 7, 5);
    s.book.counts_mut().add_count_on(d, &s.m1, &s.t1, 2, 500);
    s.book.tickets_mut().delete(&s.t1);

    let records = records_for_date(s.book.counts(), d);
    assert_eq!(
        grand_total(&records, s.book.tickets()),
        Totals {
            count: 2,
            amount: 0
        }
    );
}

#[test]
fn amounts_follow_current_ticket_price() {
    let mut s = seeded(TallyBook::in_memory());
    let d = day(2025, 7, 6);
    let id = s.book.counts_mut().add_count_on(d, &s.m1, &s.t1, 2, 500);
    s.book.tickets_mut().update(
        &s.t1,
        oshi_tally::TicketTypePatch {
            price: Some(800),
            ..Default::default()
        },
    );

    let records = records_for_date(s.book.counts(), d);
    assert_eq!(grand_total(&records, s.book.tickets()).amount, 1600);
    // the record keeps the price it was tallied at
    assert_eq!(s.book.counts().get_by_id(&id).unwrap().total_price, 1000);
}
