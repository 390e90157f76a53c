use oshi_tally::{TallyBook, TicketCategory};

#[test]
fn setup_seeds_group_member_and_default_tickets() {
    let mut book = TallyBook::in_memory();
    let ids = book.setup("IMMM", "Fujino Saya", "#FCE4EC");

    assert_eq!(book.groups().selected_id(), Some(ids.group_id.as_str()));
    assert_eq!(book.members().selected_id(), Some(ids.member_id.as_str()));

    let member = book.members().get_by_id(&ids.member_id).unwrap();
    assert!(member.is_favorite);
    assert_eq!(member.group_id, ids.group_id);
    assert_eq!(member.display_name, "Fujino Saya");
    assert_eq!(member.color, "#FCE4EC");

    let catalog: Vec<(&str, TicketCategory, u32, i32)> = book
        .tickets()
        .tickets_by_group(&ids.group_id)
        .into_iter()
        .map(|t| (t.name.as_str(), t.category, t.price, t.sort_order))
        .collect();
    assert_eq!(
        catalog,
        vec![
            ("チェキ券", TicketCategory::Cheki, 1000, 0),
            ("写メ券", TicketCategory::Shamekai, 1500, 1),
            ("動画券", TicketCategory::Video, 2000, 2),
            ("グッズ", TicketCategory::Goods, 500, 3),
        ]
    );
    assert_eq!(book.tickets().active_tickets_by_group(&ids.group_id).len(), 4);
    assert_eq!(ids.ticket_ids.len(), 4);
    assert_eq!(book.tickets().price_of(&ids.ticket_ids[1]), Some(1500));
}

#[test]
fn setup_on_populated_book_keeps_selection() {
    let mut book = TallyBook::in_memory();
    let first = book.setup("IMMM", "Saya", "#FCE4EC");
    let second = book.setup("Box A", "Mio", "#E1F5FE");

    assert_eq!(book.groups().selected_id(), Some(first.group_id.as_str()));
    assert_eq!(book.members().selected_id(), Some(first.member_id.as_str()));
    assert_eq!(book.tickets().len(), 8);
    assert_eq!(book.tickets().tickets_by_group(&second.group_id).len(), 4);
}
