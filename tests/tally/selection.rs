use oshi_tally::{NewGroup, NewMember, TallyBook};

use crate::support::seeded;

#[test]
fn first_group_and_member_are_auto_selected() {
    let s = seeded(TallyBook::in_memory());
    assert_eq!(s.book.groups().selected_id(), Some(s.group.as_str()));
    assert_eq!(s.book.members().selected_id(), Some(s.m1.as_str()));
}

#[test]
fn later_additions_keep_the_cursor() {
    let mut s = seeded(TallyBook::in_memory());
    s.book.groups_mut().add(NewGroup::new("Box A", "#000", -1));
    s.book
        .members_mut()
        .add(NewMember::new(&s.group, "Mio", "#fff", -1));

    assert_eq!(s.book.groups().selected_id(), Some(s.group.as_str()));
    assert_eq!(s.book.members().selected_id(), Some(s.m1.as_str()));
    assert_eq!(s.book.members().get_all()[0].name, "Mio");
}

#[test]
fn deleting_selected_entity_resets_cursor() {
    let mut s = seeded(TallyBook::in_memory());
    s.book.members_mut().select(&s.m2);
    s.book.members_mut().delete(&s.m1);
    assert_eq!(s.book.members().selected_id(), Some(s.m2.as_str()));

    s.book.members_mut().delete(&s.m2);
    assert_eq!(s.book.members().selected_id(), None);
    assert!(s.book.members().selected().is_none());

    s.book.groups_mut().delete(&s.group);
    assert_eq!(s.book.groups().selected_id(), None);
}

#[test]
fn deleting_group_leaves_members_and_tickets() {
    let mut s = seeded(TallyBook::in_memory());
    s.book.groups_mut().delete(&s.group);

    assert_eq!(s.book.members().members_by_group(&s.group).len(), 2);
    assert_eq!(s.book.tickets().tickets_by_group(&s.group).len(), 1);
}

#[test]
fn emptied_store_auto_selects_again() {
    let mut book = TallyBook::in_memory();
    let first = book.groups_mut().add(NewGroup::new("A", "", 0));
    book.groups_mut().delete(&first);
    let second = book.groups_mut().add(NewGroup::new("B", "", 0));
    assert_eq!(book.groups().selected_id(), Some(second.as_str()));
}
