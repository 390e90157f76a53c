use std::sync::Arc;

use oshi_tally::{
    InMemoryStorage, NewGroup, PersistenceBackend, Storage, StorageError, StoreKey, TallyBook,
    TallyConfig,
};

use crate::support::{day, seeded};

/// Accepts reads but refuses every write.
struct ReadOnlyStorage(InMemoryStorage);

impl Storage for ReadOnlyStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.read(key)
    }
    fn write(&self, _key: &str, _payload: &str) -> Result<(), StorageError> {
        Err(StorageError::Poisoned("write"))
    }
    fn remove(&self, _key: &str) -> Result<bool, StorageError> {
        Err(StorageError::Poisoned("remove"))
    }
    fn keys(&self) -> Result<Vec<String>, StorageError> {
        self.0.keys()
    }
}

#[test]
fn each_store_persists_under_its_own_key() {
    let storage = InMemoryStorage::new();
    let mut s = seeded(TallyBook::with_storage(Arc::new(storage.clone()), false));
    s.book.counts_mut().increment_count(&s.m1, &s.t1, 500);
    s.book.memos_mut().set(day(2025, 8, 1), "tokyo");

    let mut keys = storage.keys().unwrap();
    keys.sort();
    let mut expected: Vec<String> = StoreKey::ALL.iter().map(|k| k.as_str().to_string()).collect();
    expected.sort();
    assert_eq!(keys, expected);
}

#[test]
fn file_backed_book_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = TallyConfig {
        data_dir: dir.path().to_path_buf(),
        persistence: PersistenceBackend::File,
        background_writes: true,
        ..TallyConfig::default()
    };

    let (m1, t1, group) = {
        let mut s = seeded(TallyBook::open(&config).unwrap());
        s.book.counts_mut().increment_count_on(day(2025, 8, 2), &s.m1, &s.t1, 500);
        s.book.counts_mut().increment_count_on(day(2025, 8, 2), &s.m1, &s.t1, 500);
        s.book.memos_mut().set(day(2025, 8, 2), "two shows");
        s.book.flush().unwrap();
        let stats = s.book.close();
        assert_eq!(stats.failures, 0);
        (s.m1, s.t1, s.group)
    };

    let book = TallyBook::open(&config).unwrap();
    assert_eq!(book.groups().len(), 1);
    assert_eq!(book.groups().selected_id(), Some(group.as_str()));
    assert_eq!(book.members().selected_id(), Some(m1.as_str()));
    assert_eq!(book.counts().count_on(day(2025, 8, 2), &m1, &t1), 2);
    assert_eq!(book.counts().get_all()[0].total_price, 1000);
    assert_eq!(book.memos().get(day(2025, 8, 2)), Some("two shows"));
    book.close();
}

#[test]
fn dropped_book_writes_pending_snapshots() {
    let dir = tempfile::tempdir().unwrap();
    let config = TallyConfig {
        data_dir: dir.path().to_path_buf(),
        persistence: PersistenceBackend::File,
        background_writes: true,
        ..TallyConfig::default()
    };

    for round in 1..=5 {
        {
            let mut book = TallyBook::open(&config).unwrap();
            for n in 0..20 {
                book.groups_mut().add(NewGroup::new(format!("g{n}"), "#fff", n));
            }
        }
        let book = TallyBook::open(&config).unwrap();
        assert_eq!(book.groups().len(), round * 20);
    }
}

#[test]
fn write_failures_leave_memory_authoritative() {
    let mut book = TallyBook::with_storage(Arc::new(ReadOnlyStorage(InMemoryStorage::new())), false);
    let id = book.groups_mut().add(NewGroup::new("IMMM", "#fff", 0));
    book.counts_mut().add_count("m", "t", 2, 100);
    book.erase_all();
    book.groups_mut().add(NewGroup::new("again", "#000", 0));

    assert_eq!(book.groups().len(), 1);
    assert!(book.groups().get_by_id(&id).is_none());
    assert!(book.counts().is_empty());
}

#[test]
fn corrupt_document_hydrates_empty() {
    let storage = InMemoryStorage::new();
    storage.write("member-records", "{ not json").unwrap();
    storage
        .write("group-records", r#"{"records":[]}"#)
        .unwrap();

    let book = TallyBook::with_storage(Arc::new(storage), false);
    assert!(book.members().is_empty());
    assert!(book.groups().is_empty());
    assert_eq!(book.groups().selected_id(), None);
}

#[test]
fn erase_all_clears_memory_and_storage() {
    let storage = InMemoryStorage::new();
    let mut s = seeded(TallyBook::with_storage(Arc::new(storage.clone()), true));
    s.book.counts_mut().increment_count(&s.m1, &s.t1, 500);
    s.book.memos_mut().set(day(2025, 8, 3), "memo");
    s.book.flush().unwrap();
    assert_eq!(storage.len(), 5);

    s.book.erase_all();
    s.book.flush().unwrap();

    assert!(storage.is_empty());
    assert!(s.book.groups().is_empty());
    assert!(s.book.members().is_empty());
    assert!(s.book.tickets().is_empty());
    assert!(s.book.counts().is_empty());
    assert!(s.book.memos().is_empty());
    assert_eq!(s.book.groups().selected_id(), None);
    assert_eq!(s.book.members().selected_id(), None);

    let reopened = TallyBook::with_storage(Arc::new(storage), false);
    assert!(reopened.groups().is_empty());
}

#[test]
fn export_includes_catalog_only() {
    let mut s = seeded(TallyBook::in_memory());
    s.book.counts_mut().increment_count(&s.m1, &s.t1, 500);
    s.book.memos_mut().set(day(2025, 8, 4), "memo");
    let counts_before = s.book.counts().len();

    let doc = s.book.export();
    assert_eq!(doc.groups.len(), 1);
    assert_eq!(doc.members.len(), 2);
    assert_eq!(doc.tickets.len(), 1);
    assert_eq!(doc.members[0].id, s.m1);

    let json: serde_json::Value = serde_json::from_str(&s.book.export_json().unwrap()).unwrap();
    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(keys.len(), 4);
    for key in ["groups", "members", "tickets", "exportDate"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    assert_eq!(json["members"][0]["displayName"], "Fujino Saya");
    assert_eq!(json["tickets"][0]["category"], "cheki");

    assert_eq!(s.book.counts().len(), counts_before);
}

#[test]
fn ephemeral_config_opens_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = TallyConfig {
        data_dir: dir.path().join("never-created"),
        ..TallyConfig::ephemeral()
    };
    let mut book = TallyBook::open(&config).unwrap();
    book.groups_mut().add(NewGroup::new("IMMM", "#fff", 0));
    assert!(!config.data_dir.exists());
    assert_eq!(book.close(), Default::default());
}
