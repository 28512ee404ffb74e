//! Tests for the collection store (memory slot unless a file is needed).

use anyhow::Result;
use chrono::{TimeZone, Utc};

use super::{BookmarkStore, DurableSlot, FileSlot, LoadReport, MemorySlot};
use crate::bookmark::{BookmarkId, NewBookmark};
use crate::error::BookmarkError;

fn form(name: &str, url: &str, category: &str) -> NewBookmark {
    NewBookmark::new(name, url, category)
}

/// Slot whose writes always fail, to check rollback.
struct ReadOnlySlot(MemorySlot);

impl DurableSlot for ReadOnlySlot {
    fn describe(&self) -> String {
        "read-only".to_string()
    }
    fn read(&self) -> Result<Option<Vec<u8>>> {
        self.0.read()
    }
    fn write(&self, _data: &str) -> Result<()> {
        anyhow::bail!("disk full")
    }
}

#[test]
fn add_capitalizes_and_defaults_category() {
    let slot = MemorySlot::new();
    let mut store = BookmarkStore::load(&slot).unwrap();
    let idx = store.add(&form("abc def", "example.com", "")).unwrap();
    assert_eq!(idx, 0);
    let rec = &store.list()[0];
    assert_eq!(rec.site_name, "Abc def");
    assert_eq!(rec.site_url, "example.com");
    assert_eq!(rec.category, "Other");
    assert_eq!(rec.id, BookmarkId(1));
    assert!(slot.contents().unwrap().contains("\"siteName\": \"Abc def\""));
}

#[test]
fn add_returns_appended_position() {
    let mut store = BookmarkStore::load(MemorySlot::new()).unwrap();
    assert_eq!(store.add(&form("first", "a.com", "")).unwrap(), 0);
    assert_eq!(store.add(&form("second", "b.com", "")).unwrap(), 1);
    assert_eq!(store.add(&form("third", "c.com", "")).unwrap(), 2);
    let ids: Vec<u64> = store.list().iter().map(|b| b.id.0).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[test]
fn duplicate_url_is_rejected_case_insensitively() {
    let slot = MemorySlot::new();
    let mut store = BookmarkStore::load(&slot).unwrap();
    store.add(&form("example", "Example.com", "")).unwrap();
    let before = slot.contents();
    let err = store.add(&form("again", "example.com", "")).unwrap_err();
    assert!(matches!(err, BookmarkError::Duplicate { ref url } if url == "example.com"));
    assert_eq!(store.len(), 1);
    assert_eq!(slot.contents(), before);
}

#[test]
fn invalid_input_is_rejected_without_mutation() {
    let slot = MemorySlot::new();
    let mut store = BookmarkStore::load(&slot).unwrap();
    let err = store.add(&form("ab", "not a url", "")).unwrap_err();
    match err {
        BookmarkError::Invalid {
            name_valid,
            url_valid,
        } => {
            assert!(!name_valid);
            assert!(!url_valid);
        }
        other => panic!("expected Invalid, got {other:?}"),
    }
    assert!(store.is_empty());
    assert!(slot.contents().is_none());
}

#[test]
fn save_then_load_roundtrip() {
    let slot = MemorySlot::new();
    let mut store = BookmarkStore::load(&slot).unwrap();
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    store.add_at_time(&form("github", "github.com", "Dev"), t).unwrap();
    store.add_at_time(&form("netflix", "netflix.com", "Media"), t).unwrap();

    let reloaded = BookmarkStore::load(&slot).unwrap();
    assert_eq!(reloaded.list(), store.list());

    // ids keep counting from where the previous session stopped
    let mut reloaded = reloaded;
    reloaded.add(&form("rust lang", "rust-lang.org", "")).unwrap();
    assert_eq!(reloaded.list()[2].id, BookmarkId(3));
}

#[test]
fn remove_at_shifts_and_persists() {
    let slot = MemorySlot::new();
    let mut store = BookmarkStore::load(&slot).unwrap();
    for (name, url) in [("one1", "1.com"), ("two2", "2.com"), ("three", "3.com")] {
        store.add(&form(name, url, "")).unwrap();
    }
    let removed = store.remove_at(1).unwrap();
    assert_eq!(removed.site_url, "2.com");

    let reread = BookmarkStore::load(&slot).unwrap();
    let urls: Vec<&str> = reread.list().iter().map(|b| b.site_url.as_str()).collect();
    assert_eq!(urls, vec!["1.com", "3.com"]);
}

#[test]
fn remove_at_out_of_range_leaves_collection() {
    let mut store = BookmarkStore::load(MemorySlot::new()).unwrap();
    store.add(&form("only", "only.com", "")).unwrap();
    let err = store.remove_at(1).unwrap_err();
    assert!(matches!(err, BookmarkError::OutOfRange { index: 1, len: 1 }));
    assert_eq!(store.len(), 1);
    assert!(matches!(
        store.get_at(5),
        Err(BookmarkError::OutOfRange { index: 5, len: 1 })
    ));
}

#[test]
fn remove_by_id_survives_reordering() {
    let mut store = BookmarkStore::load(MemorySlot::new()).unwrap();
    store.add(&form("alpha", "a.com", "")).unwrap();
    store.add(&form("beta", "b.com", "")).unwrap();
    store.add(&form("gamma", "c.com", "")).unwrap();

    store.remove_at(0).unwrap();
    // id 3 is now at position 1
    assert_eq!(store.position_of(BookmarkId(3)), Some(1));
    let removed = store.remove(BookmarkId(3)).unwrap();
    assert_eq!(removed.site_name, "Gamma");
    assert!(matches!(
        store.remove(BookmarkId(3)),
        Err(BookmarkError::NotFound(BookmarkId(3)))
    ));
    assert_eq!(store.get(BookmarkId(2)).unwrap().site_url, "b.com");
}

#[test]
fn failed_write_rolls_back() {
    let slot = ReadOnlySlot(MemorySlot::new());
    let mut store = BookmarkStore::load(slot).unwrap();
    let err = store.add(&form("alpha", "a.com", "")).unwrap_err();
    assert!(matches!(err, BookmarkError::Storage(_)));
    assert!(store.is_empty());
}

#[test]
fn failed_write_restores_removed_record() {
    let seeded = MemorySlot::with_data(
        r#"[{"siteName":"Alpha","siteURL":"a.com"},{"siteName":"Beta","siteURL":"b.com"}]"#,
    );
    let mut store = BookmarkStore::load(ReadOnlySlot(seeded)).unwrap();
    assert!(store.remove_at(0).is_err());
    let names: Vec<&str> = store.list().iter().map(|b| b.site_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Beta"]);
}

#[test]
fn load_fails_on_corrupt_data() {
    let err = BookmarkStore::load(MemorySlot::with_data("{broken")).unwrap_err();
    assert!(matches!(err, BookmarkError::Corrupt { .. }));
}

#[test]
fn open_recovers_from_corrupt_data() {
    let slot = MemorySlot::with_data("{broken");
    let (store, report) = BookmarkStore::open(&slot).unwrap();
    assert!(store.is_empty());
    match report {
        LoadReport::Recovered { preserved, .. } => assert!(preserved.is_some()),
        other => panic!("expected Recovered, got {other:?}"),
    }
    assert_eq!(slot.quarantined().as_deref(), Some("{broken"));
    // a clean empty collection replaced the bad blob
    let (_, report) = BookmarkStore::open(&slot).unwrap();
    assert_eq!(report, LoadReport::Empty);
}

#[test]
fn open_recovers_from_non_utf8_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");
    std::fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

    assert!(matches!(
        BookmarkStore::load(FileSlot::new(&path)),
        Err(BookmarkError::Corrupt { .. })
    ));
    let (mut store, report) = BookmarkStore::open(FileSlot::new(&path)).unwrap();
    assert!(matches!(report, LoadReport::Recovered { preserved: Some(_), .. }));
    assert_eq!(
        std::fs::read(FileSlot::new(&path).corrupt_path()).unwrap(),
        vec![0xff, 0xfe, b'[', b']']
    );
    store.add(&form("fresh", "fresh.com", "")).unwrap();
    assert_eq!(BookmarkStore::load(FileSlot::new(&path)).unwrap().len(), 1);
}

#[test]
fn repeated_recoveries_keep_every_bad_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");
    std::fs::write(&path, "{first").unwrap();
    BookmarkStore::open(FileSlot::new(&path)).unwrap();
    std::fs::write(&path, "{second").unwrap();
    let (_, report) = BookmarkStore::open(FileSlot::new(&path)).unwrap();
    match report {
        LoadReport::Recovered {
            preserved: Some(p), ..
        } => assert_eq!(std::fs::read_to_string(p).unwrap(), "{second"),
        other => panic!("expected Recovered, got {other:?}"),
    }
    let first = FileSlot::new(&path).corrupt_path();
    assert_eq!(std::fs::read_to_string(first).unwrap(), "{first");
}

#[test]
fn open_recovers_from_max_stored_id() {
    let slot = MemorySlot::with_data(
        r#"[{"id":18446744073709551615,"siteName":"Alpha","siteURL":"a.com"}]"#,
    );
    assert!(matches!(
        BookmarkStore::load(&slot),
        Err(BookmarkError::Corrupt { .. })
    ));
    let (store, report) = BookmarkStore::open(&slot).unwrap();
    assert!(store.is_empty());
    assert!(matches!(report, LoadReport::Recovered { .. }));
}

#[test]
fn add_at_exhausted_ids_fails_without_mutation() {
    let slot = MemorySlot::with_data(
        r#"{"version":1,"nextId":18446744073709551615,"bookmarks":[
            {"id":1,"siteName":"Alpha","siteURL":"a.com"}
        ]}"#,
    );
    let mut store = BookmarkStore::load(&slot).unwrap();
    let before = slot.contents();
    let err = store.add(&form("beta", "b.com", "")).unwrap_err();
    assert!(matches!(err, BookmarkError::Storage(_)));
    assert_eq!(store.len(), 1);
    assert_eq!(slot.contents(), before);

    // reloading the same data behaves the same way instead of panicking
    let mut again = BookmarkStore::load(&slot).unwrap();
    assert!(again.add(&form("beta", "b.com", "")).is_err());
}

#[test]
fn ids_near_max_still_add() {
    let slot = MemorySlot::with_data(
        r#"{"version":1,"nextId":18446744073709551613,"bookmarks":[]}"#,
    );
    let mut store = BookmarkStore::load(&slot).unwrap();
    store.add(&form("alpha", "a.com", "")).unwrap();
    store.add(&form("beta", "b.com", "")).unwrap();
    let ids: Vec<u64> = store.list().iter().map(|b| b.id.0).collect();
    assert_eq!(ids, vec![u64::MAX - 2, u64::MAX - 1]);
    assert!(store.add(&form("gamma", "c.com", "")).is_err());
}

#[test]
fn open_reports_counts() {
    let (_, report) = BookmarkStore::open(MemorySlot::new()).unwrap();
    assert_eq!(report, LoadReport::Empty);

    let slot = MemorySlot::with_data(r#"[{"siteName":"Alpha","siteURL":"a.com"}]"#);
    let (store, report) = BookmarkStore::open(&slot).unwrap();
    assert_eq!(report, LoadReport::Loaded { count: 1 });
    assert_eq!(store.list()[0].id, BookmarkId(1));
}

#[test]
fn legacy_array_is_rewritten_versioned() {
    let slot = MemorySlot::with_data(
        r#"[{"siteName":"Alpha","siteURL":"a.com","category":"Dev","dateAdded":"2024-01-01T00:00:00.000Z"}]"#,
    );
    let mut store = BookmarkStore::load(&slot).unwrap();
    store.add(&form("beta", "b.com", "")).unwrap();
    let data = slot.contents().unwrap();
    assert!(data.contains("\"version\": 1"));
    assert!(data.contains("\"nextId\": 3"));
}

#[test]
fn categories_in_first_seen_order() {
    let mut store = BookmarkStore::load(MemorySlot::new()).unwrap();
    store.add(&form("github", "github.com", "Dev")).unwrap();
    store.add(&form("netflix", "netflix.com", "Media")).unwrap();
    store.add(&form("crates", "crates.io", "Dev")).unwrap();
    store.add(&form("misc", "misc.org", "")).unwrap();
    assert_eq!(store.categories(), vec!["Dev", "Media", "Other"]);
}

#[test]
fn custom_default_category() {
    let mut store = BookmarkStore::load(MemorySlot::new())
        .unwrap()
        .with_default_category("Inbox");
    store.add(&form("later", "later.com", "")).unwrap();
    assert_eq!(store.list()[0].category, "Inbox");
}

#[test]
fn file_slot_store_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bookmarks.json");
    {
        let mut store = BookmarkStore::load(FileSlot::new(&path)).unwrap();
        store.add(&form("github", "github.com", "Dev")).unwrap();
    }
    let store = BookmarkStore::load(FileSlot::new(&path)).unwrap();
    assert_eq!(store.len(), 1);
    assert_eq!(store.list()[0].site_name, "Github");
}
