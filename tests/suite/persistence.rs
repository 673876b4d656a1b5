//! Ledger state on disk: reload after restart, record layout, and behavior
//! when the store fails.

use std::fs;
use std::sync::Arc;

use adclick_config::LedgerConfig;
use adclick_core::{FileStore, LEDGER_KEY, LedgerError, LedgerState, MemoryStore, StoreError};
use adclick_types::CatalogQuota;

use crate::common::{Harness, item_ids, lisbon};

fn file_config(dir: &std::path::Path) -> LedgerConfig {
    LedgerConfig {
        data_dir: dir.to_path_buf(),
        ..LedgerConfig::default()
    }
}

#[test]
fn state_survives_a_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let config = file_config(tmp.path());
    let store = FileStore::open(&config.data_dir).unwrap();

    let mut first = Harness::with_store(store.clone(), lisbon(2026, 3, 10, 9), &config);
    first.ledger.initialize().unwrap();
    let ids = first.ids();
    for id in &ids[..6] {
        first.click(id);
    }
    let saved = first.state().clone();
    drop(first);

    let mut second = Harness::with_store(
        FileStore::open(&config.data_dir).unwrap(),
        lisbon(2026, 3, 10, 18),
        &config,
    );
    assert_eq!(second.state(), &saved);
    assert!(!second.ledger.initialize().unwrap(), "same month keeps the catalog");
    assert_eq!(item_ids(second.state()), ids);
    assert_eq!(second.state().daily_click_count(), 6);
}

#[test]
fn changed_quota_regenerates_a_stored_catalog() {
    let tmp = tempfile::tempdir().unwrap();
    let config = file_config(tmp.path());

    let mut first = Harness::with_store(
        FileStore::open(&config.data_dir).unwrap(),
        lisbon(2026, 3, 10, 9),
        &config,
    );
    first.ledger.initialize().unwrap();
    first.click_all();
    drop(first);

    let smaller = LedgerConfig {
        quota: CatalogQuota::new(3, 2).unwrap(),
        ..config
    };
    let mut second = Harness::with_store(
        FileStore::open(&smaller.data_dir).unwrap(),
        lisbon(2026, 3, 11, 9),
        &smaller,
    );
    assert!(second.ledger.initialize().unwrap());
    assert_eq!(second.state().items().len(), 5);

    let id = second.ids()[0].clone();
    assert!(second.click(&id).is_applied());
    assert_eq!(second.state().items().len(), 5);
    assert_eq!(second.state().daily_click_count(), 1);
}

#[test]
fn record_file_uses_camel_case_layout() {
    let tmp = tempfile::tempdir().unwrap();
    let config = file_config(tmp.path());
    let store = FileStore::open(&config.data_dir).unwrap();

    let mut h = Harness::with_store(store.clone(), lisbon(2026, 3, 10, 9), &config);
    h.ledger.initialize().unwrap();
    let id = h.ids()[0].clone();
    h.click(&id);

    let raw = fs::read_to_string(store.record_path(LEDGER_KEY)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["dailyClickCount"], 1);
    assert_eq!(json["lastDailyResetKey"], "2026-03-10");
    assert_eq!(json["items"].as_array().unwrap().len(), 15);

    let first = &json["items"][0];
    assert_eq!(first["id"], id.as_str());
    assert_eq!(first["isClicked"], true);
    assert!(first["category"] == "Tech" || first["category"] == "Home");

    let parsed: LedgerState = serde_json::from_value(json).unwrap();
    assert_eq!(&parsed, h.state());
}

#[test]
fn unavailable_store_fails_the_click_and_keeps_memory_consistent() {
    let store = Arc::new(MemoryStore::new());
    let mut h = Harness::with_store(
        Arc::clone(&store),
        lisbon(2026, 3, 10, 9),
        &LedgerConfig::default(),
    );
    h.ledger.initialize().unwrap();
    let id = h.ids()[2].clone();
    let before = h.state().clone();

    store.set_offline(true);
    let err = h.ledger.click(&id).unwrap_err();
    assert!(matches!(
        err,
        LedgerError::StoreUnavailable(StoreError::Unavailable(_))
    ));
    assert_eq!(h.state(), &before);

    store.set_offline(false);
    assert!(h.click(&id).is_applied());
    let persisted: LedgerState = serde_json::from_value(store.get(LEDGER_KEY).unwrap()).unwrap();
    assert_eq!(&persisted, h.state());
}

#[test]
fn corrupt_record_fails_to_open() {
    let tmp = tempfile::tempdir().unwrap();
    let store = FileStore::open(tmp.path()).unwrap();
    fs::write(store.record_path(LEDGER_KEY), "not json").unwrap();

    let result = adclick_core::RewardLedger::open(
        store,
        adclick_core::SystemClock,
        rand::thread_rng(),
        &LedgerConfig::default(),
    );
    assert!(matches!(
        result,
        Err(LedgerError::StoreUnavailable(StoreError::Decode { .. }))
    ));
}
