//! Sign-in record persistence alongside the ledger.

use std::fs;

use adclick_core::{FileStore, SESSION_KEY, SessionError, SessionManager};

#[test]
fn login_is_remembered_across_restarts() {
    let tmp = tempfile::tempdir().unwrap();

    let mut session = SessionManager::open(FileStore::open(tmp.path()).unwrap()).unwrap();
    session.login("marta").unwrap();

    let store = FileStore::open(tmp.path()).unwrap();
    let raw = fs::read_to_string(store.record_path(SESSION_KEY)).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "user": { "username": "marta" }, "isAuthenticated": true })
    );

    let reopened = SessionManager::open(store).unwrap();
    assert_eq!(reopened.current().username(), Some("marta"));
}

#[test]
fn logout_writes_signed_out_record() {
    let tmp = tempfile::tempdir().unwrap();
    let mut session = SessionManager::open(FileStore::open(tmp.path()).unwrap()).unwrap();
    session.login("marta").unwrap();
    session.logout().unwrap();

    let reopened = SessionManager::open(FileStore::open(tmp.path()).unwrap()).unwrap();
    assert!(!reopened.current().is_authenticated);
    assert!(reopened.current().user.is_none());
}

#[test]
fn empty_username_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let mut session = SessionManager::open(FileStore::open(tmp.path()).unwrap()).unwrap();
    assert!(matches!(
        session.login(""),
        Err(SessionError::EmptyUsername(_))
    ));
    assert!(!FileStore::open(tmp.path())
        .unwrap()
        .record_path(SESSION_KEY)
        .exists());
}
