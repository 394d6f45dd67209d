//! Accounts and the session flag persisted in the JSON file store.

#![allow(clippy::unwrap_used)]

use quickcart_integration_tests::secret;
use quickcart_storefront::Storefront;
use quickcart_storefront::storage::{FileStore, KeyValueStore, StorageError};

#[test]
fn test_account_and_session_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("local_storage.json");

    {
        let store = FileStore::open(&path).unwrap();
        let mut app = Storefront::new(store).unwrap();
        app.sign_up("frank", &secret("pw")).unwrap();
    }

    let store = FileStore::open(&path).unwrap();
    assert_eq!(store.get("isLoggedIn").unwrap().as_deref(), Some("true"));
    let mut app = Storefront::new(store).unwrap();
    assert!(app.is_signed_in());

    app.sign_out().unwrap();
    drop(app);

    let store = FileStore::open(&path).unwrap();
    let mut app = Storefront::new(store).unwrap();
    assert!(!app.is_signed_in());
    app.sign_in("frank", &secret("pw")).unwrap();
}

#[test]
fn test_cart_does_not_persist() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");

    {
        let mut app = Storefront::new(FileStore::open(&path).unwrap()).unwrap();
        app.sign_up("gina", &secret("pw")).unwrap();
        app.page_mut()
            .unwrap()
            .add_to_cart("Lamp", quickcart_core::Price::from_whole(10));
    }

    let app = Storefront::new(FileStore::open(&path).unwrap()).unwrap();
    assert!(app.page().unwrap().cart().is_empty());
}

#[test]
fn test_corrupt_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local_storage.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = FileStore::open(&path).unwrap_err();
    assert!(matches!(err, StorageError::Corrupt { .. }));
}
