use std::fs;

use litreview_core::Credential;
use litreview_engine::{
    CredentialStore, FileCredentialStore, MemoryCredentialStore, CREDENTIALS_FILENAME,
};
use tempfile::TempDir;

#[test]
fn saved_credential_survives_a_reload() {
    litreview_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    let store = FileCredentialStore::new(temp.path());

    store.save(&Credential::new("sk-or-test123")).unwrap();

    let reloaded = FileCredentialStore::new(temp.path());
    assert_eq!(reloaded.load().expose(), "sk-or-test123");
}

#[test]
fn missing_file_loads_as_empty() {
    let temp = TempDir::new().unwrap();
    let store = FileCredentialStore::new(temp.path().join("not-created-yet"));

    assert!(store.load().is_empty());
}

#[test]
fn empty_credential_never_overwrites_the_saved_one() {
    let temp = TempDir::new().unwrap();
    let store = FileCredentialStore::new(temp.path());
    store.save(&Credential::new("sk-or-saved")).unwrap();

    store.save(&Credential::new("")).unwrap();

    assert_eq!(store.load().expose(), "sk-or-saved");
}

#[test]
fn save_creates_the_config_dir() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("litreview");
    let store = FileCredentialStore::new(&dir);

    store.save(&Credential::new("sk-or-x")).unwrap();

    assert!(dir.join(CREDENTIALS_FILENAME).is_file());
    assert_eq!(store.path(), dir.join(CREDENTIALS_FILENAME));
}

#[test]
fn corrupt_file_loads_as_empty() {
    litreview_logging::initialize_for_tests();
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(CREDENTIALS_FILENAME), "this is not ron (").unwrap();

    let store = FileCredentialStore::new(temp.path());
    assert!(store.load().is_empty());

    store.save(&Credential::new("sk-or-fresh")).unwrap();
    assert_eq!(store.load().expose(), "sk-or-fresh");
}

#[test]
fn memory_store_follows_the_same_rule() {
    let store = MemoryCredentialStore::new();
    assert!(store.load().is_empty());

    store.save(&Credential::new("sk-or-test123")).unwrap();
    store.save(&Credential::new("")).unwrap();

    assert_eq!(store.load().expose(), "sk-or-test123");
}

#[cfg(unix)]
#[test]
fn credentials_file_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let store = FileCredentialStore::new(temp.path());
    store.save(&Credential::new("sk-or-secret")).unwrap();

    let mode = fs::metadata(store.path()).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
