//! Tests for the storage watcher.

use super::*;
use crate::storage::{FileStore, KeyValueStore, CONFIG_KEY};
use std::time::Duration;
use tokio::sync::broadcast;

#[test]
fn new_with_missing_file_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    let watcher = StorageWatcher::new(dir.path().join("background-config.json"));
    assert!(watcher.is_ok());
}

#[test]
fn new_creates_missing_parent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state").join("background-config.json");
    StorageWatcher::new(path.clone()).unwrap();
    assert!(path.parent().unwrap().is_dir());
}

#[tokio::test]
async fn signals_after_store_write() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    let watcher = StorageWatcher::new(store.path_for(CONFIG_KEY)).unwrap();

    let (tx, mut rx) = broadcast::channel(4);
    let handle = tokio::spawn(async move { watcher.watch(tx).await });

    // Give the backend a moment to register.
    tokio::time::sleep(Duration::from_millis(200)).await;
    store.set(CONFIG_KEY, "{}").unwrap();

    let got = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
    handle.abort();
    assert!(matches!(got, Ok(Ok(()))));
}
