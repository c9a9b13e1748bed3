//! Deletion outcomes and the stash area.

mod common;

use bytes::Bytes;
use common::test_store;
use margin_core::{FileName, Fingerprint};
use margin_datastore::{Datastore, DeleteOutcome, DeleteRef};

fn delete_ref(fingerprint: &str, filename: &str) -> DeleteRef {
    DeleteRef {
        fingerprint: Fingerprint::new(fingerprint).unwrap(),
        filename: FileName::new(filename).unwrap(),
    }
}

#[tokio::test]
async fn delete_reports_independent_outcomes() {
    let fixture = test_store().await;
    let store = &fixture.store;
    let doc_ref = delete_ref("0xdead", "missing.pdf");

    store.sync(&doc_ref.fingerprint, r#"{"rev":1}"#).await.unwrap();

    let result = store.delete(&doc_ref).await.unwrap();

    assert!(result.doc_meta_file.removed());
    assert_eq!(result.data_file, DeleteOutcome::NotFound);
    assert!(!store.contains(&doc_ref.fingerprint).await.unwrap());
}

#[tokio::test]
async fn delete_removes_both_state_and_stash_file() {
    let fixture = test_store().await;
    let store = &fixture.store;
    let doc_ref = delete_ref("0xbeef", "original.pdf");

    store.sync(&doc_ref.fingerprint, r#"{"rev":1}"#).await.unwrap();
    let stash_path = store
        .stash(&doc_ref.filename, Bytes::from_static(b"%PDF-1.7"))
        .await
        .unwrap();
    assert!(stash_path.exists());

    let result = store.delete(&doc_ref).await.unwrap();

    assert!(result.doc_meta_file.removed());
    assert!(result.data_file.removed());
    assert!(!stash_path.exists());
}

#[tokio::test]
async fn delete_of_unknown_document_finds_nothing() {
    let fixture = test_store().await;
    let result = fixture
        .store
        .delete(&delete_ref("unknown", "unknown.pdf"))
        .await
        .unwrap();

    assert_eq!(result.doc_meta_file, DeleteOutcome::NotFound);
    assert_eq!(result.data_file, DeleteOutcome::NotFound);
}

#[tokio::test]
async fn stash_writes_under_the_stash_root() {
    let fixture = test_store().await;
    let store = &fixture.store;
    let filename = FileName::new("paper.pdf").unwrap();

    let path = store
        .stash(&filename, Bytes::from_static(b"%PDF-1.7 original"))
        .await
        .unwrap();

    assert!(path.is_absolute());
    assert_eq!(path.parent().unwrap(), store.dirs().stash_dir());
    assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.7 original");
}

#[tokio::test]
async fn stash_overwrites_existing_file() {
    let fixture = test_store().await;
    let store = &fixture.store;
    let filename = FileName::new("paper.pdf").unwrap();

    store.stash(&filename, Bytes::from_static(b"v1")).await.unwrap();
    let path = store.stash(&filename, Bytes::from_static(b"v2")).await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), b"v2");
}
