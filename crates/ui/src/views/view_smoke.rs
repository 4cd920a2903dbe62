use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use curriculum_core::model::CourseDescriptor;
use services::DEFAULT_PROGRESS_KEY;
use storage::repository::{InMemoryStore, KeyValueStore, Storage, StorageError};

use super::test_harness::{node_class, setup_view_harness, setup_view_harness_with_storage};

/// In-memory store with slow writes.
#[derive(Default)]
struct SlowStore {
    inner: InMemoryStore,
}

#[async_trait]
impl KeyValueStore for SlowStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        self.inner.set(key, value).await
    }
}

/// Store that rejects every write.
struct ReadOnlyStore;

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("quota exceeded".into()))
    }
}

fn descriptors() -> Vec<CourseDescriptor> {
    vec![
        CourseDescriptor::from_raw("Programming I", None),
        CourseDescriptor::from_raw("Programming II", Some("Programming I")),
        CourseDescriptor::from_raw("Compilers", Some("Programming II, Automata")),
    ]
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_view_smoke_renders_initial_states() {
    let mut harness = setup_view_harness(descriptors());
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Test Curriculum"), "missing title in {html}");
    assert!(html.contains("0 / 3 completed"), "missing progress in {html}");
    assert!(html.contains("Programming I"), "missing course in {html}");
    assert!(html.contains("course disabled"), "missing locked node in {html}");
    assert!(html.contains("not-allowed"), "missing locked cursor in {html}");
    assert!(!html.contains("course completed"), "unexpected completed node in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_view_smoke_restores_stored_progress() {
    let storage = Storage::in_memory();
    storage
        .kv
        .set(DEFAULT_PROGRESS_KEY, r#"{"Programming I":true}"#)
        .await
        .expect("seed progress");

    let mut harness = setup_view_harness_with_storage(descriptors(), storage);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("1 / 3 completed"), "missing progress in {html}");
    assert!(html.contains("course completed"), "missing completed node in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_view_smoke_ignores_corrupted_progress() {
    let storage = Storage::in_memory();
    storage
        .kv
        .set(DEFAULT_PROGRESS_KEY, "{{{")
        .await
        .expect("seed corrupt progress");

    let mut harness = setup_view_harness_with_storage(descriptors(), storage);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("0 / 3 completed"), "missing progress in {html}");
    assert!(harness.store.get(DEFAULT_PROGRESS_KEY).await.unwrap().is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn curriculum_view_smoke_reports_invalid_catalog() {
    let mut harness = setup_view_harness(vec![
        CourseDescriptor::from_raw("Programming I", None),
        CourseDescriptor::from_raw("Programming I", None),
    ]);
    harness.rebuild();
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("The course catalog is invalid."), "missing error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn clicking_unlocked_course_completes_and_persists() {
    let mut harness = setup_view_harness(descriptors());
    harness.rebuild();
    harness.settle().await;

    harness.click("Programming I");
    harness.settle().await;

    let html = harness.render();
    assert_eq!(
        node_class(&html, "Programming I"),
        Some("course completed active"),
        "{html}"
    );
    assert_eq!(node_class(&html, "Programming II"), Some("course"), "{html}");
    assert!(html.contains("No prerequisites"), "missing detail panel in {html}");
    assert!(html.contains("1 / 3 completed"), "missing progress in {html}");

    let raw = harness.store.get(DEFAULT_PROGRESS_KEY).await.unwrap();
    assert_eq!(
        raw.as_deref(),
        Some(r#"{"Compilers":false,"Programming I":true,"Programming II":false}"#)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn clicking_another_course_closes_previous_detail_panel() {
    let mut harness = setup_view_harness(descriptors());
    harness.rebuild();
    harness.settle().await;

    harness.click("Programming I");
    harness.click("Compilers");
    harness.settle().await;

    let html = harness.render();
    assert_eq!(node_class(&html, "Programming I"), Some("course completed"), "{html}");
    assert_eq!(node_class(&html, "Compilers"), Some("course disabled active"), "{html}");
    assert_eq!(html.matches("course-info").count(), 1, "{html}");
    assert!(
        html.contains("Prerequisites: Programming II, Automata"),
        "missing detail panel in {html}"
    );
    assert!(!html.contains("No prerequisites"), "stale detail panel in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn clicks_during_a_pending_save_are_not_lost() {
    let storage = Storage {
        kv: Arc::new(SlowStore::default()),
    };
    let mut harness = setup_view_harness_with_storage(descriptors(), storage);
    harness.rebuild();
    harness.settle().await;

    // The second click depends on the first one having unlocked it.
    harness.click("Programming I");
    harness.click("Programming II");
    harness.settle().await;

    let html = harness.render();
    assert_eq!(node_class(&html, "Programming I"), Some("course completed"), "{html}");
    assert_eq!(
        node_class(&html, "Programming II"),
        Some("course completed active"),
        "{html}"
    );
    assert!(html.contains("2 / 3 completed"), "missing progress in {html}");

    let raw = harness.store.get(DEFAULT_PROGRESS_KEY).await.unwrap();
    assert_eq!(
        raw.as_deref(),
        Some(r#"{"Compilers":false,"Programming I":true,"Programming II":true}"#)
    );
}

#[tokio::test(flavor = "current_thread")]
async fn failed_save_shows_notice_and_keeps_toggle() {
    let storage = Storage {
        kv: Arc::new(ReadOnlyStore),
    };
    let mut harness = setup_view_harness_with_storage(descriptors(), storage);
    harness.rebuild();
    harness.settle().await;

    harness.click("Programming I");
    harness.settle().await;

    let html = harness.render();
    assert!(
        html.contains("Progress could not be saved."),
        "missing save notice in {html}"
    );
    assert_eq!(
        node_class(&html, "Programming I"),
        Some("course completed active"),
        "{html}"
    );
}
