use live25_import::components::feed_import::RunSummary;
use live25_import::components::record_store::RecordStoreHandle;
use live25_import::config::{Config, DEFAULT_FEED_URL};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Smoke test to verify that a config can be constructed and validated
#[tokio::test]
async fn test_config_validates() {
    let config = Config {
        feed_url: DEFAULT_FEED_URL.to_string(),
        import_enabled: true,
        import_interval_secs: 3600,
        redis_url: "redis://127.0.0.1:6379".to_string(),
    };

    assert!(config.validate().is_ok());
    assert!(config.feed_url.starts_with("https://25livepub.collegenet.com/"));
}

/// Smoke test for the record store actor handle
#[tokio::test]
async fn test_store_handle_creation() {
    // Create an empty store handle
    let store_handle = RecordStoreHandle::empty();

    // This test is mainly to verify that the code compiles and the handle can
    // be created; real store behavior is covered by reconcile_tests
    assert!(store_handle.shutdown().await.is_ok());
}

/// Test reading config through the shared Arc<RwLock<_>> wrapper
#[tokio::test]
async fn test_shared_config_access() {
    let config = Arc::new(RwLock::new(Config {
        feed_url: "https://example.edu/feed.json".to_string(),
        import_enabled: true,
        import_interval_secs: 60,
        redis_url: "redis://localhost:6379".to_string(),
    }));

    let feed_url = {
        let config_guard = config.read().await;
        config_guard.feed_url.clone()
    };

    assert_eq!(feed_url, "https://example.edu/feed.json");
}

/// RunSummary renders its counters for the scheduler log line
#[test]
fn test_run_summary_display() {
    let summary = RunSummary {
        created: 2,
        updated: 3,
        skipped: 1,
        categories_created: 4,
    };

    assert_eq!(
        summary.to_string(),
        "2 created, 3 updated, 1 skipped, 4 categories created"
    );
}
