//! Common test infrastructure for wayfinder-core integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

use wayfinder_core::{GuidanceService, SqliteJourneyStore};
use wayfinder_insights::{Insight, InsightGenerator, MockInsights};
use wayfinder_journey::{CreatorStats, Platform, Profile, UserContext};
use wayfinder_layout::LayoutOrchestrator;

/// Install a test subscriber once so `RUST_LOG=debug` surfaces engine logs
/// in failing tests.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Fixed evaluation instant so assertions are deterministic.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
}

/// Snapshot with a profile created `days_active` days ago.
pub fn context(days_active: i64, tasks_completed: u32) -> UserContext {
    UserContext::new(now())
        .with_profile(Profile {
            created_at: now() - Duration::days(days_active),
            selected_platform: Some(Platform::Youtube),
            selected_niche: Some("fitness".to_string()),
        })
        .with_stats(CreatorStats {
            tasks_completed,
            streak_days: 2,
            longest_streak: 5,
        })
}

/// SQLite store backed by a temp directory. Keep the TempDir alive for the
/// duration of the test.
pub async fn sqlite_store() -> (Arc<SqliteJourneyStore>, TempDir) {
    init_tracing();
    let dir = TempDir::new().expect("create temp dir");
    let store = SqliteJourneyStore::from_path(dir.path().join("wayfinder-test.db"))
        .await
        .expect("create sqlite store");
    (Arc::new(store), dir)
}

/// Service over a fresh SQLite store and the given generator.
pub async fn service_with(
    generator: Arc<dyn InsightGenerator>,
) -> (GuidanceService, Arc<SqliteJourneyStore>, TempDir) {
    let (store, dir) = sqlite_store().await;
    let service = GuidanceService::new(
        store.clone(),
        generator,
        LayoutOrchestrator::standard(),
    );
    (service, store, dir)
}

/// A canned successful insight.
pub fn canned_insight() -> Insight {
    Insight {
        message: "Strong week".to_string(),
        tip: "Batch two posts".to_string(),
    }
}

/// A mock generator that always succeeds with [`canned_insight`].
pub fn succeeding_mock() -> Arc<MockInsights> {
    Arc::new(MockInsights::succeeding(canned_insight()))
}

/// A mock generator that always fails.
pub fn failing_mock() -> Arc<MockInsights> {
    Arc::new(MockInsights::failing("backend down"))
}
