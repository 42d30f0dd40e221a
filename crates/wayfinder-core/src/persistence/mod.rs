//! Persistence interfaces and backends for wayfinder-core.
//!
//! The engine itself is pure; this module owns the single write-back of
//! derived guidance and the read side of interaction history.

pub mod postgres;
pub mod sqlite;

pub use self::postgres::PostgresJourneyStore;
pub use self::sqlite::SqliteJourneyStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use wayfinder_layout::InteractionRecord;

use crate::error::CoreError;

/// Persisted journey state for one user.
///
/// `next_steps` and `ai_insights` hold the JSON the UI renders; the engine
/// serializes them at write-back and never reads them back for logic.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct JourneyStateRecord {
    /// User this state belongs to.
    pub user_id: Uuid,
    /// Last computed stage (stable stage string).
    pub current_stage: String,
    /// Last computed focus (stable focus string).
    pub current_focus: String,
    /// JSON array of the last computed next steps.
    pub next_steps: String,
    /// JSON of the last insight, if one was generated.
    pub ai_insights: Option<String>,
    /// When guidance last ran for this user.
    pub last_guidance_at: DateTime<Utc>,
    /// Row update time.
    pub updated_at: DateTime<Utc>,
}

/// Persistence interface used by the guidance service.
#[async_trait]
pub trait JourneyStore: Send + Sync {
    /// Fetch the persisted journey state, if any.
    async fn get_state(&self, user_id: Uuid) -> Result<Option<JourneyStateRecord>, CoreError>;

    /// Insert or update the journey state for `state.user_id`.
    async fn upsert_state(&self, state: &JourneyStateRecord) -> Result<(), CoreError>;

    /// Append one interaction to the user's history.
    async fn record_interaction(
        &self,
        user_id: Uuid,
        record: &InteractionRecord,
    ) -> Result<(), CoreError>;

    /// Most recent interactions for the user, newest first, up to `limit`.
    /// Rows with kinds this build no longer knows are skipped.
    async fn list_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<InteractionRecord>, CoreError>;
}
