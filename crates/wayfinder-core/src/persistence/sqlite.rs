//! SQLite-backed journey store.

use std::path::Path;

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::Row;
use uuid::Uuid;

use wayfinder_layout::InteractionRecord;

use crate::error::CoreError;
use crate::migrations;

use super::postgres::InteractionRow;
use super::{JourneyStateRecord, JourneyStore};

/// SQLite-backed journey store. UUIDs are stored as hyphenated text.
#[derive(Clone)]
pub struct SqliteJourneyStore {
    pool: SqlitePool,
}

impl SqliteJourneyStore {
    /// Create a store from an existing pool. Migrations are the caller's
    /// responsibility.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create and initialize a store from a file path.
    ///
    /// Creates parent directories and the database file if needed,
    /// connects with sensible defaults, and runs all migrations.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CoreError::Database {
                operation: "create_dir".to_string(),
                details: format!("failed to create directory {:?}: {}", parent, e),
            })?;
        }

        let url = format!("sqlite:{}?mode=rwc", path.to_string_lossy());

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await
            .map_err(|e| CoreError::Database {
                operation: "connect".to_string(),
                details: format!("failed to connect to SQLite at {:?}: {}", path, e),
            })?;

        migrations::run_sqlite(&pool).await?;

        Ok(Self { pool })
    }

    /// Connect to a `sqlite:` URL and run migrations.
    pub async fn connect(url: &str) -> Result<Self, CoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(url)
            .await
            .map_err(|e| CoreError::Database {
                operation: "connect".to_string(),
                details: format!("failed to connect to SQLite at {}: {}", url, e),
            })?;

        migrations::run_sqlite(&pool).await?;

        Ok(Self { pool })
    }
}

fn parse_user_id(raw: &str) -> Result<Uuid, CoreError> {
    Uuid::parse_str(raw).map_err(|e| CoreError::Database {
        operation: "decode".to_string(),
        details: format!("invalid user_id {:?}: {}", raw, e),
    })
}

#[async_trait::async_trait]
impl JourneyStore for SqliteJourneyStore {
    async fn get_state(&self, user_id: Uuid) -> Result<Option<JourneyStateRecord>, CoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, current_stage, current_focus, next_steps,
                   ai_insights, last_guidance_at, updated_at
            FROM journey_states
            WHERE user_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(JourneyStateRecord {
            user_id: parse_user_id(&row.try_get::<String, _>("user_id")?)?,
            current_stage: row.try_get("current_stage")?,
            current_focus: row.try_get("current_focus")?,
            next_steps: row.try_get("next_steps")?,
            ai_insights: row.try_get("ai_insights")?,
            last_guidance_at: row.try_get::<DateTime<Utc>, _>("last_guidance_at")?,
            updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
        }))
    }

    async fn upsert_state(&self, state: &JourneyStateRecord) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO journey_states
                (user_id, current_stage, current_focus, next_steps,
                 ai_insights, last_guidance_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (user_id) DO UPDATE SET
                current_stage = excluded.current_stage,
                current_focus = excluded.current_focus,
                next_steps = excluded.next_steps,
                ai_insights = excluded.ai_insights,
                last_guidance_at = excluded.last_guidance_at,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(state.user_id.to_string())
        .bind(&state.current_stage)
        .bind(&state.current_focus)
        .bind(&state.next_steps)
        .bind(&state.ai_insights)
        .bind(state.last_guidance_at)
        .bind(state.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn record_interaction(
        &self,
        user_id: Uuid,
        record: &InteractionRecord,
    ) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO interactions (user_id, kind, component, feature, occurred_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(user_id.to_string())
        .bind(record.kind.as_str())
        .bind(record.component.map(|c| c.as_str()))
        .bind(&record.feature)
        .bind(record.occurred_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn list_interactions(
        &self,
        user_id: Uuid,
        limit: i64,
    ) -> Result<Vec<InteractionRecord>, CoreError> {
        let rows = sqlx::query_as::<_, InteractionRow>(
            r#"
            SELECT kind, component, feature, occurred_at
            FROM interactions
            WHERE user_id = ?
            ORDER BY occurred_at DESC
            LIMIT ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(InteractionRow::into_record)
            .collect())
    }
}
