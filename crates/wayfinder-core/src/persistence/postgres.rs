// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! PostgreSQL-backed journey store.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use wayfinder_layout::{ComponentId, InteractionKind, InteractionRecord};

use crate::error::CoreError;
use crate::migrations;

use super::{JourneyStateRecord, JourneyStore};

/// PostgreSQL-backed journey store.
#[derive(Clone)]
pub struct PostgresJourneyStore {
    pool: PgPool,
}

impl PostgresJourneyStore {
    /// Create a store from an existing pool. Migrations are the caller's
    /// responsibility.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect to `url` and run migrations.
    pub async fn connect(url: &str) -> Result<Self, CoreError> {
        let pool = PgPool::connect(url).await.map_err(|e| CoreError::Database {
            operation: "connect".to_string(),
            details: format!("failed to connect to PostgreSQL: {}", e),
        })?;
        migrations::run_postgres(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait::async_trait]
impl JourneyStore for PostgresJourneyStore {
    async fn get_state(&self, user_id: Uuid) -> Result<Option<JourneyStateRecord>, CoreError> {
        let record = sqlx::query_as::<_, JourneyStateRecord>(
            r#"
            SELECT user_id, current_stage, current_focus, next_steps,
                   ai_insights, last_guidance_at, updated_at
            FROM journey_states
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    async fn upsert_state(&self, state: &JourneyStateRecord) -> Result<(), CoreError> {
        sqlx::query(
            r#"
            INSERT INTO journey_states
                (user_id, current_stage, current_focus, next_steps,
                 ai_insights, last_guidance_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                current_stage = EXCLUDED.current_stage,
                current_focus = EXCLUDED.current_focus,
                next_steps = EXCLUDED.next_steps,
                ai_insights = EXCLUDED.ai_insights,
                last_guidance_at = EXCLUDED.last_guidance_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(state.user_id)
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
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user_id)
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
            WHERE user_id = $1
            ORDER BY occurred_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .filter_map(InteractionRow::into_record)
            .collect())
    }
}

/// Raw interaction row shared with the SQLite backend.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct InteractionRow {
    pub kind: String,
    pub component: Option<String>,
    pub feature: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl InteractionRow {
    /// Map a raw row to a typed record, dropping rows with unknown kinds.
    pub(super) fn into_record(self) -> Option<InteractionRecord> {
        let Some(kind) = InteractionKind::parse(&self.kind) else {
            tracing::warn!(kind = %self.kind, "skipping interaction with unknown kind");
            return None;
        };
        Some(InteractionRecord {
            kind,
            component: self.component.as_deref().and_then(ComponentId::parse),
            feature: self.feature,
            occurred_at: self.occurred_at,
        })
    }
}
