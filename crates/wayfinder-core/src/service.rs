// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The guidance service.
//!
//! One [`GuidanceService`] is constructed at process start with its
//! collaborators injected and shared by reference across request handlers.
//! A guidance pass is pure except for the insight call and the final
//! write-back; the insight call fails closed to [`StaticInsights`].

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use wayfinder_insights::{
    Insight, InsightGenerator, OpenAiInsights, StaticInsights, build_request,
};
use wayfinder_journey::{
    Focus, JourneyStage, NextStep, Recommendation, UserContext, classify, derive_challenges,
    focus_for, next_steps, recommendations,
};
use wayfinder_layout::{
    DashboardLayout, Device, InteractionRecord, LayoutOrchestrator,
};

use crate::config::Config;
use crate::error::CoreError;
use crate::persistence::{
    JourneyStateRecord, JourneyStore, PostgresJourneyStore, SqliteJourneyStore,
};

/// Default interaction history size for layout passes.
const DEFAULT_INTERACTION_WINDOW: i64 = 50;

/// Result of one guidance pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guidance {
    /// Classified journey stage.
    pub stage: JourneyStage,
    /// Coaching focus for the stage.
    pub current_focus: Focus,
    /// Ordered next steps.
    pub next_steps: Vec<NextStep>,
    /// Ordered recommendations.
    pub recommendations: Vec<Recommendation>,
    /// AI-sourced (or fallback) insight.
    pub insight: Insight,
}

/// Dependency-injected guidance engine.
pub struct GuidanceService {
    store: Arc<dyn JourneyStore>,
    insights: Arc<dyn InsightGenerator>,
    orchestrator: LayoutOrchestrator,
    interaction_window: i64,
}

impl GuidanceService {
    /// Create a service with explicit collaborators.
    pub fn new(
        store: Arc<dyn JourneyStore>,
        insights: Arc<dyn InsightGenerator>,
        orchestrator: LayoutOrchestrator,
    ) -> Self {
        Self {
            store,
            insights,
            orchestrator,
            interaction_window: DEFAULT_INTERACTION_WINDOW,
        }
    }

    /// Override the interaction history size considered by layout passes.
    pub fn with_interaction_window(mut self, window: i64) -> Self {
        self.interaction_window = window;
        self
    }

    /// Build a service from configuration: store backend chosen by URL
    /// scheme, OpenAI insights when a key is configured, static insights
    /// otherwise.
    pub async fn from_config(config: &Config) -> Result<Self, CoreError> {
        let store: Arc<dyn JourneyStore> = if config.database_url.starts_with("postgres") {
            Arc::new(PostgresJourneyStore::connect(&config.database_url).await?)
        } else {
            Arc::new(SqliteJourneyStore::connect(&config.database_url).await?)
        };

        let insights: Arc<dyn InsightGenerator> = match &config.openai_api_key {
            Some(key) => Arc::new(
                OpenAiInsights::new(&config.openai_base_url, &config.openai_model, Some(key.clone()))
                    .map_err(|e| CoreError::InsightInit(e.to_string()))?,
            ),
            None => Arc::new(StaticInsights),
        };

        Ok(
            Self::new(store, insights, LayoutOrchestrator::standard())
                .with_interaction_window(config.interaction_window),
        )
    }

    /// Run one guidance pass and persist the derived state.
    ///
    /// Challenges are derived here so callers only assemble raw snapshot
    /// data. The write-back happens after all computation; a stage lower
    /// than the previously persisted one is logged, not prevented.
    pub async fn guide(
        &self,
        user_id: Uuid,
        context: &UserContext,
    ) -> Result<Guidance, CoreError> {
        let context = context
            .clone()
            .with_challenges(derive_challenges(context));

        let stage = classify(&context);
        let current_focus = focus_for(stage, &context);
        let steps = next_steps(&context, stage, current_focus);
        let recs = recommendations(&context, stage);

        let insight = match self
            .insights
            .generate(build_request(&context, stage, current_focus))
            .await
        {
            Ok(insight) => insight,
            Err(err) => {
                tracing::warn!(
                    backend = self.insights.id(),
                    error = %err,
                    "insight generation failed, using static fallback"
                );
                StaticInsights::for_stage(stage)
            }
        };

        if let Some(previous) = self.store.get_state(user_id).await?
            && let Some(previous_stage) = JourneyStage::parse(&previous.current_stage)
            && stage < previous_stage
        {
            tracing::debug!(
                %user_id,
                from = %previous_stage,
                to = %stage,
                "journey stage regressed"
            );
        }

        let record = JourneyStateRecord {
            user_id,
            current_stage: stage.as_str().to_string(),
            current_focus: current_focus.as_str().to_string(),
            next_steps: serde_json::to_string(&steps)?,
            ai_insights: Some(serde_json::to_string(&insight)?),
            last_guidance_at: context.now,
            updated_at: context.now,
        };
        self.store.upsert_state(&record).await?;

        Ok(Guidance {
            stage,
            current_focus,
            next_steps: steps,
            recommendations: recs,
            insight,
        })
    }

    /// Compute the dashboard layout for a request. Pure pass-through to
    /// the orchestrator.
    pub fn layout(
        &self,
        context: &UserContext,
        stage: JourneyStage,
        interactions: &[InteractionRecord],
        device: Device,
    ) -> DashboardLayout {
        self.orchestrator.layout(context, stage, interactions, device)
    }

    /// Classify, fetch the user's recent interactions, and lay out the
    /// dashboard in one call.
    pub async fn dashboard(
        &self,
        user_id: Uuid,
        context: &UserContext,
        device: Device,
    ) -> Result<DashboardLayout, CoreError> {
        let stage = classify(context);
        let interactions = self
            .store
            .list_interactions(user_id, self.interaction_window)
            .await?;
        Ok(self.layout(context, stage, &interactions, device))
    }

    /// Append one interaction to the user's history.
    pub async fn record_interaction(
        &self,
        user_id: Uuid,
        record: &InteractionRecord,
    ) -> Result<(), CoreError> {
        self.store.record_interaction(user_id, record).await
    }
}
