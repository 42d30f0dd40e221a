// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Static fallback insights.
//!
//! Used when the configured backend errors, and as the sole generator in
//! deployments without an LLM credential. Keyed by journey stage so the
//! fallback copy still fits where the creator is.

use async_trait::async_trait;

use wayfinder_journey::JourneyStage;

use crate::generator::{Insight, InsightError, InsightGenerator, InsightRequest};

/// Deterministic stage-keyed insight source. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticInsights;

impl StaticInsights {
    /// The fallback insight for a stage.
    pub fn for_stage(stage: JourneyStage) -> Insight {
        let (message, tip) = match stage {
            JourneyStage::Discovery => (
                "Every creator you follow started exactly where you are now.",
                "Finish one item on your starter checklist today.",
            ),
            JourneyStage::Foundation => (
                "Consistency is compounding. Each task builds the habit.",
                "Pick tomorrow's task tonight so you start without deciding.",
            ),
            JourneyStage::Growth => (
                "Your numbers show real momentum. Protect what's working.",
                "Review your top post this week and repeat its format.",
            ),
            JourneyStage::Scale => (
                "You've outgrown doing everything yourself.",
                "Write down one process this week that someone else could run.",
            ),
            JourneyStage::Mastery => (
                "You've built what most creators only plan. Time to multiply it.",
                "Share one lesson from your journey; it's content and legacy.",
            ),
        };
        Insight {
            message: message.to_string(),
            tip: tip.to_string(),
        }
    }
}

#[async_trait]
impl InsightGenerator for StaticInsights {
    fn id(&self) -> &str {
        "static"
    }

    async fn generate(&self, request: InsightRequest) -> Result<Insight, InsightError> {
        // The rendered prompt names the stage; recover it so the fallback
        // stays stage-appropriate even through the trait interface.
        let stage = [
            JourneyStage::Discovery,
            JourneyStage::Foundation,
            JourneyStage::Growth,
            JourneyStage::Scale,
            JourneyStage::Mastery,
        ]
        .into_iter()
        .find(|s| request.prompt.contains(s.as_str()))
        .unwrap_or(JourneyStage::Discovery);

        Ok(Self::for_stage(stage))
    }
}
