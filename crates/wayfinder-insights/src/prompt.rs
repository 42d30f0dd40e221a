// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Prompt construction for the insight generator.

use wayfinder_journey::{Focus, JourneyStage, UserContext};

use crate::generator::InsightRequest;

const SYSTEM_PROMPT: &str = "You are a coach for content creators. Reply with a JSON object \
containing exactly two string fields: \"message\" (one or two encouraging sentences grounded \
in the user's numbers) and \"tip\" (one concrete, immediately actionable suggestion). \
No markdown, no extra fields.";

const MAX_TOKENS: u32 = 200;
const TEMPERATURE: f32 = 0.7;

/// Render an [`InsightRequest`] from a guidance pass.
pub fn build_request(context: &UserContext, stage: JourneyStage, focus: Focus) -> InsightRequest {
    let platform = context
        .profile
        .as_ref()
        .and_then(|p| p.selected_platform)
        .map(|p| p.as_str())
        .unwrap_or("not chosen yet");
    let niche = context
        .profile
        .as_ref()
        .and_then(|p| p.selected_niche.clone())
        .unwrap_or_else(|| "not chosen yet".to_string());

    let challenges = if context.challenges.is_empty() {
        "none".to_string()
    } else {
        context
            .challenges
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let prompt = format!(
        "Creator snapshot:\n\
         - journey stage: {stage}\n\
         - coaching focus: {focus}\n\
         - days active: {days}\n\
         - tasks completed: {tasks}\n\
         - current streak: {streak} days (longest: {longest})\n\
         - platform: {platform}\n\
         - niche: {niche}\n\
         - current challenges: {challenges}",
        days = context.days_active(),
        tasks = context.stats.tasks_completed,
        streak = context.stats.streak_days,
        longest = context.stats.longest_streak,
    );

    InsightRequest {
        system: SYSTEM_PROMPT.to_string(),
        prompt,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use wayfinder_journey::{CreatorStats, Platform, Profile};

    #[test]
    fn test_prompt_includes_snapshot_numbers() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let ctx = UserContext::new(now)
            .with_profile(Profile {
                created_at: now - Duration::days(45),
                selected_platform: Some(Platform::Youtube),
                selected_niche: Some("cooking".to_string()),
            })
            .with_stats(CreatorStats {
                tasks_completed: 80,
                streak_days: 4,
                longest_streak: 12,
            });

        let request = build_request(&ctx, JourneyStage::Growth, Focus::Growth);
        assert!(request.prompt.contains("journey stage: growth"));
        assert!(request.prompt.contains("days active: 45"));
        assert!(request.prompt.contains("tasks completed: 80"));
        assert!(request.prompt.contains("platform: youtube"));
        assert!(request.prompt.contains("niche: cooking"));
        assert!(request.prompt.contains("current challenges: none"));
        assert!(request.system.contains("JSON"));
    }

    #[test]
    fn test_prompt_handles_missing_profile() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let request = build_request(&UserContext::new(now), JourneyStage::Discovery, Focus::Onboarding);
        assert!(request.prompt.contains("platform: not chosen yet"));
        assert!(request.prompt.contains("days active: 0"));
    }
}
