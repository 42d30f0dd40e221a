// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Next-step and recommendation rule tables.
//!
//! Both generators are pure table lookups keyed by stage, with extra rows
//! appended per derived challenge tag. Ordering is insertion order from the
//! tables; `priority` is a display hint only and never reorders. Entries are
//! deduplicated by id, first occurrence wins, so a stage rule and a
//! challenge rule emitting the same step produce a single card.

use serde::{Deserialize, Serialize};

use crate::context::{Challenge, UserContext};
use crate::stage::{Focus, JourneyStage};

/// Display urgency of a next step. Styling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single suggested action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextStep {
    /// Stable identifier, used for dedup and UI keys.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Supporting copy.
    pub description: String,
    /// Display urgency.
    pub priority: Priority,
    /// Optional in-app route or action hint.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl NextStep {
    fn new(
        id: &str,
        title: &str,
        description: &str,
        priority: Priority,
        action: Option<&str>,
    ) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            priority,
            action: action.map(str::to_string),
        }
    }
}

/// A stage-conditioned content suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Stable identifier, used for dedup and UI keys.
    pub id: String,
    /// Card title.
    pub title: String,
    /// Supporting copy.
    pub body: String,
    /// Coarse grouping used by the UI ("habit", "content", "growth", ...).
    pub category: String,
}

impl Recommendation {
    fn new(id: &str, title: &str, body: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            body: body.to_string(),
            category: category.to_string(),
        }
    }
}

/// Produce the ordered next-step list for a snapshot.
///
/// Stage rows first, then challenge rows in challenge order, deduplicated
/// by id.
pub fn next_steps(context: &UserContext, stage: JourneyStage, focus: Focus) -> Vec<NextStep> {
    let mut steps = Vec::new();

    match stage {
        JourneyStage::Discovery => {
            let platform_missing = context
                .profile
                .as_ref()
                .is_none_or(|p| p.selected_platform.is_none());
            if platform_missing {
                steps.push(NextStep::new(
                    "choose-platform",
                    "Choose Your Primary Platform",
                    "Pick the platform you will publish on first. You can expand later.",
                    Priority::High,
                    Some("/onboarding/platform"),
                ));
            }
            let niche_missing = context
                .profile
                .as_ref()
                .is_none_or(|p| p.selected_niche.is_none());
            if niche_missing {
                steps.push(NextStep::new(
                    "pick-niche",
                    "Pick Your Niche",
                    "Narrow down the topic you want to be known for.",
                    Priority::High,
                    Some("/onboarding/niche"),
                ));
            }
            steps.push(NextStep::new(
                "complete-first-tasks",
                "Complete Your First Tasks",
                "Work through the starter checklist to learn the basics.",
                if context.stats.tasks_completed == 0 {
                    Priority::High
                } else {
                    Priority::Medium
                },
                Some("/tasks"),
            ));
        }
        JourneyStage::Foundation => {
            steps.push(NextStep::new(
                "build-streak",
                "Build a Daily Streak",
                "Show up every day this week, even for a small task.",
                Priority::High,
                Some("/tasks"),
            ));
            steps.push(NextStep::new(
                "explore-templates",
                "Explore Content Templates",
                "Use a proven template instead of starting from a blank page.",
                Priority::Medium,
                Some("/templates"),
            ));
            if focus == Focus::Growth {
                steps.push(NextStep::new(
                    "plan-week",
                    "Plan Next Week's Content",
                    "Block out your calendar so publishing becomes routine.",
                    Priority::Low,
                    Some("/calendar"),
                ));
            }
        }
        JourneyStage::Growth => {
            steps.push(NextStep::new(
                "analyze-performance",
                "Analyze What's Working",
                "Review your top posts and double down on the patterns.",
                Priority::High,
                Some("/insights"),
            ));
            steps.push(NextStep::new(
                "batch-content",
                "Batch Your Content",
                "Produce several pieces in one sitting to free up your week.",
                Priority::Medium,
                Some("/calendar"),
            ));
            steps.push(NextStep::new(
                "engage-community",
                "Engage Your Community",
                "Reply to comments within the first hour after publishing.",
                Priority::Medium,
                None,
            ));
        }
        JourneyStage::Scale => {
            steps.push(NextStep::new(
                "systematize-workflow",
                "Systematize Your Workflow",
                "Document your production process so it can run without you.",
                Priority::High,
                None,
            ));
            steps.push(NextStep::new(
                "diversify-formats",
                "Diversify Your Formats",
                "Repurpose winners into a second format or platform.",
                Priority::Medium,
                Some("/templates"),
            ));
            steps.push(NextStep::new(
                "review-analytics",
                "Review Monthly Analytics",
                "Set a monthly review to catch trends early.",
                Priority::Low,
                Some("/insights"),
            ));
        }
        JourneyStage::Mastery => {
            steps.push(NextStep::new(
                "mentor-creators",
                "Mentor Newer Creators",
                "Teaching your process sharpens it and grows your network.",
                Priority::Medium,
                None,
            ));
            steps.push(NextStep::new(
                "launch-product",
                "Launch Your Own Product",
                "Turn your audience's recurring questions into an offer.",
                Priority::High,
                None,
            ));
            steps.push(NextStep::new(
                "optimize-funnel",
                "Optimize Your Funnel",
                "Audit the path from viewer to subscriber to customer.",
                Priority::Medium,
                Some("/insights"),
            ));
        }
    }

    for challenge in &context.challenges {
        match challenge {
            Challenge::LowCompletion => steps.push(NextStep::new(
                "restart-momentum",
                "Restart Your Momentum",
                "Pick one small task and finish it today.",
                Priority::High,
                Some("/tasks"),
            )),
            Challenge::BrokenStreak => steps.push(NextStep::new(
                "rebuild-streak",
                "Rebuild Your Streak",
                "Your longest streak proves you can do it. Start with day one.",
                Priority::High,
                Some("/tasks"),
            )),
            Challenge::NoPlatform => steps.push(NextStep::new(
                "choose-platform",
                "Choose Your Primary Platform",
                "Pick the platform you will publish on first. You can expand later.",
                Priority::High,
                Some("/onboarding/platform"),
            )),
            Challenge::NoNiche => steps.push(NextStep::new(
                "pick-niche",
                "Pick Your Niche",
                "Narrow down the topic you want to be known for.",
                Priority::High,
                Some("/onboarding/niche"),
            )),
            Challenge::Inactive => steps.push(NextStep::new(
                "schedule-session",
                "Schedule a Creation Session",
                "Put 30 minutes on your calendar this week. Protect it.",
                Priority::Medium,
                Some("/calendar"),
            )),
        }
    }

    dedup_by_id(steps, |step| step.id.clone())
}

/// Produce the ordered recommendation list for a snapshot.
pub fn recommendations(context: &UserContext, stage: JourneyStage) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    match stage {
        JourneyStage::Discovery => {
            recs.push(Recommendation::new(
                "starter-templates",
                "Start From a Template",
                "Creators who use a starter template publish their first piece twice as fast.",
                "content",
            ));
            recs.push(Recommendation::new(
                "short-form-first",
                "Try Short-Form First",
                "Short formats give you faster feedback while you find your voice.",
                "content",
            ));
        }
        JourneyStage::Foundation => {
            recs.push(Recommendation::new(
                "consistency-over-polish",
                "Consistency Beats Polish",
                "A steady weekly cadence outperforms occasional perfect posts.",
                "habit",
            ));
            recs.push(Recommendation::new(
                "content-calendar",
                "Adopt a Content Calendar",
                "Planning a week ahead removes the daily what-do-I-post decision.",
                "habit",
            ));
        }
        JourneyStage::Growth => {
            recs.push(Recommendation::new(
                "collab-outreach",
                "Collaborate With Peers",
                "Collaborations are the fastest organic way to reach adjacent audiences.",
                "growth",
            ));
            recs.push(Recommendation::new(
                "analytics-deep-dive",
                "Do an Analytics Deep Dive",
                "Find your top three posts and write down why they worked.",
                "growth",
            ));
        }
        JourneyStage::Scale => {
            recs.push(Recommendation::new(
                "delegate-editing",
                "Delegate Your Editing",
                "Handing off post-production typically frees 5+ hours a week.",
                "workflow",
            ));
            recs.push(Recommendation::new(
                "repurposing-pipeline",
                "Build a Repurposing Pipeline",
                "Every long-form piece should feed at least three short ones.",
                "workflow",
            ));
        }
        JourneyStage::Mastery => {
            recs.push(Recommendation::new(
                "community-offer",
                "Launch a Community Offer",
                "Your most engaged followers are asking for a closer connection.",
                "monetization",
            ));
            recs.push(Recommendation::new(
                "teach-your-system",
                "Teach Your System",
                "Documenting your process doubles as content and as a product.",
                "monetization",
            ));
        }
    }

    for challenge in &context.challenges {
        match challenge {
            Challenge::LowCompletion => recs.push(Recommendation::new(
                "smaller-tasks",
                "Shrink the Task",
                "If a task keeps slipping, cut its scope in half until it fits your day.",
                "habit",
            )),
            Challenge::BrokenStreak => recs.push(Recommendation::new(
                "streak-insurance",
                "Keep a Backup Task",
                "Keep one five-minute task ready for days when nothing else fits.",
                "habit",
            )),
            Challenge::NoPlatform | Challenge::NoNiche => recs.push(Recommendation::new(
                "finish-onboarding",
                "Finish Setting Up",
                "Guidance gets sharper once your platform and niche are set.",
                "habit",
            )),
            Challenge::Inactive => recs.push(Recommendation::new(
                "comeback-post",
                "Post a Comeback Update",
                "A simple here's-what-I've-been-up-to post restarts the feedback loop.",
                "content",
            )),
        }
    }

    dedup_by_id(recs, |rec| rec.id.clone())
}

/// Drop later entries whose id already appeared, preserving order.
fn dedup_by_id<T>(items: Vec<T>, id_of: impl Fn(&T) -> String) -> Vec<T> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(id_of(item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Challenge, CreatorStats, Platform, Profile};
    use chrono::{Duration, TimeZone, Utc};

    fn context(days_active: i64, tasks_completed: u32) -> UserContext {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        UserContext::new(now)
            .with_profile(Profile {
                created_at: now - Duration::days(days_active),
                selected_platform: Some(Platform::Youtube),
                selected_niche: Some("fitness".to_string()),
            })
            .with_stats(CreatorStats {
                tasks_completed,
                streak_days: 1,
                longest_streak: 3,
            })
    }

    #[test]
    fn test_discovery_without_platform_suggests_choosing_one() {
        let mut ctx = context(3, 0);
        if let Some(profile) = ctx.profile.as_mut() {
            profile.selected_platform = None;
        }
        let steps = next_steps(&ctx, JourneyStage::Discovery, Focus::Onboarding);
        assert_eq!(steps[0].id, "choose-platform");
        assert_eq!(steps[0].title, "Choose Your Primary Platform");
        assert_eq!(steps[0].priority, Priority::High);
    }

    #[test]
    fn test_discovery_with_platform_skips_platform_step() {
        let steps = next_steps(&context(3, 0), JourneyStage::Discovery, Focus::Onboarding);
        assert!(steps.iter().all(|s| s.id != "choose-platform"));
        assert!(steps.iter().any(|s| s.id == "complete-first-tasks"));
    }

    #[test]
    fn test_stage_rule_and_challenge_rule_dedupe_by_id() {
        let mut ctx = context(3, 0);
        if let Some(profile) = ctx.profile.as_mut() {
            profile.selected_platform = None;
        }
        ctx.challenges.insert(Challenge::NoPlatform);
        let steps = next_steps(&ctx, JourneyStage::Discovery, Focus::Onboarding);
        let platform_steps = steps.iter().filter(|s| s.id == "choose-platform").count();
        assert_eq!(platform_steps, 1);
    }

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut ctx = context(45, 80);
        ctx.challenges.insert(Challenge::BrokenStreak);
        let steps = next_steps(&ctx, JourneyStage::Growth, Focus::Growth);
        let ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "analyze-performance",
                "batch-content",
                "engage-community",
                "rebuild-streak"
            ]
        );
    }

    #[test]
    fn test_foundation_plan_week_gated_on_growth_focus() {
        let steps = next_steps(&context(10, 20), JourneyStage::Foundation, Focus::Onboarding);
        assert!(steps.iter().all(|s| s.id != "plan-week"));

        let steps = next_steps(&context(10, 30), JourneyStage::Foundation, Focus::Growth);
        assert!(steps.iter().any(|s| s.id == "plan-week"));
    }

    #[test]
    fn test_recommendations_follow_stage_table() {
        let recs = recommendations(&context(45, 80), JourneyStage::Growth);
        let ids: Vec<&str> = recs.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["collab-outreach", "analytics-deep-dive"]);
    }

    #[test]
    fn test_onboarding_challenges_share_one_recommendation() {
        let mut ctx = context(3, 5);
        ctx.challenges.insert(Challenge::NoPlatform);
        ctx.challenges.insert(Challenge::NoNiche);
        let recs = recommendations(&ctx, JourneyStage::Discovery);
        let finish = recs.iter().filter(|r| r.id == "finish-onboarding").count();
        assert_eq!(finish, 1);
    }

    #[test]
    fn test_generators_are_pure() {
        let mut ctx = context(45, 80);
        ctx.challenges.insert(Challenge::Inactive);
        let a = next_steps(&ctx, JourneyStage::Growth, Focus::Growth);
        let b = next_steps(&ctx, JourneyStage::Growth, Focus::Growth);
        assert_eq!(a, b);
    }
}
