// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! User-context snapshot types.
//!
//! A [`UserContext`] is assembled by upstream data-fetch collaborators once
//! per guidance pass and treated as immutable afterwards. Counters that are
//! absent in the source rows default to zero rather than erroring, so every
//! rule in this crate stays total over well-formed snapshots.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Content platform a creator publishes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    Twitch,
    Podcast,
}

impl Platform {
    /// Stable identifier used in persisted records and prompts.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Twitch => "twitch",
            Platform::Podcast => "podcast",
        }
    }
}

/// Subscription plan tier. Gating itself happens upstream; the tier is only
/// carried here so rule tables can reference it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    #[default]
    Free,
    Creator,
    Pro,
}

/// Creator profile: identity and tenure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// When the profile was created. Tenure is measured from this instant.
    pub created_at: DateTime<Utc>,

    /// Primary platform chosen during onboarding, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_platform: Option<Platform>,

    /// Content niche chosen during onboarding, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_niche: Option<String>,
}

/// Aggregated activity counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorStats {
    /// Lifetime completed task count.
    #[serde(default)]
    pub tasks_completed: u32,

    /// Current consecutive-day streak.
    #[serde(default)]
    pub streak_days: u32,

    /// Longest streak ever reached.
    #[serde(default)]
    pub longest_streak: u32,
}

/// One entry of the bounded recent-activity window, most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentTask {
    /// Task identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Completion instant.
    pub completed_at: DateTime<Utc>,
}

/// An unlocked achievement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    /// Achievement identifier.
    pub id: String,
    /// When it was unlocked.
    pub unlocked_at: DateTime<Utc>,
}

/// Derived difficulty tag. Challenges are computed from stats and recent
/// activity by [`crate::derive_challenges`], never stored as source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Challenge {
    /// Few completions inside the recent window despite lifetime activity.
    LowCompletion,
    /// A previously long streak is currently at zero.
    BrokenStreak,
    /// No primary platform selected yet.
    NoPlatform,
    /// No niche selected yet.
    NoNiche,
    /// No recent activity at all.
    Inactive,
}

impl Challenge {
    /// Stable tag string, matching the persisted representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Challenge::LowCompletion => "low_completion",
            Challenge::BrokenStreak => "broken_streak",
            Challenge::NoPlatform => "no_platform",
            Challenge::NoNiche => "no_niche",
            Challenge::Inactive => "inactive",
        }
    }
}

/// Read-only snapshot of a creator's state, rebuilt on every guidance pass.
///
/// All derived values (stage, focus, next steps, layout) are pure functions
/// of this snapshot plus static rule tables. `now` is captured when the
/// snapshot is assembled so that repeated evaluation of the same snapshot
/// yields identical results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserContext {
    /// Profile, absent until onboarding created one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Aggregated counters.
    #[serde(default)]
    pub stats: CreatorStats,

    /// Bounded recent-activity window, most-recent-first.
    #[serde(default)]
    pub recent_tasks: Vec<RecentTask>,

    /// Unlocked achievements.
    #[serde(default)]
    pub achievements: Vec<Achievement>,

    /// Derived challenge tags.
    #[serde(default)]
    pub challenges: BTreeSet<Challenge>,

    /// Current subscription tier.
    #[serde(default)]
    pub plan: PlanTier,

    /// Evaluation instant captured at snapshot assembly.
    pub now: DateTime<Utc>,
}

impl UserContext {
    /// Create an empty snapshot evaluated at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: None,
            stats: CreatorStats::default(),
            recent_tasks: Vec::new(),
            achievements: Vec::new(),
            challenges: BTreeSet::new(),
            plan: PlanTier::default(),
            now,
        }
    }

    /// Set the profile.
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Set the counters.
    pub fn with_stats(mut self, stats: CreatorStats) -> Self {
        self.stats = stats;
        self
    }

    /// Replace the challenge set.
    pub fn with_challenges(mut self, challenges: BTreeSet<Challenge>) -> Self {
        self.challenges = challenges;
        self
    }

    /// Whole days elapsed since profile creation, partial days rounding
    /// down. A snapshot without a profile has zero days active.
    pub fn days_active(&self) -> i64 {
        match &self.profile {
            Some(profile) => (self.now - profile.created_at).num_days().max(0),
            None => 0,
        }
    }
}
