// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Challenge derivation.
//!
//! Challenges are coarse difficulty tags computed from stats and the recent
//! activity window. They key the extra rows that [`crate::next_steps`] and
//! [`crate::recommendations`] append after the stage tables.

use std::collections::BTreeSet;

use chrono::Duration;

use crate::context::{Challenge, UserContext};

/// Days of silence before a creator counts as inactive.
const INACTIVE_AFTER_DAYS: i64 = 7;

/// Minimum completions inside the recent week before the low-completion tag
/// clears.
const LOW_COMPLETION_FLOOR: usize = 3;

/// Longest-streak threshold above which a zeroed streak counts as broken.
const BROKEN_STREAK_FLOOR: u32 = 7;

/// Derive the challenge tag set for a snapshot.
///
/// Onboarding gaps (`NoPlatform`, `NoNiche`) only apply once a profile
/// exists; activity tags (`LowCompletion`, `BrokenStreak`, `Inactive`) only
/// apply once there is lifetime activity to compare against, so brand-new
/// accounts are not tagged as struggling.
pub fn derive_challenges(context: &UserContext) -> BTreeSet<Challenge> {
    let mut challenges = BTreeSet::new();

    if let Some(profile) = &context.profile {
        if profile.selected_platform.is_none() {
            challenges.insert(Challenge::NoPlatform);
        }
        if profile.selected_niche.is_none() {
            challenges.insert(Challenge::NoNiche);
        }
    }

    if context.stats.tasks_completed == 0 {
        return challenges;
    }

    let week_ago = context.now - Duration::days(INACTIVE_AFTER_DAYS);
    let completions_this_week = context
        .recent_tasks
        .iter()
        .filter(|task| task.completed_at >= week_ago)
        .count();

    if completions_this_week == 0 {
        challenges.insert(Challenge::Inactive);
    } else if completions_this_week < LOW_COMPLETION_FLOOR {
        challenges.insert(Challenge::LowCompletion);
    }

    if context.stats.streak_days == 0 && context.stats.longest_streak >= BROKEN_STREAK_FLOOR {
        challenges.insert(Challenge::BrokenStreak);
    }

    challenges
}
