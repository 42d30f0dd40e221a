// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Layout condition predicates.
//!
//! A [`LayoutCondition`] is a closed tagged union with one evaluation arm
//! per variant, so adding a predicate kind forces every match site to
//! handle it. Evaluation is side-effect-free; missing stat fields read as
//! zero rather than erroring.

use serde::{Deserialize, Serialize};

use wayfinder_journey::{CreatorStats, JourneyStage, UserContext};

use crate::interaction::{self, InteractionKind, InteractionRecord};

/// Numeric comparison operator shared by progress, time, and interaction
/// conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Greater,
    Less,
    Equals,
}

impl CompareOp {
    fn holds(&self, actual: i64, threshold: i64) -> bool {
        match self {
            CompareOp::Greater => actual > threshold,
            CompareOp::Less => actual < threshold,
            CompareOp::Equals => actual == threshold,
        }
    }
}

/// Stage predicate operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StageOp {
    /// Exactly this stage.
    Equals(JourneyStage),
    /// Stage is a member of the set.
    Includes(Vec<JourneyStage>),
    /// Stage is not a member of the set.
    Excludes(Vec<JourneyStage>),
}

/// Named counter inside [`CreatorStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatField {
    TasksCompleted,
    StreakDays,
    LongestStreak,
}

impl StatField {
    /// Read the counter from a stats block.
    pub fn read(&self, stats: &CreatorStats) -> u32 {
        match self {
            StatField::TasksCompleted => stats.tasks_completed,
            StatField::StreakDays => stats.streak_days,
            StatField::LongestStreak => stats.longest_streak,
        }
    }
}

/// A single boolean predicate gating a dashboard component.
///
/// Components list several conditions; all must hold (logical AND).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutCondition {
    /// Predicate on the current journey stage.
    Stage { op: StageOp },

    /// Numeric comparison of a stats counter against a threshold.
    Progress {
        field: StatField,
        op: CompareOp,
        value: u32,
    },

    /// Comparison of whole days since profile creation against a threshold.
    Time { op: CompareOp, days: i64 },

    /// Comparison of the count of interactions of a kind against a
    /// threshold.
    Interaction {
        kind: InteractionKind,
        op: CompareOp,
        count: u32,
    },

    /// Presence (or required absence) of any interaction referencing a
    /// named feature.
    Feature { name: String, present: bool },
}

/// Evaluate a condition against the current snapshot.
pub fn evaluate(
    condition: &LayoutCondition,
    context: &UserContext,
    stage: JourneyStage,
    interactions: &[InteractionRecord],
) -> bool {
    match condition {
        LayoutCondition::Stage { op } => match op {
            StageOp::Equals(expected) => stage == *expected,
            StageOp::Includes(set) => set.contains(&stage),
            StageOp::Excludes(set) => !set.contains(&stage),
        },
        LayoutCondition::Progress { field, op, value } => {
            op.holds(i64::from(field.read(&context.stats)), i64::from(*value))
        }
        LayoutCondition::Time { op, days } => op.holds(context.days_active(), *days),
        LayoutCondition::Interaction { kind, op, count } => {
            let actual = interaction::count_of_kind(interactions, *kind);
            op.holds(actual as i64, i64::from(*count))
        }
        LayoutCondition::Feature { name, present } => {
            interaction::references_feature(interactions, name) == *present
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};
    use wayfinder_journey::Profile;

    fn context(days_active: i64, tasks_completed: u32) -> UserContext {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        UserContext::new(now)
            .with_profile(Profile {
                created_at: now - Duration::days(days_active),
                selected_platform: None,
                selected_niche: None,
            })
            .with_stats(CreatorStats {
                tasks_completed,
                streak_days: 3,
                longest_streak: 8,
            })
    }

    fn click() -> InteractionRecord {
        InteractionRecord {
            kind: InteractionKind::Click,
            component: None,
            feature: None,
            occurred_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_stage_equals() {
        let cond = LayoutCondition::Stage {
            op: StageOp::Equals(JourneyStage::Growth),
        };
        let ctx = context(45, 80);
        assert!(evaluate(&cond, &ctx, JourneyStage::Growth, &[]));
        assert!(!evaluate(&cond, &ctx, JourneyStage::Scale, &[]));
    }

    #[test]
    fn test_stage_includes_and_excludes() {
        let ctx = context(45, 80);
        let includes = LayoutCondition::Stage {
            op: StageOp::Includes(vec![JourneyStage::Growth, JourneyStage::Scale]),
        };
        assert!(evaluate(&includes, &ctx, JourneyStage::Scale, &[]));
        assert!(!evaluate(&includes, &ctx, JourneyStage::Discovery, &[]));

        let excludes = LayoutCondition::Stage {
            op: StageOp::Excludes(vec![JourneyStage::Discovery]),
        };
        assert!(evaluate(&excludes, &ctx, JourneyStage::Growth, &[]));
        assert!(!evaluate(&excludes, &ctx, JourneyStage::Discovery, &[]));
    }

    #[test]
    fn test_progress_comparisons() {
        let ctx = context(45, 80);
        let greater = LayoutCondition::Progress {
            field: StatField::TasksCompleted,
            op: CompareOp::Greater,
            value: 50,
        };
        assert!(evaluate(&greater, &ctx, JourneyStage::Growth, &[]));

        let equals = LayoutCondition::Progress {
            field: StatField::StreakDays,
            op: CompareOp::Equals,
            value: 3,
        };
        assert!(evaluate(&equals, &ctx, JourneyStage::Growth, &[]));

        let less = LayoutCondition::Progress {
            field: StatField::LongestStreak,
            op: CompareOp::Less,
            value: 8,
        };
        assert!(!evaluate(&less, &ctx, JourneyStage::Growth, &[]));
    }

    #[test]
    fn test_progress_missing_counters_read_as_zero() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let ctx = UserContext::new(now);
        let cond = LayoutCondition::Progress {
            field: StatField::TasksCompleted,
            op: CompareOp::Less,
            value: 1,
        };
        assert!(evaluate(&cond, &ctx, JourneyStage::Discovery, &[]));
    }

    #[test]
    fn test_time_condition_uses_whole_days() {
        let cond = LayoutCondition::Time {
            op: CompareOp::Greater,
            days: 7,
        };
        assert!(!evaluate(&cond, &context(7, 10), JourneyStage::Foundation, &[]));
        assert!(evaluate(&cond, &context(8, 10), JourneyStage::Foundation, &[]));
    }

    #[test]
    fn test_interaction_count_threshold() {
        let ctx = context(45, 80);
        let cond = LayoutCondition::Interaction {
            kind: InteractionKind::Click,
            op: CompareOp::Greater,
            count: 2,
        };
        let records = vec![click(), click(), click()];
        assert!(evaluate(&cond, &ctx, JourneyStage::Growth, &records));
        assert!(!evaluate(&cond, &ctx, JourneyStage::Growth, &records[..2]));
    }

    #[test]
    fn test_feature_presence_and_absence() {
        let ctx = context(45, 80);
        let mut seen = click();
        seen.feature = Some("community".to_string());
        let records = vec![seen];

        let wants_present = LayoutCondition::Feature {
            name: "community".to_string(),
            present: true,
        };
        assert!(evaluate(&wants_present, &ctx, JourneyStage::Growth, &records));
        assert!(!evaluate(&wants_present, &ctx, JourneyStage::Growth, &[]));

        let wants_absent = LayoutCondition::Feature {
            name: "community".to_string(),
            present: false,
        };
        assert!(!evaluate(&wants_absent, &ctx, JourneyStage::Growth, &records));
        assert!(evaluate(&wants_absent, &ctx, JourneyStage::Growth, &[]));
    }

    #[test]
    fn test_condition_serializes_with_type_tag() {
        let cond = LayoutCondition::Progress {
            field: StatField::TasksCompleted,
            op: CompareOp::Greater,
            value: 5,
        };
        let value = serde_json::to_value(&cond).unwrap();
        assert_eq!(value["type"], "progress");
        assert_eq!(value["field"], "tasksCompleted");
        let back: LayoutCondition = serde_json::from_value(value).unwrap();
        assert_eq!(back, cond);
    }
}
