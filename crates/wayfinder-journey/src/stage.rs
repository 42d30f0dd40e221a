// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Journey stage classification.
//!
//! The classifier is a fixed-order decision table over tenure and task
//! counters, first match wins. It applies no hysteresis: a snapshot whose
//! counters sit near a boundary can flip stages between passes, and a stage
//! can regress if counters are recomputed differently. Callers that care
//! about regressions observe them at write-back time.

use serde::{Deserialize, Serialize};

use crate::context::UserContext;

/// Discrete lifecycle bucket, ordered from newest to most established.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JourneyStage {
    Discovery,
    Foundation,
    Growth,
    Scale,
    Mastery,
}

impl JourneyStage {
    /// Stable identifier used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            JourneyStage::Discovery => "discovery",
            JourneyStage::Foundation => "foundation",
            JourneyStage::Growth => "growth",
            JourneyStage::Scale => "scale",
            JourneyStage::Mastery => "mastery",
        }
    }

    /// Parse a persisted stage string. Unknown values map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "discovery" => Some(JourneyStage::Discovery),
            "foundation" => Some(JourneyStage::Foundation),
            "growth" => Some(JourneyStage::Growth),
            "scale" => Some(JourneyStage::Scale),
            "mastery" => Some(JourneyStage::Mastery),
            _ => None,
        }
    }
}

impl std::fmt::Display for JourneyStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse coaching theme used to bias presentation, not filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Focus {
    Onboarding,
    Growth,
    Optimization,
}

impl Focus {
    /// Stable identifier used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            Focus::Onboarding => "onboarding",
            Focus::Growth => "growth",
            Focus::Optimization => "optimization",
        }
    }
}

impl std::fmt::Display for Focus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a snapshot into a journey stage.
///
/// Decision table, evaluated in order, first match wins:
///
/// | # | Condition | Stage |
/// |---|-----------|-------|
/// | 1 | no profile, or zero completed tasks | Discovery |
/// | 2 | `days_active < 7` or `tasks_completed < 10` | Discovery |
/// | 3 | `days_active < 30` or `tasks_completed < 50` | Foundation |
/// | 4 | `days_active < 90` or `tasks_completed < 200` | Growth |
/// | 5 | more than 20 achievements | Mastery |
/// | 6 | otherwise | Scale |
///
/// The Mastery rule only fires once the day/task thresholds for Scale are
/// already met: a brand-new profile with 21 achievements still classifies
/// as Discovery.
pub fn classify(context: &UserContext) -> JourneyStage {
    let days_active = context.days_active();
    let tasks = context.stats.tasks_completed;

    if context.profile.is_none() || tasks == 0 {
        return JourneyStage::Discovery;
    }
    if days_active < 7 || tasks < 10 {
        return JourneyStage::Discovery;
    }
    if days_active < 30 || tasks < 50 {
        return JourneyStage::Foundation;
    }
    if days_active < 90 || tasks < 200 {
        return JourneyStage::Growth;
    }
    if context.achievements.len() > 20 {
        return JourneyStage::Mastery;
    }
    JourneyStage::Scale
}

/// Select the coaching focus for a stage.
///
/// Foundation splits on task count so early Foundation users keep the
/// onboarding emphasis until they have some momentum.
pub fn focus_for(stage: JourneyStage, context: &UserContext) -> Focus {
    match stage {
        JourneyStage::Discovery => Focus::Onboarding,
        JourneyStage::Foundation => {
            if context.stats.tasks_completed < 25 {
                Focus::Onboarding
            } else {
                Focus::Growth
            }
        }
        JourneyStage::Growth => Focus::Growth,
        JourneyStage::Scale | JourneyStage::Mastery => Focus::Optimization,
    }
}
