// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Historical interaction records.
//!
//! Interactions are read-only inputs to condition evaluation and priority
//! boosting. They are recorded by the UI through the persistence layer and
//! handed to the orchestrator as a plain slice.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::component::ComponentId;

/// Kind of a recorded interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    View,
    Click,
    Dismiss,
    Complete,
    Expand,
}

impl InteractionKind {
    /// Stable identifier used in persisted records.
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::View => "view",
            InteractionKind::Click => "click",
            InteractionKind::Dismiss => "dismiss",
            InteractionKind::Complete => "complete",
            InteractionKind::Expand => "expand",
        }
    }

    /// Parse a persisted kind string. Unknown values map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "view" => Some(InteractionKind::View),
            "click" => Some(InteractionKind::Click),
            "dismiss" => Some(InteractionKind::Dismiss),
            "complete" => Some(InteractionKind::Complete),
            "expand" => Some(InteractionKind::Expand),
            _ => None,
        }
    }
}

/// One historical interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRecord {
    /// What happened.
    pub kind: InteractionKind,

    /// Component the interaction targeted, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<ComponentId>,

    /// Feature name referenced by the interaction context, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature: Option<String>,

    /// When it happened.
    pub occurred_at: DateTime<Utc>,
}

/// Count interactions targeting a component.
pub fn count_for_component(records: &[InteractionRecord], id: ComponentId) -> usize {
    records.iter().filter(|r| r.component == Some(id)).count()
}

/// Count interactions of a kind.
pub fn count_of_kind(records: &[InteractionRecord], kind: InteractionKind) -> usize {
    records.iter().filter(|r| r.kind == kind).count()
}

/// Whether any interaction references the named feature.
pub fn references_feature(records: &[InteractionRecord], name: &str) -> bool {
    records.iter().any(|r| r.feature.as_deref() == Some(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(kind: InteractionKind, component: Option<ComponentId>) -> InteractionRecord {
        InteractionRecord {
            kind,
            component,
            feature: None,
            occurred_at: Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_count_for_component() {
        let records = vec![
            record(InteractionKind::Click, Some(ComponentId::StreakTracker)),
            record(InteractionKind::View, Some(ComponentId::StreakTracker)),
            record(InteractionKind::Click, Some(ComponentId::TodayTasks)),
            record(InteractionKind::Click, None),
        ];
        assert_eq!(count_for_component(&records, ComponentId::StreakTracker), 2);
        assert_eq!(count_for_component(&records, ComponentId::TodayTasks), 1);
        assert_eq!(count_for_component(&records, ComponentId::AiCoach), 0);
    }

    #[test]
    fn test_references_feature() {
        let mut rec = record(InteractionKind::View, None);
        rec.feature = Some("community".to_string());
        let records = vec![rec];
        assert!(references_feature(&records, "community"));
        assert!(!references_feature(&records, "templates"));
    }

    #[test]
    fn test_kind_round_trips_through_strings() {
        for kind in [
            InteractionKind::View,
            InteractionKind::Click,
            InteractionKind::Dismiss,
            InteractionKind::Complete,
            InteractionKind::Expand,
        ] {
            assert_eq!(InteractionKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(InteractionKind::parse("hover"), None);
    }
}
