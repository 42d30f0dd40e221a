// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Dashboard component registry.
//!
//! The registry is a fixed table defined at process start. It is never
//! mutated at runtime; each layout pass only filters and sorts it.

use serde::{Deserialize, Serialize};

use wayfinder_journey::JourneyStage;

use crate::condition::{CompareOp, LayoutCondition, StageOp, StatField};
use crate::interaction::InteractionKind;

/// Identity of a dashboard component. Closed set; the UI maps these to
/// React components by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ComponentId {
    WelcomeChecklist,
    TodayTasks,
    StreakTracker,
    ContentCalendar,
    TemplateLibrary,
    PerformanceInsights,
    AchievementShowcase,
    CommunitySpotlight,
    UpgradePrompt,
    AiCoach,
}

impl ComponentId {
    /// Stable identifier used in persisted interaction records.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentId::WelcomeChecklist => "welcome_checklist",
            ComponentId::TodayTasks => "today_tasks",
            ComponentId::StreakTracker => "streak_tracker",
            ComponentId::ContentCalendar => "content_calendar",
            ComponentId::TemplateLibrary => "template_library",
            ComponentId::PerformanceInsights => "performance_insights",
            ComponentId::AchievementShowcase => "achievement_showcase",
            ComponentId::CommunitySpotlight => "community_spotlight",
            ComponentId::UpgradePrompt => "upgrade_prompt",
            ComponentId::AiCoach => "ai_coach",
        }
    }

    /// Parse a persisted component string. Unknown values map to `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "welcome_checklist" => Some(ComponentId::WelcomeChecklist),
            "today_tasks" => Some(ComponentId::TodayTasks),
            "streak_tracker" => Some(ComponentId::StreakTracker),
            "content_calendar" => Some(ComponentId::ContentCalendar),
            "template_library" => Some(ComponentId::TemplateLibrary),
            "performance_insights" => Some(ComponentId::PerformanceInsights),
            "achievement_showcase" => Some(ComponentId::AchievementShowcase),
            "community_spotlight" => Some(ComponentId::CommunitySpotlight),
            "upgrade_prompt" => Some(ComponentId::UpgradePrompt),
            "ai_coach" => Some(ComponentId::AiCoach),
            _ => None,
        }
    }
}

/// Visibility mode of a registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Always shown.
    Always,
    /// Shown only when every listed condition holds.
    Conditional,
    /// Never shown (kept in the registry for rollout toggling).
    Hidden,
}

/// Grid-span hint for the UI grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSpan {
    Small,
    Medium,
    Large,
    Full,
}

/// One registry entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardComponent {
    /// Component identity.
    pub id: ComponentId,
    /// Base display priority; higher sorts first.
    pub priority: f32,
    /// Visibility mode.
    pub visibility: Visibility,
    /// Predicates gating a `Conditional` entry. All must hold.
    #[serde(default)]
    pub conditions: Vec<LayoutCondition>,
    /// Grid-span hint.
    pub span: GridSpan,
    /// Tie-break index; `None` sorts after every explicit order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// The component table consulted by every layout pass.
#[derive(Debug, Clone)]
pub struct ComponentRegistry {
    components: Vec<DashboardComponent>,
}

impl ComponentRegistry {
    /// Build a registry from an explicit table. Used by tests and
    /// embedders with custom dashboards.
    pub fn new(components: Vec<DashboardComponent>) -> Self {
        Self { components }
    }

    /// All entries, in table order.
    pub fn components(&self) -> &[DashboardComponent] {
        &self.components
    }

    /// The production dashboard table.
    pub fn standard() -> Self {
        Self::new(vec![
            DashboardComponent {
                id: ComponentId::WelcomeChecklist,
                priority: 10.0,
                visibility: Visibility::Conditional,
                conditions: vec![LayoutCondition::Stage {
                    op: StageOp::Includes(vec![
                        JourneyStage::Discovery,
                        JourneyStage::Foundation,
                    ]),
                }],
                span: GridSpan::Full,
                order: Some(1),
            },
            DashboardComponent {
                id: ComponentId::TodayTasks,
                priority: 9.0,
                visibility: Visibility::Always,
                conditions: Vec::new(),
                span: GridSpan::Medium,
                order: Some(2),
            },
            DashboardComponent {
                id: ComponentId::StreakTracker,
                priority: 8.0,
                visibility: Visibility::Always,
                conditions: Vec::new(),
                span: GridSpan::Small,
                order: Some(3),
            },
            DashboardComponent {
                id: ComponentId::ContentCalendar,
                priority: 7.0,
                visibility: Visibility::Conditional,
                conditions: vec![LayoutCondition::Progress {
                    field: StatField::TasksCompleted,
                    op: CompareOp::Greater,
                    value: 5,
                }],
                span: GridSpan::Large,
                order: Some(4),
            },
            DashboardComponent {
                id: ComponentId::TemplateLibrary,
                priority: 6.0,
                visibility: Visibility::Conditional,
                conditions: vec![LayoutCondition::Stage {
                    op: StageOp::Excludes(vec![JourneyStage::Discovery]),
                }],
                span: GridSpan::Medium,
                order: Some(5),
            },
            DashboardComponent {
                id: ComponentId::PerformanceInsights,
                priority: 7.0,
                visibility: Visibility::Conditional,
                conditions: vec![
                    LayoutCondition::Stage {
                        op: StageOp::Includes(vec![
                            JourneyStage::Growth,
                            JourneyStage::Scale,
                            JourneyStage::Mastery,
                        ]),
                    },
                    LayoutCondition::Progress {
                        field: StatField::TasksCompleted,
                        op: CompareOp::Greater,
                        value: 50,
                    },
                ],
                span: GridSpan::Large,
                order: Some(6),
            },
            DashboardComponent {
                id: ComponentId::AchievementShowcase,
                priority: 5.0,
                visibility: Visibility::Conditional,
                conditions: vec![LayoutCondition::Time {
                    op: CompareOp::Greater,
                    days: 7,
                }],
                span: GridSpan::Small,
                order: Some(7),
            },
            DashboardComponent {
                id: ComponentId::CommunitySpotlight,
                priority: 4.0,
                visibility: Visibility::Conditional,
                conditions: vec![LayoutCondition::Feature {
                    name: "community".to_string(),
                    present: true,
                }],
                span: GridSpan::Medium,
                order: Some(8),
            },
            DashboardComponent {
                id: ComponentId::UpgradePrompt,
                priority: 3.0,
                visibility: Visibility::Conditional,
                conditions: vec![
                    LayoutCondition::Stage {
                        op: StageOp::Includes(vec![JourneyStage::Growth, JourneyStage::Scale]),
                    },
                    LayoutCondition::Interaction {
                        kind: InteractionKind::Dismiss,
                        op: CompareOp::Less,
                        count: 3,
                    },
                ],
                span: GridSpan::Small,
                order: Some(9),
            },
            // Staged behind a rollout; flips to Conditional when the coach
            // ships.
            DashboardComponent {
                id: ComponentId::AiCoach,
                priority: 6.0,
                visibility: Visibility::Hidden,
                conditions: Vec::new(),
                span: GridSpan::Medium,
                order: Some(10),
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_ids_are_unique() {
        let registry = ComponentRegistry::standard();
        let mut seen = std::collections::HashSet::new();
        for component in registry.components() {
            assert!(seen.insert(component.id), "duplicate id {:?}", component.id);
        }
    }

    #[test]
    fn test_conditional_entries_carry_conditions() {
        let registry = ComponentRegistry::standard();
        for component in registry.components() {
            if component.visibility == Visibility::Conditional {
                assert!(
                    !component.conditions.is_empty(),
                    "{:?} is conditional but lists no conditions",
                    component.id
                );
            }
        }
    }

    #[test]
    fn test_component_id_round_trips_through_strings() {
        let registry = ComponentRegistry::standard();
        for component in registry.components() {
            assert_eq!(
                ComponentId::parse(component.id.as_str()),
                Some(component.id)
            );
        }
        assert_eq!(ComponentId::parse("mystery_widget"), None);
    }
}
