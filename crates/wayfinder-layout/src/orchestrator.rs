// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Layout orchestration.
//!
//! Filters the registry by visibility and conditions, boosts priorities by
//! capped interaction counts, sorts, and picks the grid shape for the
//! device. The output is a transient view-model recomputed per request.

use serde::{Deserialize, Serialize};

use wayfinder_journey::{Focus, JourneyStage, UserContext, focus_for};

use crate::component::{ComponentId, ComponentRegistry, GridSpan, Visibility};
use crate::condition;
use crate::interaction::{self, InteractionRecord};

/// Per-interaction priority boost.
const BOOST_PER_INTERACTION: f32 = 0.5;

/// Cap on the total usage boost, so power users cannot reorder the whole
/// dashboard.
const BOOST_CAP: f32 = 3.0;

/// Tie-break index assigned to entries without an explicit order.
const ORDER_LAST: u32 = 999;

/// Requesting device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Mobile,
    Tablet,
    Desktop,
}

/// One component placed in the final layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedComponent {
    /// Component identity.
    pub id: ComponentId,
    /// Priority after the usage boost.
    pub priority: f32,
    /// Grid-span hint from the registry.
    pub span: GridSpan,
    /// CSS class for the chosen column count.
    pub css_class: &'static str,
}

/// Ordered, filtered dashboard for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    /// Components in display order.
    pub components: Vec<PlacedComponent>,
    /// Emphasis theme for the stage.
    pub emphasis: Focus,
    /// Grid column count.
    pub columns: u8,
}

/// Stateless layout engine over a fixed registry.
///
/// Constructed once at process start and shared by reference; every pass
/// is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct LayoutOrchestrator {
    registry: ComponentRegistry,
}

impl LayoutOrchestrator {
    /// Create an orchestrator over a registry.
    pub fn new(registry: ComponentRegistry) -> Self {
        Self { registry }
    }

    /// Create an orchestrator over the production registry.
    pub fn standard() -> Self {
        Self::new(ComponentRegistry::standard())
    }

    /// Compute the dashboard layout for one request.
    pub fn layout(
        &self,
        context: &UserContext,
        stage: JourneyStage,
        interactions: &[InteractionRecord],
        device: Device,
    ) -> DashboardLayout {
        let emphasis = focus_for(stage, context);

        // Visibility filter: Hidden never survives; Conditional needs every
        // condition to hold.
        let mut surviving: Vec<(&crate::component::DashboardComponent, f32)> = self
            .registry
            .components()
            .iter()
            .filter(|component| match component.visibility {
                Visibility::Always => true,
                Visibility::Hidden => false,
                Visibility::Conditional => component
                    .conditions
                    .iter()
                    .all(|cond| condition::evaluate(cond, context, stage, interactions)),
            })
            .map(|component| {
                let count = interaction::count_for_component(interactions, component.id);
                let boost = (count as f32 * BOOST_PER_INTERACTION).min(BOOST_CAP);
                (component, component.priority + boost)
            })
            .collect();

        surviving.sort_by(|(a, pa), (b, pb)| {
            pb.total_cmp(pa).then_with(|| {
                a.order
                    .unwrap_or(ORDER_LAST)
                    .cmp(&b.order.unwrap_or(ORDER_LAST))
            })
        });

        let columns = column_count(device, surviving.len());

        let components = surviving
            .into_iter()
            .map(|(component, priority)| PlacedComponent {
                id: component.id,
                priority,
                span: component.span,
                css_class: span_class(component.span, columns),
            })
            .collect();

        DashboardLayout {
            components,
            emphasis,
            columns,
        }
    }
}

/// Column count for a device and surviving-component count.
fn column_count(device: Device, component_count: usize) -> u8 {
    match device {
        Device::Mobile => 1,
        Device::Tablet => 2,
        Device::Desktop => {
            if component_count <= 4 {
                2
            } else {
                3
            }
        }
    }
}

/// Fixed span-to-CSS lookup. Reproduced verbatim from the web dashboard
/// grid, per column count.
fn span_class(span: GridSpan, columns: u8) -> &'static str {
    match (columns, span) {
        (1, _) => "col-span-1",
        (2, GridSpan::Small | GridSpan::Medium) => "col-span-1",
        (2, GridSpan::Large | GridSpan::Full) => "col-span-2",
        (_, GridSpan::Small | GridSpan::Medium) => "col-span-1",
        (_, GridSpan::Large) => "col-span-2",
        (_, GridSpan::Full) => "col-span-3",
    }
}
