// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wayfinder Layout - Dashboard Component Orchestration
//!
//! This crate turns a static component registry plus a [`UserContext`]
//! snapshot into an ordered, filtered dashboard layout:
//!
//! 1. pick the emphasis theme for the stage,
//! 2. filter components by visibility and their AND-ed conditions,
//! 3. boost priorities by capped interaction counts,
//! 4. sort descending by adjusted priority with a stable tie-break,
//! 5. pick the column count for the device and map grid spans to CSS
//!    classes.
//!
//! The registry is built once at process start and never mutated at
//! runtime; each pass only reads it. Like the journey rules, everything
//! here is pure and idempotent for identical inputs.
//!
//! [`UserContext`]: wayfinder_journey::UserContext

pub mod component;
pub mod condition;
pub mod interaction;
pub mod orchestrator;

pub use component::{ComponentId, ComponentRegistry, DashboardComponent, GridSpan, Visibility};
pub use condition::{CompareOp, LayoutCondition, StageOp, StatField, evaluate};
pub use interaction::{InteractionKind, InteractionRecord};
pub use orchestrator::{DashboardLayout, Device, LayoutOrchestrator, PlacedComponent};
