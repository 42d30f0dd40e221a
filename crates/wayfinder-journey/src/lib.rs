// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wayfinder Journey - Stage Classification and Guidance Rules
//!
//! This crate is the pure core of the guidance engine. It defines the
//! read-only [`UserContext`] snapshot and the rule tables that derive a
//! creator's lifecycle stage, coaching focus, next steps, and
//! recommendations from it.
//!
//! Everything here is a total, side-effect-free function over the snapshot
//! plus static tables: no I/O, no clocks (the evaluation instant travels
//! inside the snapshot), no hidden state. Persistence of derived values is
//! the caller's concern.
//!
//! | Operation | Input | Output |
//! |-----------|-------|--------|
//! | [`classify`] | `&UserContext` | [`JourneyStage`] |
//! | [`focus_for`] | stage + context | [`Focus`] |
//! | [`derive_challenges`] | `&UserContext` | challenge tag set |
//! | [`next_steps`] | context + stage + focus | ordered `Vec<NextStep>` |
//! | [`recommendations`] | context + stage | ordered `Vec<Recommendation>` |

pub mod challenges;
pub mod context;
pub mod stage;
pub mod steps;

pub use challenges::derive_challenges;
pub use context::{
    Achievement, Challenge, CreatorStats, PlanTier, Platform, Profile, RecentTask, UserContext,
};
pub use stage::{Focus, JourneyStage, classify, focus_for};
pub use steps::{NextStep, Priority, Recommendation, next_steps, recommendations};
