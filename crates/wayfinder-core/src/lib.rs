// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wayfinder Core - Guidance Service and Persistence
//!
//! This crate wires the pure rules engine to the outside world. One
//! [`GuidanceService`] is constructed at process start with its
//! collaborators injected and is shared by reference across requests:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Web request handlers                     │
//! │            (out of scope - assemble UserContext)          │
//! └──────────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │                     GuidanceService                       │
//! │   classify → focus → next steps → recommendations →       │
//! │   insight (LLM, fails closed to static) → write-back      │
//! └──────────────────────────────────────────────────────────┘
//!        │                                     │
//!        ▼                                     ▼
//! ┌─────────────────────┐          ┌──────────────────────────┐
//! │   JourneyStore      │          │    InsightGenerator      │
//! │ (Postgres / SQLite) │          │ (OpenAI-compatible API)  │
//! └─────────────────────┘          └──────────────────────────┘
//! ```
//!
//! Each guidance pass is a synchronous pure computation over an
//! already-materialized snapshot; the only I/O is the final write-back and
//! the insight call. There is no shared mutable state between passes.

pub mod config;
pub mod error;
pub mod migrations;
pub mod persistence;
pub mod service;

pub use config::{Config, ConfigError};
pub use error::CoreError;
pub use persistence::{JourneyStateRecord, JourneyStore, PostgresJourneyStore, SqliteJourneyStore};
pub use service::{Guidance, GuidanceService};
