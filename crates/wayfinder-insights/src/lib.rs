// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Wayfinder Insights - AI Insight Collaborator
//!
//! A guidance pass ends with a short motivational message and a tip. The
//! text is sourced from a hosted LLM through the [`InsightGenerator`]
//! trait; the service layer injects an implementation and falls back to
//! [`StaticInsights`] when the call fails, so guidance never blocks on the
//! model.
//!
//! Backends:
//! - [`OpenAiInsights`] - any OpenAI-compatible chat-completions API
//! - [`StaticInsights`] - deterministic stage-keyed fallback, infallible
//! - [`MockInsights`] - canned responses for tests

pub mod generator;
pub mod mock;
pub mod openai;
pub mod prompt;
pub mod statics;

pub use generator::{Insight, InsightError, InsightGenerator, InsightRequest};
pub use mock::MockInsights;
pub use openai::OpenAiInsights;
pub use prompt::build_request;
pub use statics::StaticInsights;
