// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! The insight-generator abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Error types for insight generation.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// Backend refused or cannot be reached.
    #[error("backend unavailable: {0}")]
    Unavailable(String),

    /// Request failed with a non-success status.
    #[error("request failed: {0}")]
    RequestFailed(String),

    /// Rate limited by the backend.
    #[error("rate limited")]
    RateLimited,

    /// Network-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The model's output could not be parsed into an [`Insight`].
    #[error("parse error: {0}")]
    Parse(String),
}

/// Request for one insight generation.
///
/// Built from the guidance pass by [`crate::build_request`]; carries the
/// rendered prompt rather than raw context so backends stay ignorant of
/// journey types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightRequest {
    /// System prompt framing the assistant's role.
    pub system: String,
    /// Rendered user prompt.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

/// Generated insight payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Short motivational message.
    pub message: String,
    /// One actionable tip.
    pub tip: String,
}

/// Injected collaborator producing the AI-sourced insight text.
///
/// Implementations must be safe to share across requests. Callers fail
/// closed to a static fallback on any error.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    /// Backend identifier for logging (e.g. model name).
    fn id(&self) -> &str;

    /// Generate an insight for the request.
    async fn generate(&self, request: InsightRequest) -> Result<Insight, InsightError>;
}

/// Parse a model's JSON output into an [`Insight`].
///
/// Accepts the exact `{"message": ..., "tip": ...}` shape. Models wrapping
/// the object in markdown fences are handled by stripping a leading/
/// trailing fence line.
pub fn parse_insight(content: &str) -> Result<Insight, InsightError> {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);

    serde_json::from_str::<Insight>(trimmed.trim()).map_err(|e| InsightError::Parse(e.to_string()))
}
