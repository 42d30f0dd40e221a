// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Configuration loading from environment variables.

/// Wayfinder configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL or SQLite connection URL
    pub database_url: String,
    /// Base URL of the OpenAI-compatible insight endpoint
    pub openai_base_url: String,
    /// API key for the insight endpoint; absent means static insights only
    pub openai_api_key: Option<String>,
    /// Model name for insight generation
    pub openai_model: String,
    /// How many historical interactions a layout pass considers
    pub interaction_window: i64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `WAYFINDER_DATABASE_URL`: PostgreSQL or SQLite connection string
    ///
    /// Optional (with defaults):
    /// - `WAYFINDER_OPENAI_BASE_URL`: insight endpoint (default: `https://api.openai.com/v1`)
    /// - `WAYFINDER_OPENAI_API_KEY`: API key (default: unset, static insights)
    /// - `WAYFINDER_OPENAI_MODEL`: model name (default: `gpt-4o-mini`)
    /// - `WAYFINDER_INTERACTION_WINDOW`: interaction history size (default: 50)
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("WAYFINDER_DATABASE_URL")
            .map_err(|_| ConfigError::Missing("WAYFINDER_DATABASE_URL"))?;

        let openai_base_url = std::env::var("WAYFINDER_OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());

        let openai_api_key = std::env::var("WAYFINDER_OPENAI_API_KEY").ok();

        let openai_model = std::env::var("WAYFINDER_OPENAI_MODEL")
            .unwrap_or_else(|_| "gpt-4o-mini".to_string());

        let interaction_window: i64 = std::env::var("WAYFINDER_INTERACTION_WINDOW")
            .unwrap_or_else(|_| "50".to_string())
            .parse()
            .map_err(|_| {
                ConfigError::Invalid("WAYFINDER_INTERACTION_WINDOW", "must be a positive integer")
            })?;
        if interaction_window <= 0 {
            return Err(ConfigError::Invalid(
                "WAYFINDER_INTERACTION_WINDOW",
                "must be a positive integer",
            ));
        }

        Ok(Self {
            database_url,
            openai_base_url,
            openai_api_key,
            openai_model,
            interaction_window,
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    /// An environment variable has an invalid value.
    #[error("invalid value for {0}: {1}")]
    Invalid(&'static str, &'static str),
}
