// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Error types for wayfinder-core.

use uuid::Uuid;

/// Result type using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core errors that can occur during a guidance pass or store access.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// No persisted journey state exists for the user.
    #[error("journey state not found for user {user_id}")]
    StateNotFound {
        /// The user whose state was requested.
        user_id: Uuid,
    },

    /// Database operation failed.
    #[error("database error during {operation}: {details}")]
    Database {
        /// The operation that failed.
        operation: String,
        /// Error details.
        details: String,
    },

    /// The insight backend could not be constructed.
    #[error("insight backend initialization failed: {0}")]
    InsightInit(String),

    /// Derived guidance could not be serialized for write-back.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Schema migration failed.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<sqlx::Error> for CoreError {
    fn from(err: sqlx::Error) -> Self {
        CoreError::Database {
            operation: "query".to_string(),
            details: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let user_id = Uuid::nil();
        let err = CoreError::StateNotFound { user_id };
        assert!(err.to_string().contains(&user_id.to_string()));

        let err = CoreError::Database {
            operation: "upsert_state".to_string(),
            details: "connection reset".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "database error during upsert_state: connection reset"
        );

        let err = CoreError::InsightInit("builder error".to_string());
        assert_eq!(
            err.to_string(),
            "insight backend initialization failed: builder error"
        );
    }
}
