// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Mock insight generator for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::generator::{Insight, InsightError, InsightGenerator, InsightRequest};

/// Test double that returns a canned insight or a canned error, and counts
/// calls.
pub struct MockInsights {
    response: Mutex<Result<Insight, String>>,
    calls: AtomicUsize,
}

impl MockInsights {
    /// Always succeed with the given insight.
    pub fn succeeding(insight: Insight) -> Self {
        Self {
            response: Mutex::new(Ok(insight)),
            calls: AtomicUsize::new(0),
        }
    }

    /// Always fail with an unavailable error.
    pub fn failing(reason: &str) -> Self {
        Self {
            response: Mutex::new(Err(reason.to_string())),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls observed.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl InsightGenerator for MockInsights {
    fn id(&self) -> &str {
        "mock"
    }

    async fn generate(&self, _request: InsightRequest) -> Result<Insight, InsightError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &*self.response.lock().expect("mock lock poisoned") {
            Ok(insight) => Ok(insight.clone()),
            Err(reason) => Err(InsightError::Unavailable(reason.clone())),
        }
    }
}
