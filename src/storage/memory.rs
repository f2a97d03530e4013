// ABOUTME: In-memory prediction store keyed by collection and user
// ABOUTME: Uses DashMap sharded locking so concurrent handlers rarely contend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{PredictionStore, StoredPrediction};
use async_trait::async_trait;
use dashmap::DashMap;
use forecast_core::errors::AppError;
use forecast_core::models::{CorrectedPrediction, PredictionKind};
use std::collections::VecDeque;
use tracing::debug;
use uuid::Uuid;

/// Predictions kept per `(kind, user_id)` unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 90;

/// Process-local prediction store
///
/// Records live as long as the process. Each `(kind, user_id)` pair maps to
/// that user's most recent predictions in insertion order; once the history
/// limit is reached the oldest record is evicted on every save.
#[derive(Debug)]
pub struct InMemoryPredictionStore {
    collections: DashMap<(PredictionKind, i64), VecDeque<StoredPrediction>>,
    history_limit: usize,
}

impl Default for InMemoryPredictionStore {
    fn default() -> Self {
        Self::with_history_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl InMemoryPredictionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store keeping at most `limit` predictions per user and kind
    #[must_use]
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            collections: DashMap::new(),
            history_limit: limit.max(1),
        }
    }

    /// Total number of stored records in a collection
    #[must_use]
    pub fn count(&self, kind: PredictionKind) -> usize {
        self.collections
            .iter()
            .filter(|entry| entry.key().0 == kind)
            .map(|entry| entry.value().len())
            .sum()
    }
}

#[async_trait]
impl PredictionStore for InMemoryPredictionStore {
    async fn save(
        &self,
        kind: PredictionKind,
        prediction: CorrectedPrediction,
    ) -> Result<StoredPrediction, AppError> {
        let stored = StoredPrediction {
            id: Uuid::new_v4(),
            kind,
            prediction,
        };

        let mut records = self
            .collections
            .entry((kind, stored.prediction.user_id))
            .or_default();
        records.push_back(stored.clone());
        while records.len() > self.history_limit {
            records.pop_front();
        }
        drop(records);

        debug!(
            collection = kind.collection(),
            user_id = stored.prediction.user_id,
            id = %stored.id,
            "Prediction stored"
        );
        Ok(stored)
    }

    async fn latest(
        &self,
        kind: PredictionKind,
        user_id: i64,
    ) -> Result<Option<StoredPrediction>, AppError> {
        Ok(self
            .collections
            .get(&(kind, user_id))
            .and_then(|records| records.back().cloned()))
    }

    async fn list(
        &self,
        kind: PredictionKind,
        user_id: i64,
    ) -> Result<Vec<StoredPrediction>, AppError> {
        Ok(self
            .collections
            .get(&(kind, user_id))
            .map(|records| records.iter().cloned().collect())
            .unwrap_or_default())
    }
}
