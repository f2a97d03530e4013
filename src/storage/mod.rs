// ABOUTME: Persistence port for published forecasts, one collection per prediction kind
// ABOUTME: Defines the PredictionStore trait and the StoredPrediction record
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Prediction storage
//!
//! Every successful forecast request persists exactly one record. Scheduled
//! forecasts land in the `predict_basic` collection and extra-exercise
//! forecasts in `predict_extra`.

/// `DashMap`-backed store
pub mod memory;

pub use memory::InMemoryPredictionStore;

use async_trait::async_trait;
use forecast_core::errors::AppError;
use forecast_core::models::{CorrectedPrediction, PredictionKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted prediction with its storage identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPrediction {
    /// Record identifier assigned on save
    pub id: Uuid,
    /// Collection the record belongs to
    pub kind: PredictionKind,
    /// The published prediction
    #[serde(flatten)]
    pub prediction: CorrectedPrediction,
}

/// Persistence collaborator for published predictions
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persist a prediction and return the stored record
    async fn save(
        &self,
        kind: PredictionKind,
        prediction: CorrectedPrediction,
    ) -> Result<StoredPrediction, AppError>;

    /// Most recently created prediction for a user, if any
    async fn latest(
        &self,
        kind: PredictionKind,
        user_id: i64,
    ) -> Result<Option<StoredPrediction>, AppError>;

    /// All predictions for a user, oldest first
    async fn list(
        &self,
        kind: PredictionKind,
        user_id: i64,
    ) -> Result<Vec<StoredPrediction>, AppError>;
}
