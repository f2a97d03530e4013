// ABOUTME: Forecast result models: raw horizon pair and the published corrected prediction
// ABOUTME: CorrectedPrediction is handed to the persistence collaborator once per request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseDetail;
use crate::constants::forecast::WEIGHT_DECIMALS;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round a weight to the published precision (2 decimal places)
///
/// Exact ties go to the even cent, so `70.125` publishes as `70.12`.
#[must_use]
pub fn round_weight(value: f64) -> f64 {
    let factor = 10f64.powi(WEIGHT_DECIMALS);
    (value * factor).round_ties_even() / factor
}

/// Raw 30/90-day model forecast in kilograms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPair {
    /// Forecast weight 30 days ahead
    pub p30: f64,
    /// Forecast weight 90 days ahead
    pub p90: f64,
}

/// Which forecast flow produced a prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionKind {
    /// Scheduled forecast from the recorded history
    Basic,
    /// On-demand forecast including a planned extra exercise session
    Extra,
}

impl PredictionKind {
    /// Collection name used by storage backends
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Basic => "predict_basic",
            Self::Extra => "predict_extra",
        }
    }
}

/// Final calibrated prediction published for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectedPrediction {
    /// User the prediction belongs to
    pub user_id: i64,
    /// Current weight (last day of the observation window)
    pub current: f64,
    /// Calibrated 30-day forecast
    pub p30: f64,
    /// Calibrated 90-day forecast
    pub p90: f64,
    /// Planned exercise session (extra forecasts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseDetail>,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}
