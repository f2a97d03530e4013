// ABOUTME: Runs the regression model on an encoded window and recovers physical weights
// ABOUTME: Validates the 90-step output, inverse-scales it, and extracts the 30/90-day horizons
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::feature_encoder::EncodedWindow;
use crate::transforms::WeightScaler;
use forecast_core::constants::forecast::{DAY_30_INDEX, DAY_90_INDEX, HORIZON_DAYS};
use forecast_core::errors::{ForecastError, ForecastResult};
use forecast_core::models::{round_weight, ForecastPair};
use std::error::Error;
use tracing::{debug, warn};

/// Raw output of a regression model call
pub type ModelOutput = Result<Vec<f64>, Box<dyn Error + Send + Sync>>;

/// Pre-trained sequence regression model
///
/// Contract: one encoded window in (batch size 1, shape `(7, 6)`), one
/// sequence of 90 values out, each in the model's scaled weight space.
/// Implementations are loaded once and shared read-only across requests.
pub trait RegressionModel: Send + Sync {
    /// Forecast the next 90 days for a single window
    ///
    /// # Errors
    ///
    /// Any failure of the underlying inference call
    fn predict(&self, input: &EncodedWindow) -> ModelOutput;

    /// Model identifier for logging
    fn name(&self) -> &str;
}

/// Turns model output into horizon forecasts
pub struct ForecastEngine;

impl ForecastEngine {
    /// Run inference and return the full inverse-scaled 90-day trajectory
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::ModelInference` if the model call fails, the
    /// output length is not 90, or the output contains non-finite values
    pub fn trajectory(
        encoded: &EncodedWindow,
        model: &dyn RegressionModel,
        scaler: &WeightScaler,
    ) -> ForecastResult<Vec<f64>> {
        let raw = model.predict(encoded).map_err(|e| {
            warn!(model = model.name(), error = %e, "Regression model call failed");
            ForecastError::model_inference(format!("{}: {e}", model.name()))
        })?;

        if raw.len() != HORIZON_DAYS {
            return Err(ForecastError::model_inference(format!(
                "{} returned {} values, expected {HORIZON_DAYS}",
                model.name(),
                raw.len()
            )));
        }

        if let Some(day) = raw.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::model_inference(format!(
                "{} returned a non-finite value for day {}",
                model.name(),
                day + 1
            )));
        }

        Ok(raw.iter().map(|&v| scaler.inverse_weight(v)).collect())
    }

    /// Forecast the 30 and 90-day weights, rounded to 2 decimals
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::ModelInference` under the same conditions as
    /// [`ForecastEngine::trajectory`]; inference is never retried
    pub fn forecast(
        encoded: &EncodedWindow,
        model: &dyn RegressionModel,
        scaler: &WeightScaler,
    ) -> ForecastResult<ForecastPair> {
        let weights = Self::trajectory(encoded, model, scaler)?;
        let pair = ForecastPair {
            p30: round_weight(weights[DAY_30_INDEX]),
            p90: round_weight(weights[DAY_90_INDEX]),
        };

        debug!(
            model = model.name(),
            p30 = pair.p30,
            p90 = pair.p90,
            "Raw forecast extracted"
        );
        Ok(pair)
    }
}
