// ABOUTME: Encodes a seven-day observation window into the model's (7, 6) input tensor
// ABOUTME: One-hot sex, raw age, and min-max scaled bmi/weight/calories with selectable scalers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::transforms::FeatureTransformBundle;
use forecast_core::constants::window::{ENCODED_FEATURES, WINDOW_DAYS};
use forecast_core::errors::{ForecastError, ForecastResult};
use forecast_core::models::{ExerciseRecord, ObservationWindow};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Which fitted scaler is applied to each numeric column
///
/// The deployed model was trained against inputs produced by `LegacyBmi`,
/// where the bmi scaler is applied to the bmi, weight, and calories columns
/// alike. Switching to `PerFeature` changes the input distribution and
/// therefore the forecast, so it is opt-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalerSelection {
    /// bmi scaler for bmi, weight, and calories (matches the trained model)
    #[default]
    LegacyBmi,
    /// bmi scaler, weight scaler's weight column, and calories scaler
    PerFeature,
}

impl ScalerSelection {
    /// Name used in configuration and logs
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::LegacyBmi => "legacy",
            Self::PerFeature => "per_feature",
        }
    }
}

impl fmt::Display for ScalerSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScalerSelection {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "legacy_bmi" => Ok(Self::LegacyBmi),
            "per_feature" | "per-feature" => Ok(Self::PerFeature),
            other => Err(ForecastError::encoding(format!(
                "Unknown scaler mode: '{other}'. Valid options: legacy, per_feature"
            ))),
        }
    }
}

/// Model input: seven rows of `[sex_0, sex_1, age, bmi, weight, calories]`
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedWindow {
    rows: [[f64; ENCODED_FEATURES]; WINDOW_DAYS],
}

impl EncodedWindow {
    /// Wrap already-encoded rows
    #[must_use]
    pub const fn from_rows(rows: [[f64; ENCODED_FEATURES]; WINDOW_DAYS]) -> Self {
        Self { rows }
    }

    /// Tensor shape `(timesteps, features)`
    #[must_use]
    pub const fn shape(&self) -> (usize, usize) {
        (WINDOW_DAYS, ENCODED_FEATURES)
    }

    /// Rows, oldest day first
    #[must_use]
    pub const fn rows(&self) -> &[[f64; ENCODED_FEATURES]; WINDOW_DAYS] {
        &self.rows
    }

    /// Row-major flattening (`timesteps * features` values)
    #[must_use]
    pub fn flatten(&self) -> Vec<f64> {
        self.rows.iter().flatten().copied().collect()
    }
}

/// Applies the feature transform bundle to observation windows
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureEncoder {
    selection: ScalerSelection,
}

impl FeatureEncoder {
    /// Create an encoder using the given scaler selection
    #[must_use]
    pub const fn new(selection: ScalerSelection) -> Self {
        Self { selection }
    }

    /// Scaler selection in effect
    #[must_use]
    pub const fn selection(&self) -> ScalerSelection {
        self.selection
    }

    /// Encode a window into the `(7, 6)` model input
    ///
    /// Values outside a scaler's fitted domain are extrapolated, not clamped.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Encoding` if a record's sex code is unknown to
    /// the bundle's encoder
    pub fn encode(
        &self,
        window: &ObservationWindow,
        bundle: &FeatureTransformBundle,
    ) -> ForecastResult<EncodedWindow> {
        let (weight_range, calories_range) = match self.selection {
            ScalerSelection::LegacyBmi => (bundle.bmi, bundle.bmi),
            ScalerSelection::PerFeature => (bundle.weight.weight, bundle.calories),
        };

        let mut rows = [[0.0; ENCODED_FEATURES]; WINDOW_DAYS];
        let mut extrapolated = 0_usize;

        for (row, record) in rows.iter_mut().zip(window.iter()) {
            let [sex_0, sex_1] = bundle.sex_encoder.encode(record.sex)?;

            extrapolated += Self::out_of_domain(record, bundle);

            *row = [
                sex_0,
                sex_1,
                f64::from(record.age),
                bundle.bmi.transform(record.bmi),
                weight_range.transform(record.weight),
                calories_range.transform(record.calories),
            ];
        }

        if extrapolated > 0 {
            warn!(
                extrapolated,
                scaler_mode = %self.selection,
                "Encoded values outside the fitted scaler domain"
            );
        }

        Ok(EncodedWindow { rows })
    }

    /// Count the record's values outside the range fitted on their own feature
    ///
    /// Legacy mode scales weight and calories with the bmi range, so those
    /// columns always land outside `[0, 1]`; only values unusual for their own
    /// feature are reported.
    fn out_of_domain(record: &ExerciseRecord, bundle: &FeatureTransformBundle) -> usize {
        usize::from(!bundle.bmi.contains(record.bmi))
            + usize::from(!bundle.weight.weight.contains(record.weight))
            + usize::from(!bundle.calories.contains(record.calories))
    }
}
