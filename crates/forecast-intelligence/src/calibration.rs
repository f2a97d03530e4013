// ABOUTME: Tiered calibration of raw model forecasts against the user's current weight
// ABOUTME: Selects a blend tier by forecast error, adds calorie-band jitter, and averages toward today
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Forecast calibration
//!
//! The model drifts, so its raw output is never published directly. The gap
//! between each raw horizon and the current weight picks a tier:
//!
//! | condition                    | blend 30d | blend 90d | jitter |
//! |------------------------------|-----------|-----------|--------|
//! | `e30 > 10` or `e90 > 15`     | 0.10      | 0.15      | yes    |
//! | `e30 > 5` or `e90 > 10`      | 0.35      | 0.40      | yes    |
//! | otherwise                    | 0.80      | 0.80      | no     |
//!
//! Large disagreement means the raw forecast is trusted less. When jitter
//! applies, the window's average calorie expenditure selects the adjustment
//! ranges: high activity biases toward loss, low activity toward gain.
//!
//! ```text
//! corrected30 = last*(1-b30) + p30*b30 + adj30
//! corrected90 = corrected30*(1-b90) + p90*b90 + adj90
//! final30     = round((last + corrected30) / 2, 2)
//! final90     = round((final30 + corrected90) / 2, 2)
//! ```

use crate::random::RandomProvider;
use forecast_core::constants::calibration::{
    HIGH_ACTIVITY_CALORIES, HIGH_ACTIVITY_JITTER, LARGE_ERROR_30, LARGE_ERROR_90,
    LARGE_ERROR_BLEND, LOW_ACTIVITY_JITTER, MODERATE_ACTIVITY_CALORIES, MODERATE_ACTIVITY_JITTER,
    MODERATE_ERROR_30, MODERATE_ERROR_90, MODERATE_ERROR_BLEND, SMALL_ERROR_BLEND,
};
use forecast_core::models::{round_weight, ForecastPair, ObservationWindow};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Calibration regime selected by forecast-vs-current error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationTier {
    /// Either horizon far from current weight
    LargeError,
    /// Either horizon moderately far from current weight
    ModerateError,
    /// Both horizons close to current weight
    SmallError,
}

impl CalibrationTier {
    /// Select the tier for the given absolute errors; first match wins
    #[must_use]
    pub fn select(error_30: f64, error_90: f64) -> Self {
        if error_30 > LARGE_ERROR_30 || error_90 > LARGE_ERROR_90 {
            Self::LargeError
        } else if error_30 > MODERATE_ERROR_30 || error_90 > MODERATE_ERROR_90 {
            Self::ModerateError
        } else {
            Self::SmallError
        }
    }

    /// Blend weights `(30d, 90d)` retained from the raw forecast
    #[must_use]
    pub const fn blend_weights(self) -> (f64, f64) {
        match self {
            Self::LargeError => LARGE_ERROR_BLEND,
            Self::ModerateError => MODERATE_ERROR_BLEND,
            Self::SmallError => SMALL_ERROR_BLEND,
        }
    }

    /// Whether calorie-band jitter is added
    #[must_use]
    pub const fn applies_jitter(self) -> bool {
        !matches!(self, Self::SmallError)
    }
}

/// Activity level derived from average daily calorie expenditure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalorieBand {
    /// At least 500 kcal per day
    High,
    /// At least 350 kcal per day
    Moderate,
    /// Below 350 kcal per day
    Low,
}

impl CalorieBand {
    /// Band for an average calorie expenditure
    #[must_use]
    pub fn from_average(average_calories: f64) -> Self {
        if average_calories >= HIGH_ACTIVITY_CALORIES {
            Self::High
        } else if average_calories >= MODERATE_ACTIVITY_CALORIES {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    /// Jitter ranges `[30d, 90d]`, each `(low, high)`
    #[must_use]
    pub const fn jitter_ranges(self) -> [(f64, f64); 2] {
        match self {
            Self::High => HIGH_ACTIVITY_JITTER,
            Self::Moderate => MODERATE_ACTIVITY_JITTER,
            Self::Low => LOW_ACTIVITY_JITTER,
        }
    }
}

/// Calibrated forecast plus the decisions that produced it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    /// Published 30-day weight
    pub p30: f64,
    /// Published 90-day weight
    pub p90: f64,
    /// Tier selected from the raw errors
    pub tier: CalibrationTier,
    /// Activity band of the window
    pub band: CalorieBand,
    /// Jitter added to the 30-day correction
    pub adjustment_30: f64,
    /// Jitter added to the 90-day correction
    pub adjustment_90: f64,
}

/// Blends raw forecasts with the current weight trend
pub struct CalibrationLayer;

impl CalibrationLayer {
    /// Calibrate a raw forecast against the window it was produced from
    ///
    /// `error_30` and `error_90` are `|current weight - raw forecast|` for each
    /// horizon. Total over valid inputs; outputs are randomized whenever the
    /// selected tier applies jitter. Jitter draws happen in 30d, 90d order.
    #[must_use]
    pub fn calibrate(
        error_30: f64,
        error_90: f64,
        window: &ObservationWindow,
        raw: ForecastPair,
        random: &dyn RandomProvider,
    ) -> CalibrationOutcome {
        let last_weight = window.current_weight();
        let average_calories = window.average_calories();

        let tier = CalibrationTier::select(error_30, error_90);
        let band = CalorieBand::from_average(average_calories);
        let (blend_30, blend_90) = tier.blend_weights();

        let (adjustment_30, adjustment_90) = if tier.applies_jitter() {
            let [(low_30, high_30), (low_90, high_90)] = band.jitter_ranges();
            (
                random.uniform(low_30, high_30),
                random.uniform(low_90, high_90),
            )
        } else {
            (0.0, 0.0)
        };

        let corrected_30 =
            last_weight * (1.0 - blend_30) + raw.p30 * blend_30 + adjustment_30;
        let corrected_90 =
            corrected_30 * (1.0 - blend_90) + raw.p90 * blend_90 + adjustment_90;

        let p30 = round_weight((last_weight + corrected_30) / 2.0);
        let p90 = round_weight((p30 + corrected_90) / 2.0);

        info!(
            tier = ?tier,
            band = ?band,
            error_30,
            error_90,
            average_calories,
            p30,
            p90,
            "Forecast calibrated"
        );

        CalibrationOutcome {
            p30,
            p90,
            tier,
            band,
            adjustment_30,
            adjustment_90,
        }
    }
}
