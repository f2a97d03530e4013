// ABOUTME: Pipeline constants organized by stage (window, synthesis, forecast, calibration)
// ABOUTME: Values match the shape and ranges the regression model was trained with
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped by the pipeline stage that consumes them.

/// Observation window shape
pub mod window {
    /// Number of daily records fed to the model
    pub const WINDOW_DAYS: usize = 7;

    /// Encoded columns per day: `[sex_0, sex_1, age, bmi, weight, calories]`
    pub const ENCODED_FEATURES: usize = 6;

    /// Number of sex categories understood by the one-hot encoder
    pub const SEX_CATEGORIES: usize = 2;
}

/// Missing-day synthesis parameters
pub mod synthesis {
    /// Mean of the daily calorie expenditure distribution (kcal)
    pub const CALORIE_MEAN: f64 = 250.0;

    /// Standard deviation of the daily calorie expenditure distribution (kcal)
    pub const CALORIE_STD_DEV: f64 = 15.0;

    /// Lower bound of the day-to-day weight drift (kg)
    pub const WEIGHT_DRIFT_MIN: f64 = -0.1;

    /// Upper bound of the day-to-day weight drift (kg)
    pub const WEIGHT_DRIFT_MAX: f64 = 0.2;
}

/// Forecast horizon extraction
pub mod forecast {
    /// Length of the model output sequence (one value per future day)
    pub const HORIZON_DAYS: usize = 90;

    /// Output index of the 30-day forecast
    pub const DAY_30_INDEX: usize = 29;

    /// Output index of the 90-day forecast
    pub const DAY_90_INDEX: usize = 89;

    /// Decimal places kept on published weights
    pub const WEIGHT_DECIMALS: i32 = 2;
}

/// Calibration tier thresholds, blend weights, and calorie bands
pub mod calibration {
    /// 30-day error (kg) above which the large-error tier applies
    pub const LARGE_ERROR_30: f64 = 10.0;
    /// 90-day error (kg) above which the large-error tier applies
    pub const LARGE_ERROR_90: f64 = 15.0;
    /// 30-day error (kg) above which the moderate-error tier applies
    pub const MODERATE_ERROR_30: f64 = 5.0;
    /// 90-day error (kg) above which the moderate-error tier applies
    pub const MODERATE_ERROR_90: f64 = 10.0;

    /// Large-error tier blend weights `(30d, 90d)`
    pub const LARGE_ERROR_BLEND: (f64, f64) = (0.10, 0.15);
    /// Moderate-error tier blend weights `(30d, 90d)`
    pub const MODERATE_ERROR_BLEND: (f64, f64) = (0.35, 0.40);
    /// Small-error tier blend weights `(30d, 90d)`
    pub const SMALL_ERROR_BLEND: (f64, f64) = (0.80, 0.80);

    /// Average calorie expenditure at or above which the high-activity band applies
    pub const HIGH_ACTIVITY_CALORIES: f64 = 500.0;
    /// Average calorie expenditure at or above which the moderate-activity band applies
    pub const MODERATE_ACTIVITY_CALORIES: f64 = 350.0;

    /// High-activity jitter ranges: 30d then 90d, each `(low, high)`
    pub const HIGH_ACTIVITY_JITTER: [(f64, f64); 2] = [(-1.5, -0.5), (-0.5, 0.0)];
    /// Moderate-activity jitter ranges: 30d then 90d, each `(low, high)`
    pub const MODERATE_ACTIVITY_JITTER: [(f64, f64); 2] = [(-0.5, 0.5), (-1.0, -0.5)];
    /// Low-activity jitter ranges: 30d then 90d, each `(low, high)`
    pub const LOW_ACTIVITY_JITTER: [(f64, f64); 2] = [(0.0, 1.0), (1.0, 2.5)];
}

/// Service identity used by logging and the root banner
pub mod service_names {
    /// Service name for structured logs
    pub const WEIGHT_FORECAST_SERVER: &str = "pierre-forecast-server";
}
