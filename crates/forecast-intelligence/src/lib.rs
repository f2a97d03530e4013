// ABOUTME: Weight forecasting pipeline crate for the Pierre weight forecasting service
// ABOUTME: Window synthesis, feature encoding, model inference, and tiered calibration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Forecast Intelligence
//!
//! Turns a short exercise history into calibrated 30 and 90-day weight forecasts.
//! The crate performs no I/O; the model and fitted transforms are handed in by the
//! caller and shared read-only.
//!
//! ## Stages
//!
//! 1. **`window_synthesizer`**: pad or truncate the history to seven days
//! 2. **`feature_encoder`**: one-hot and min-max encode into a `(7, 6)` tensor
//! 3. **`forecast_engine`**: run the regression model and recover physical weights
//! 4. **`calibration`**: blend the raw forecast with the current weight
//!
//! [`PipelineContext`] wires the stages together.

/// Tiered forecast calibration
pub mod calibration;
/// Observation window encoding
pub mod feature_encoder;
/// Regression model contract and horizon extraction
pub mod forecast_engine;
/// End-to-end pipeline context
pub mod pipeline;
/// Injectable random sources
pub mod random;
/// Pre-fitted feature transforms
pub mod transforms;
/// Seven-day window synthesis
pub mod window_synthesizer;

pub use calibration::{CalibrationLayer, CalibrationOutcome, CalibrationTier, CalorieBand};
pub use feature_encoder::{EncodedWindow, FeatureEncoder, ScalerSelection};
pub use forecast_engine::{ForecastEngine, ModelOutput, RegressionModel};
pub use pipeline::{PipelineContext, PipelineOutcome};
pub use random::{
    RandomProvider, ScriptedRandomProvider, SeededRandomProvider, ThreadRandomProvider,
};
pub use transforms::{FeatureRange, FeatureTransformBundle, OneHotEncoder, ScalerRow, WeightScaler};
pub use window_synthesizer::WindowSynthesizer;
