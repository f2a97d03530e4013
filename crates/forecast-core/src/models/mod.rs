// ABOUTME: Core data models for the weight forecasting pipeline
// ABOUTME: Re-exports exercise observation and prediction result types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `ExerciseRecord`: one day's observation (sex, age, bmi, weight, calories)
//! - `ObservationWindow`: exactly seven records, oldest first
//! - `ForecastPair`: raw 30/90-day model forecast
//! - `CorrectedPrediction`: the calibrated result handed to persistence

mod exercise;
mod prediction;

pub use exercise::{validate_history, ExerciseDetail, ExerciseRecord, ObservationWindow};
pub use prediction::{round_weight, CorrectedPrediction, ForecastPair, PredictionKind};
