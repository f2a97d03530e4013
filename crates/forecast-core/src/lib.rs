// ABOUTME: Core types and constants for the Pierre weight forecasting service
// ABOUTME: Foundation crate with error handling, exercise/prediction models, and pipeline constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Forecast Core
//!
//! Foundation crate providing shared types and constants for the weight forecasting
//! service. This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and the pipeline's `ForecastError`
//! - **constants**: Window, horizon, synthesis, and calibration constants
//! - **models**: Exercise records, observation windows, and prediction results

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Pipeline constants organized by stage
pub mod constants;

/// Core data models (`ExerciseRecord`, `ObservationWindow`, `CorrectedPrediction`, etc.)
pub mod models;
