// ABOUTME: Unified error handling for the forecast server
// ABOUTME: Re-exports AppError, ErrorCode, and the pipeline error types from forecast-core
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Error types live in `forecast-core` so the pipeline crate can share them;
//! this module keeps `crate::errors` as the import path inside the server.

pub use forecast_core::errors::{
    AppError, AppResult, ErrorCode, ErrorResponse, ErrorResponseDetails, ForecastError,
    ForecastResult,
};
