// ABOUTME: Error taxonomy of the forecasting pipeline (window, encoding, inference failures)
// ABOUTME: Every variant is terminal for the request in flight and converts into AppError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{AppError, ErrorCode};
use thiserror::Error;

/// Failures raised by the forecasting pipeline.
///
/// None of these are retried internally and none fall back to a default prediction.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ForecastError {
    /// Malformed or empty observation history (caller error)
    #[error("invalid observation window: {reason}")]
    InvalidWindow {
        /// What was wrong with the history
        reason: String,
    },

    /// The feature transform bundle could not be applied to the window
    #[error("feature encoding failed: {reason}")]
    Encoding {
        /// Why the bundle did not fit the input
        reason: String,
    },

    /// The regression model failed to produce a usable forecast
    #[error("model inference failed: {reason}")]
    ModelInference {
        /// Underlying inference failure
        reason: String,
    },
}

impl ForecastError {
    /// Invalid window with the given reason
    pub fn invalid_window(reason: impl Into<String>) -> Self {
        Self::InvalidWindow {
            reason: reason.into(),
        }
    }

    /// Encoding failure with the given reason
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::Encoding {
            reason: reason.into(),
        }
    }

    /// Inference failure with the given reason
    pub fn model_inference(reason: impl Into<String>) -> Self {
        Self::ModelInference {
            reason: reason.into(),
        }
    }

    /// Error code this failure maps to at the service boundary
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidWindow { .. } => ErrorCode::InvalidInput,
            Self::Encoding { .. } => ErrorCode::ConfigInvalid,
            Self::ModelInference { .. } => ErrorCode::ModelInferenceFailed,
        }
    }
}

impl From<ForecastError> for AppError {
    fn from(error: ForecastError) -> Self {
        Self::new(error.code(), error.to_string())
    }
}

/// Result alias for pipeline operations
pub type ForecastResult<T> = Result<T, ForecastError>;
