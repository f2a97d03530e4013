// ABOUTME: End-to-end forecast pipeline: validate, synthesize, encode, infer, calibrate
// ABOUTME: PipelineContext holds the shared model, transforms, encoder, and random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::calibration::{CalibrationLayer, CalibrationOutcome};
use crate::feature_encoder::FeatureEncoder;
use crate::forecast_engine::{ForecastEngine, RegressionModel};
use crate::random::{RandomProvider, ThreadRandomProvider};
use crate::transforms::FeatureTransformBundle;
use crate::window_synthesizer::WindowSynthesizer;
use chrono::Utc;
use forecast_core::errors::ForecastResult;
use forecast_core::models::{
    round_weight, validate_history, CorrectedPrediction, ExerciseDetail, ExerciseRecord,
    ForecastPair,
};
use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, info_span};

/// Everything one pipeline run produced, for callers that need more than the published values
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// Published prediction
    pub prediction: CorrectedPrediction,
    /// Model forecast before calibration
    pub raw: ForecastPair,
    /// Calibration decisions
    pub calibration: CalibrationOutcome,
}

/// Shared, read-only collaborators of the pipeline
///
/// Built once at startup and passed by reference to every request. Cloning is
/// cheap; all heavy state sits behind `Arc`.
#[derive(Clone)]
pub struct PipelineContext {
    model: Arc<dyn RegressionModel>,
    bundle: Arc<FeatureTransformBundle>,
    encoder: FeatureEncoder,
    random: Arc<dyn RandomProvider>,
}

impl PipelineContext {
    /// Create a context drawing randomness from the per-thread generator
    #[must_use]
    pub fn new(
        model: Arc<dyn RegressionModel>,
        bundle: Arc<FeatureTransformBundle>,
        encoder: FeatureEncoder,
    ) -> Self {
        Self {
            model,
            bundle,
            encoder,
            random: Arc::new(ThreadRandomProvider),
        }
    }

    /// Replace the random source
    #[must_use]
    pub fn with_random(mut self, random: Arc<dyn RandomProvider>) -> Self {
        self.random = random;
        self
    }

    /// Regression model
    #[must_use]
    pub fn model(&self) -> &dyn RegressionModel {
        self.model.as_ref()
    }

    /// Fitted transforms
    #[must_use]
    pub fn bundle(&self) -> &FeatureTransformBundle {
        &self.bundle
    }

    /// Feature encoder
    #[must_use]
    pub const fn encoder(&self) -> &FeatureEncoder {
        &self.encoder
    }

    /// Produce a calibrated prediction for `user_id`
    ///
    /// `extra` is appended after `base` before synthesis. The scheduled path
    /// runs with `synthesize_with_noise = true`; the extra path with `false`.
    ///
    /// # Errors
    ///
    /// - `ForecastError::InvalidWindow` for an empty or malformed history
    /// - `ForecastError::Encoding` if the history does not fit the transforms
    /// - `ForecastError::ModelInference` if the model fails
    pub fn predict(
        &self,
        user_id: i64,
        base: &[ExerciseRecord],
        extra: Option<&[ExerciseRecord]>,
        synthesize_with_noise: bool,
        exercise: Option<ExerciseDetail>,
    ) -> ForecastResult<CorrectedPrediction> {
        self.run(user_id, base, extra, synthesize_with_noise, exercise)
            .map(|outcome| outcome.prediction)
    }

    /// Same as [`PipelineContext::predict`] but keeps the intermediate results
    ///
    /// # Errors
    ///
    /// See [`PipelineContext::predict`]
    pub fn run(
        &self,
        user_id: i64,
        base: &[ExerciseRecord],
        extra: Option<&[ExerciseRecord]>,
        synthesize_with_noise: bool,
        exercise: Option<ExerciseDetail>,
    ) -> ForecastResult<PipelineOutcome> {
        let span = info_span!("forecast_pipeline", user_id, noise = synthesize_with_noise);
        let _guard = span.enter();

        let history: Cow<'_, [ExerciseRecord]> = match extra {
            Some(extra) if !extra.is_empty() => Cow::Owned([base, extra].concat()),
            _ => Cow::Borrowed(base),
        };
        validate_history(&history)?;

        let window = WindowSynthesizer::synthesize(
            &history,
            synthesize_with_noise,
            self.random.as_ref(),
        )?;
        let encoded = self.encoder.encode(&window, &self.bundle)?;
        let raw = ForecastEngine::forecast(&encoded, self.model.as_ref(), &self.bundle.weight)?;

        let current = window.current_weight();
        let error_30 = (current - raw.p30).abs();
        let error_90 = (current - raw.p90).abs();
        debug!(current, error_30, error_90, "Forecast error against current weight");

        let calibration =
            CalibrationLayer::calibrate(error_30, error_90, &window, raw, self.random.as_ref());

        let prediction = CorrectedPrediction {
            user_id,
            current: round_weight(current),
            p30: calibration.p30,
            p90: calibration.p90,
            exercise,
            created_at: Utc::now(),
        };

        Ok(PipelineOutcome {
            prediction,
            raw,
            calibration,
        })
    }
}
