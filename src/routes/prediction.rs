// ABOUTME: Weight forecast route handlers for the scheduled and extra-exercise flows
// ABOUTME: Runs the pipeline on a blocking worker, persists the result, and serves stored forecasts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Forecast routes
//!
//! - `POST /api/v1/users/:user_id/body/prediction/fast-api`: scheduled forecast
//!   from the recorded history, with calorie noise injection
//! - `POST /api/v1/users/:user_id/body/prediction/extra/fast-api`: forecast
//!   including a planned session, no noise injection
//! - `GET  /api/v1/users/:user_id/body/prediction[/extra]`: latest stored forecast

use crate::logging::AppLogger;
use crate::resources::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use forecast_core::errors::AppError;
use forecast_core::models::{CorrectedPrediction, ExerciseDetail, ExerciseRecord, PredictionKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tokio::task;
use uuid::Uuid;

/// Forecast request body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserExerciseRequest {
    /// Recorded daily history, oldest first
    pub exercise_data: Vec<ExerciseRecord>,
    /// Planned exercise session (extra flow)
    #[serde(default)]
    pub exercise_detail: Option<ExerciseDetail>,
    /// Days appended after the recorded history (extra flow)
    #[serde(default)]
    pub extra_exercise_data: Option<Vec<ExerciseRecord>>,
}

/// Published forecast as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    /// Stored record identifier
    pub id: Uuid,
    /// User the forecast belongs to
    pub user_id: i64,
    /// Current weight (kg)
    pub current: f64,
    /// Calibrated 30-day forecast (kg)
    pub p30: f64,
    /// Calibrated 90-day forecast (kg)
    pub p90: f64,
    /// Planned session, extra forecasts only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseDetail>,
    /// Creation time (UTC)
    pub created_at: DateTime<Utc>,
}

impl PredictionResponse {
    fn new(id: Uuid, prediction: CorrectedPrediction) -> Self {
        Self {
            id,
            user_id: prediction.user_id,
            current: prediction.current,
            p30: prediction.p30,
            p90: prediction.p90,
            exercise: prediction.exercise,
            created_at: prediction.created_at,
        }
    }
}

/// Inputs for one pipeline run
struct ForecastJob {
    kind: PredictionKind,
    user_id: i64,
    base: Vec<ExerciseRecord>,
    extra: Option<Vec<ExerciseRecord>>,
    exercise: Option<ExerciseDetail>,
}

impl ForecastJob {
    const fn noise_injection(&self) -> bool {
        matches!(self.kind, PredictionKind::Basic)
    }
}

/// Forecast routes
pub struct PredictionRoutes;

impl PredictionRoutes {
    /// Create all forecast routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/v1/users/:user_id/body/prediction/fast-api",
                post(Self::handle_basic_prediction),
            )
            .route(
                "/api/v1/users/:user_id/body/prediction/extra/fast-api",
                post(Self::handle_extra_prediction),
            )
            .route(
                "/api/v1/users/:user_id/body/prediction",
                get(Self::handle_latest_basic),
            )
            .route(
                "/api/v1/users/:user_id/body/prediction/extra",
                get(Self::handle_latest_extra),
            )
            .with_state(resources)
    }

    /// Handle the scheduled forecast
    async fn handle_basic_prediction(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
        payload: Result<Json<UserExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload?;
        let job = ForecastJob {
            kind: PredictionKind::Basic,
            user_id,
            base: request.exercise_data,
            extra: None,
            exercise: None,
        };
        Self::forecast_and_store(&resources, job).await
    }

    /// Handle the extra-exercise forecast
    async fn handle_extra_prediction(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
        payload: Result<Json<UserExerciseRequest>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(request) = payload?;
        let extra = request
            .extra_exercise_data
            .ok_or_else(|| AppError::missing_field("extra_exercise_data"))?;
        let exercise = request
            .exercise_detail
            .ok_or_else(|| AppError::missing_field("exercise_detail"))?;

        let job = ForecastJob {
            kind: PredictionKind::Extra,
            user_id,
            base: request.exercise_data,
            extra: Some(extra),
            exercise: Some(exercise),
        };
        Self::forecast_and_store(&resources, job).await
    }

    async fn handle_latest_basic(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::latest(&resources, PredictionKind::Basic, user_id).await
    }

    async fn handle_latest_extra(
        State(resources): State<Arc<ServerResources>>,
        Path(user_id): Path<i64>,
    ) -> Result<Response, AppError> {
        Self::latest(&resources, PredictionKind::Extra, user_id).await
    }

    /// Run the pipeline off the async executor, then persist the result
    async fn forecast_and_store(
        resources: &Arc<ServerResources>,
        job: ForecastJob,
    ) -> Result<Response, AppError> {
        let started = Instant::now();
        let kind = job.kind;
        let user_id = job.user_id;
        let history_len = job.base.len() + job.extra.as_ref().map_or(0, Vec::len);

        let pipeline = Arc::clone(resources.pipeline());
        let outcome = task::spawn_blocking(move || {
            pipeline.predict(
                job.user_id,
                &job.base,
                job.extra.as_deref(),
                job.noise_injection(),
                job.exercise,
            )
        })
        .await
        .map_err(|e| AppError::internal(format!("Forecast worker failed: {e}")))?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_prediction(kind, user_id, history_len, outcome.is_ok(), elapsed_ms);

        let stored = resources.store().save(kind, outcome?).await?;
        Ok((
            StatusCode::OK,
            Json(PredictionResponse::new(stored.id, stored.prediction)),
        )
            .into_response())
    }

    async fn latest(
        resources: &Arc<ServerResources>,
        kind: PredictionKind,
        user_id: i64,
    ) -> Result<Response, AppError> {
        let stored = resources
            .store()
            .latest(kind, user_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!(
                    "{} prediction for user {user_id}",
                    kind.collection()
                ))
            })?;

        Ok((
            StatusCode::OK,
            Json(PredictionResponse::new(stored.id, stored.prediction)),
        )
            .into_response())
    }
}
