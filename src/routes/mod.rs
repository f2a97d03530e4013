// ABOUTME: Route module organization for the weight forecast HTTP endpoints
// ABOUTME: Assembles health and forecast routers with request tracing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Pierre weight forecast server
//!
//! Each domain module contains route definitions and thin handlers that
//! delegate to the pipeline and the prediction store.

/// Health check and service banner routes
pub mod health;
/// Weight forecast routes
pub mod prediction;

pub use health::HealthRoutes;
pub use prediction::{PredictionResponse, PredictionRoutes, UserExerciseRequest};

use crate::resources::ServerResources;
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Build the complete application router
pub fn router(resources: &Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(PredictionRoutes::routes(Arc::clone(resources)))
        .layer(TraceLayer::new_for_http())
}
