// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides the service banner, liveness, and readiness endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring
//!
//! Readiness reports the loaded model, so a load balancer only routes traffic
//! once the artifacts are in memory.

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use forecast_core::constants::service_names;
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_root))
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_root() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "message": format!("{} is running", service_names::WEIGHT_FORECAST_SERVER)
        }))
    }

    async fn handle_health() -> Json<serde_json::Value> {
        Json(serde_json::json!({
            "status": "healthy",
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }

    async fn handle_ready(
        State(resources): State<Arc<ServerResources>>,
    ) -> Json<serde_json::Value> {
        let pipeline = resources.pipeline();
        Json(serde_json::json!({
            "status": "ready",
            "model": pipeline.model().name(),
            "scaler_mode": pipeline.encoder().selection().name(),
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}
