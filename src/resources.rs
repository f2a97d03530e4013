// ABOUTME: Centralized resource container shared by every HTTP handler
// ABOUTME: Holds the pipeline context, prediction store, and server configuration behind Arc
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Server Resources
//!
//! Built once at startup and handed to the routers as shared state.

use crate::config::ServerConfig;
use crate::storage::PredictionStore;
use forecast_intelligence::PipelineContext;
use std::sync::Arc;

/// Shared server resources
#[derive(Clone)]
pub struct ServerResources {
    pipeline: Arc<PipelineContext>,
    store: Arc<dyn PredictionStore>,
    config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Assemble resources from already-initialized components
    #[must_use]
    pub const fn new(
        pipeline: Arc<PipelineContext>,
        store: Arc<dyn PredictionStore>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            pipeline,
            store,
            config,
        }
    }

    /// Forecast pipeline
    #[must_use]
    pub const fn pipeline(&self) -> &Arc<PipelineContext> {
        &self.pipeline
    }

    /// Prediction persistence
    #[must_use]
    pub const fn store(&self) -> &Arc<dyn PredictionStore> {
        &self.store
    }

    /// Server configuration
    #[must_use]
    pub const fn config(&self) -> &Arc<ServerConfig> {
        &self.config
    }
}
