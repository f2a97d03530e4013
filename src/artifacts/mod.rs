// ABOUTME: Startup loading of the pre-trained model and fitted feature transforms
// ABOUTME: Reads JSON artifacts from disk, validates them, and builds the pipeline context
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Model and transform artifacts
//!
//! Artifacts are read exactly once, before the server starts accepting
//! requests. Any failure here aborts startup.

/// Dense regression head implementing the model contract
pub mod dense_model;

pub use dense_model::{DenseForecastModel, DenseModelArtifact};

use crate::config::ForecastConfig;
use forecast_core::errors::{AppError, ErrorCode, ForecastError};
use forecast_intelligence::{
    FeatureEncoder, FeatureTransformBundle, PipelineContext, SeededRandomProvider,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Failure to load a startup artifact
#[derive(Error, Debug)]
pub enum ArtifactError {
    /// File could not be read
    #[error("Failed to read artifact {path}")]
    Io {
        /// Artifact location
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File is not valid JSON for the expected layout
    #[error("Failed to parse artifact {path}")]
    Parse {
        /// Artifact location
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Model dimensions do not match the pipeline
    #[error("Model shape mismatch: {reason}")]
    Shape {
        /// What did not match
        reason: String,
    },

    /// Transform bundle failed validation
    #[error("Invalid feature transforms")]
    Transforms {
        /// Validation failure
        #[from]
        source: ForecastError,
    },
}

impl ArtifactError {
    /// Create a shape mismatch error
    #[must_use]
    pub fn shape(reason: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }
}

impl From<ArtifactError> for AppError {
    fn from(error: ArtifactError) -> Self {
        Self::new(ErrorCode::ConfigInvalid, error.to_string()).with_source(error)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load and validate the fitted transform bundle
///
/// # Errors
///
/// Returns an `ArtifactError` if the file is unreadable, malformed, or fails validation
pub fn load_bundle(path: &Path) -> Result<FeatureTransformBundle, ArtifactError> {
    let bundle: FeatureTransformBundle = read_json(path)?;
    bundle.validate()?;
    info!(path = %path.display(), "Feature transforms loaded");
    Ok(bundle)
}

/// Load the dense forecast model
///
/// # Errors
///
/// Returns an `ArtifactError` if the file is unreadable, malformed, or mis-shaped
pub fn load_model(path: &Path) -> Result<DenseForecastModel, ArtifactError> {
    let artifact: DenseModelArtifact = read_json(path)?;
    let version = artifact.version.clone();
    let model = DenseForecastModel::from_artifact(artifact)?;
    info!(path = %path.display(), version = %version, "Forecast model loaded");
    Ok(model)
}

/// Load both artifacts and assemble the shared pipeline context
///
/// # Errors
///
/// Returns the first `ArtifactError` encountered
pub fn load_pipeline(config: &ForecastConfig) -> Result<PipelineContext, ArtifactError> {
    let bundle = load_bundle(&config.transforms_path)?;
    let model = load_model(&config.model_path)?;

    let context = PipelineContext::new(
        Arc::new(model),
        Arc::new(bundle),
        FeatureEncoder::new(config.scaler_mode),
    );

    Ok(match config.random_seed {
        Some(seed) => {
            info!(seed, "Using seeded random source");
            context.with_random(Arc::new(SeededRandomProvider::new(seed)))
        }
        None => context,
    })
}
