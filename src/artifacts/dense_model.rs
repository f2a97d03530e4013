// ABOUTME: Dense sigmoid regression head over the flattened observation window
// ABOUTME: Implements RegressionModel from a JSON weight artifact with shape checks at load and inference
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ArtifactError;
use forecast_core::constants::forecast::HORIZON_DAYS;
use forecast_core::constants::window::{ENCODED_FEATURES, WINDOW_DAYS};
use forecast_intelligence::{EncodedWindow, ModelOutput, RegressionModel};
use serde::{Deserialize, Serialize};

/// Serialized model weights
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DenseModelArtifact {
    /// Artifact version label
    pub version: String,
    /// Input timesteps the weights were trained for
    pub timesteps: usize,
    /// Features per timestep
    pub features: usize,
    /// Output sequence length
    pub horizon: usize,
    /// One row of `timesteps * features` weights per output day
    pub weights: Vec<Vec<f64>>,
    /// One bias per output day
    pub bias: Vec<f64>,
}

/// `y[d] = sigmoid(w[d] · flatten(x) + b[d])` for each forecast day `d`
///
/// Outputs land in `(0, 1)`, the scaled weight space the weight scaler inverts.
#[derive(Debug, Clone)]
pub struct DenseForecastModel {
    name: String,
    weights: Vec<Vec<f64>>,
    bias: Vec<f64>,
}

impl DenseForecastModel {
    /// Build a model from a parsed artifact, checking every dimension
    ///
    /// # Errors
    ///
    /// Returns `ArtifactError::Shape` if the artifact does not describe a
    /// `(7, 6) -> 90` model or contains non-finite parameters
    pub fn from_artifact(artifact: DenseModelArtifact) -> Result<Self, ArtifactError> {
        if artifact.timesteps != WINDOW_DAYS || artifact.features != ENCODED_FEATURES {
            return Err(ArtifactError::shape(format!(
                "model expects input ({}, {}), pipeline produces ({WINDOW_DAYS}, {ENCODED_FEATURES})",
                artifact.timesteps, artifact.features
            )));
        }
        if artifact.horizon != HORIZON_DAYS
            || artifact.weights.len() != HORIZON_DAYS
            || artifact.bias.len() != HORIZON_DAYS
        {
            return Err(ArtifactError::shape(format!(
                "model horizon must be {HORIZON_DAYS} (declared {}, {} weight rows, {} biases)",
                artifact.horizon,
                artifact.weights.len(),
                artifact.bias.len()
            )));
        }

        let inputs = WINDOW_DAYS * ENCODED_FEATURES;
        if let Some(day) = artifact.weights.iter().position(|row| row.len() != inputs) {
            return Err(ArtifactError::shape(format!(
                "weight row {day} has {} values, expected {inputs}",
                artifact.weights[day].len()
            )));
        }

        let all_finite = artifact
            .weights
            .iter()
            .flatten()
            .chain(&artifact.bias)
            .all(|v| v.is_finite());
        if !all_finite {
            return Err(ArtifactError::shape("model parameters must be finite"));
        }

        Ok(Self {
            name: format!("dense-sigmoid@{}", artifact.version),
            weights: artifact.weights,
            bias: artifact.bias,
        })
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

impl RegressionModel for DenseForecastModel {
    fn predict(&self, input: &EncodedWindow) -> ModelOutput {
        let features = input.flatten();
        if features.len() != WINDOW_DAYS * ENCODED_FEATURES {
            return Err(format!("input has {} values", features.len()).into());
        }

        Ok(self
            .weights
            .iter()
            .zip(&self.bias)
            .map(|(row, bias)| {
                let activation = row
                    .iter()
                    .zip(&features)
                    .fold(*bias, |acc, (w, x)| w.mul_add(*x, acc));
                sigmoid(activation)
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
