// ABOUTME: Pre-fitted feature transforms consumed by the encoder and the forecast engine
// ABOUTME: Min-max ranges, the four-column weight scaler (ScalerRow), and the sex one-hot encoder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Feature transform bundle
//!
//! The transforms were fitted when the model was trained and are loaded once at
//! startup. Nothing here fits or updates a transform.
//!
//! The weight scaler was fitted on four columns `[age, bmi, weight, calories]`,
//! which is why inverse-transforming a model output goes through a full
//! [`ScalerRow`] even though only the weight slot carries a value. Min-max
//! inversion is column-independent, so the zero placeholders never leak into
//! the recovered weight.

use forecast_core::constants::window::SEX_CATEGORIES;
use forecast_core::errors::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};

/// Fitted min-max range of a single column
///
/// Transform: `x' = (x - min) / (max - min)`. Values outside the fitted range
/// extrapolate linearly; nothing is clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureRange {
    /// Minimum observed during fitting
    pub min: f64,
    /// Maximum observed during fitting
    pub max: f64,
}

impl FeatureRange {
    /// Create a range from fitted bounds
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Span used for scaling; a constant column scales by 1
    fn span(&self) -> f64 {
        let span = self.max - self.min;
        if span.abs() < f64::EPSILON {
            1.0
        } else {
            span
        }
    }

    /// Map a raw value into the fitted `[0, 1]` space
    #[must_use]
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.min) / self.span()
    }

    /// Map a scaled value back to raw units
    #[must_use]
    pub fn inverse_transform(&self, scaled: f64) -> f64 {
        scaled.mul_add(self.span(), self.min)
    }

    /// Whether `value` lies inside the fitted domain
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, name: &str) -> ForecastResult<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ForecastError::encoding(format!(
                "{name} scaler range must be finite"
            )));
        }
        if self.max < self.min {
            return Err(ForecastError::encoding(format!(
                "{name} scaler max {} is below min {}",
                self.max, self.min
            )));
        }
        Ok(())
    }
}

/// One row in the column layout the weight scaler was fitted on
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScalerRow {
    /// Age slot
    pub age: f64,
    /// BMI slot
    pub bmi: f64,
    /// Weight slot
    pub weight: f64,
    /// Calories slot
    pub calories: f64,
}

impl ScalerRow {
    /// Row carrying only a weight value; the other slots are zero placeholders
    #[must_use]
    pub fn weight_only(weight: f64) -> Self {
        Self {
            weight,
            ..Self::default()
        }
    }
}

/// Min-max scaler fitted on `[age, bmi, weight, calories]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightScaler {
    /// Age column range
    pub age: FeatureRange,
    /// BMI column range
    pub bmi: FeatureRange,
    /// Weight column range
    pub weight: FeatureRange,
    /// Calories column range
    pub calories: FeatureRange,
}

impl WeightScaler {
    /// Invert every column of a scaled row
    #[must_use]
    pub fn inverse_transform(&self, row: &ScalerRow) -> ScalerRow {
        ScalerRow {
            age: self.age.inverse_transform(row.age),
            bmi: self.bmi.inverse_transform(row.bmi),
            weight: self.weight.inverse_transform(row.weight),
            calories: self.calories.inverse_transform(row.calories),
        }
    }

    /// Recover a physical weight from a scaled model output
    ///
    /// Builds a weight-only row, inverse-transforms the whole row, and keeps
    /// the weight slot.
    #[must_use]
    pub fn inverse_weight(&self, scaled: f64) -> f64 {
        self.inverse_transform(&ScalerRow::weight_only(scaled)).weight
    }

    fn validate(&self) -> ForecastResult<()> {
        self.age.validate("weight.age")?;
        self.bmi.validate("weight.bmi")?;
        self.weight.validate("weight.weight")?;
        self.calories.validate("weight.calories")
    }
}

/// One-hot encoder over the two fitted sex categories
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OneHotEncoder {
    categories: Vec<u8>,
}

impl OneHotEncoder {
    /// Create an encoder with categories in column order
    #[must_use]
    pub fn new(categories: Vec<u8>) -> Self {
        Self { categories }
    }

    /// Fitted categories in column order
    #[must_use]
    pub fn categories(&self) -> &[u8] {
        &self.categories
    }

    /// Encode a sex code into its one-hot columns
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Encoding` if the code was not seen during fitting
    pub fn encode(&self, sex: u8) -> ForecastResult<[f64; SEX_CATEGORIES]> {
        let position = self
            .categories
            .iter()
            .position(|&category| category == sex)
            .ok_or_else(|| {
                ForecastError::encoding(format!(
                    "sex category {sex} unknown to encoder (fitted on {:?})",
                    self.categories
                ))
            })?;

        let mut columns = [0.0; SEX_CATEGORIES];
        columns[position] = 1.0;
        Ok(columns)
    }

    fn validate(&self) -> ForecastResult<()> {
        let distinct = self.categories.len() == SEX_CATEGORIES
            && self.categories.first() != self.categories.last();
        if distinct {
            Ok(())
        } else {
            Err(ForecastError::encoding(format!(
                "sex encoder needs {SEX_CATEGORIES} distinct categories, got {:?}",
                self.categories
            )))
        }
    }
}

/// Every fitted transform the pipeline needs, loaded once at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureTransformBundle {
    /// Sex one-hot encoder
    #[serde(rename = "sex_categories")]
    pub sex_encoder: OneHotEncoder,
    /// BMI scaler (single column)
    pub bmi: FeatureRange,
    /// Weight scaler (four columns)
    pub weight: WeightScaler,
    /// Calories scaler (single column)
    pub calories: FeatureRange,
}

impl FeatureTransformBundle {
    /// Check the bundle is usable by the encoder and engine
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::Encoding` describing the first malformed transform
    pub fn validate(&self) -> ForecastResult<()> {
        self.sex_encoder.validate()?;
        self.bmi.validate("bmi")?;
        self.weight.validate()?;
        self.calories.validate("calories")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_scaler() -> WeightScaler {
        WeightScaler {
            age: FeatureRange::new(18.0, 80.0),
            bmi: FeatureRange::new(15.0, 40.0),
            weight: FeatureRange::new(50.0, 100.0),
            calories: FeatureRange::new(0.0, 1000.0),
        }
    }

    #[test]
    fn test_range_transform_and_extrapolation() {
        let range = FeatureRange::new(50.0, 100.0);
        assert!((range.transform(75.0) - 0.5).abs() < 1e-12);
        assert!((range.transform(125.0) - 1.5).abs() < 1e-12);
        assert!(!range.contains(125.0));
        assert!((range.inverse_transform(0.5) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_column_scales_by_one() {
        let range = FeatureRange::new(3.0, 3.0);
        assert!((range.transform(4.0) - 1.0).abs() < 1e-12);
        assert!((range.inverse_transform(1.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_inverse_weight_ignores_placeholder_slots() {
        let scaler = weight_scaler();
        let full = scaler.inverse_transform(&ScalerRow::weight_only(0.5));
        assert!((full.weight - 75.0).abs() < 1e-12);
        // Placeholders invert to each column's minimum, never touching weight
        assert!((full.age - 18.0).abs() < 1e-12);
        assert!((scaler.inverse_weight(0.5) - 75.0).abs() < 1e-12);
    }

    #[test]
    fn test_one_hot_encoding() {
        let encoder = OneHotEncoder::new(vec![0, 1]);
        assert_eq!(encoder.encode(0).unwrap(), [1.0, 0.0]);
        assert_eq!(encoder.encode(1).unwrap(), [0.0, 1.0]);
        assert!(matches!(
            encoder.encode(2),
            Err(ForecastError::Encoding { .. })
        ));
    }

    #[test]
    fn test_bundle_validation() {
        let bundle = FeatureTransformBundle {
            sex_encoder: OneHotEncoder::new(vec![1, 1]),
            bmi: FeatureRange::new(15.0, 40.0),
            weight: weight_scaler(),
            calories: FeatureRange::new(0.0, 1000.0),
        };
        assert!(bundle.validate().is_err());

        let bundle = FeatureTransformBundle {
            sex_encoder: OneHotEncoder::new(vec![0, 1]),
            calories: FeatureRange::new(10.0, f64::NAN),
            ..bundle
        };
        assert!(bundle.validate().is_err());
    }

    #[test]
    fn test_bundle_deserializes_from_artifact_layout() {
        let json = serde_json::json!({
            "sex_categories": [0, 1],
            "bmi": {"min": 15.0, "max": 40.0},
            "weight": {
                "age": {"min": 18.0, "max": 80.0},
                "bmi": {"min": 15.0, "max": 40.0},
                "weight": {"min": 50.0, "max": 100.0},
                "calories": {"min": 0.0, "max": 1000.0}
            },
            "calories": {"min": 0.0, "max": 1000.0}
        });
        let bundle: FeatureTransformBundle = serde_json::from_value(json).unwrap();
        assert!(bundle.validate().is_ok());
        assert_eq!(bundle.sex_encoder.categories(), &[0, 1]);
    }
}
