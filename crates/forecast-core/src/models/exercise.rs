// ABOUTME: Daily exercise observation models and the fixed-length observation window
// ABOUTME: ExerciseRecord, ExerciseDetail, and ObservationWindow with boundary validation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::window::WINDOW_DAYS;
use crate::errors::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};

/// One day's exercise and body-composition observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExerciseRecord {
    /// Sex category code (0 or 1)
    pub sex: u8,
    /// Age in whole years
    pub age: u32,
    /// Body mass index (kg/m²)
    pub bmi: f64,
    /// Body weight (kg)
    pub weight: f64,
    /// Calories expended during the day (kcal)
    pub calories: f64,
}

impl ExerciseRecord {
    /// Validate a record received at the service boundary
    ///
    /// `index` is the record's position in the submitted history and is echoed
    /// back in the error so callers can locate the offending entry.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidWindow` if the sex code is not 0/1, any
    /// numeric field is non-finite, or bmi/weight are not positive
    pub fn validate(&self, index: usize) -> ForecastResult<()> {
        if self.sex > 1 {
            return Err(ForecastError::invalid_window(format!(
                "record {index}: sex must be 0 or 1, got {}",
                self.sex
            )));
        }

        for (field, value) in [
            ("bmi", self.bmi),
            ("weight", self.weight),
            ("calories", self.calories),
        ] {
            if !value.is_finite() {
                return Err(ForecastError::invalid_window(format!(
                    "record {index}: {field} must be a finite number"
                )));
            }
        }

        if self.bmi <= 0.0 {
            return Err(ForecastError::invalid_window(format!(
                "record {index}: bmi must be positive, got {}",
                self.bmi
            )));
        }

        if self.weight <= 0.0 {
            return Err(ForecastError::invalid_window(format!(
                "record {index}: weight must be positive, got {}",
                self.weight
            )));
        }

        Ok(())
    }

    /// Squared height (m²) implied by this record's weight and bmi
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidWindow` when bmi is not positive
    pub fn height_squared(&self) -> ForecastResult<f64> {
        if self.bmi <= 0.0 || !self.bmi.is_finite() {
            return Err(ForecastError::invalid_window(format!(
                "cannot derive height from bmi {}",
                self.bmi
            )));
        }
        Ok(self.weight / self.bmi)
    }
}

/// Validate every record of a submitted history
///
/// # Errors
///
/// Returns `ForecastError::InvalidWindow` for an empty history or the first invalid record
pub fn validate_history(history: &[ExerciseRecord]) -> ForecastResult<()> {
    if history.is_empty() {
        return Err(ForecastError::invalid_window(
            "exercise history must contain at least one record",
        ));
    }
    history
        .iter()
        .enumerate()
        .try_for_each(|(index, record)| record.validate(index))
}

/// Exercise session attached to an "extra" forecast request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseDetail {
    /// Exercise catalog identifier
    pub exercise_id: i64,
    /// Session duration (minutes)
    pub duration: i64,
    /// Repetition count
    pub count: i64,
}

/// Exactly seven daily records, oldest first
///
/// The last record is the "current" day; its weight anchors calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationWindow {
    records: [ExerciseRecord; WINDOW_DAYS],
}

impl ObservationWindow {
    /// Build a window from a fixed array of records
    #[must_use]
    pub const fn from_records(records: [ExerciseRecord; WINDOW_DAYS]) -> Self {
        Self { records }
    }

    /// All records, oldest first
    #[must_use]
    pub const fn records(&self) -> &[ExerciseRecord; WINDOW_DAYS] {
        &self.records
    }

    /// Most recent record
    #[must_use]
    pub const fn last(&self) -> &ExerciseRecord {
        &self.records[WINDOW_DAYS - 1]
    }

    /// Weight of the most recent record (kg)
    #[must_use]
    pub const fn current_weight(&self) -> f64 {
        self.last().weight
    }

    /// Mean calorie expenditure over the window
    #[must_use]
    pub fn average_calories(&self) -> f64 {
        self.records.iter().map(|r| r.calories).sum::<f64>() / WINDOW_DAYS as f64
    }

    /// Iterate records oldest first
    pub fn iter(&self) -> impl Iterator<Item = &ExerciseRecord> {
        self.records.iter()
    }
}

impl TryFrom<Vec<ExerciseRecord>> for ObservationWindow {
    type Error = ForecastError;

    fn try_from(records: Vec<ExerciseRecord>) -> ForecastResult<Self> {
        let len = records.len();
        let records: [ExerciseRecord; WINDOW_DAYS] = records.try_into().map_err(|_| {
            ForecastError::invalid_window(format!(
                "observation window needs exactly {WINDOW_DAYS} records, got {len}"
            ))
        })?;
        Ok(Self { records })
    }
}
