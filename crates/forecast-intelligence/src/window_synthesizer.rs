// ABOUTME: Normalizes an irregular observation history into the fixed seven-day model window
// ABOUTME: Pads missing trailing days with a calorie-resampled, weight-drifting random walk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Window synthesis
//!
//! The regression model consumes exactly seven days. Shorter histories are padded
//! by repeatedly copying the most recently appended day and perturbing it:
//!
//! - calories are resampled from `Normal(250, 15)`
//! - weight drifts by `Uniform[-0.1, 0.2)` kg, rounded to 2 decimals
//! - bmi is recomputed from the drifted weight and the height implied by the
//!   last real record
//!
//! Each synthesized day builds on the previous synthesized day, so the padded
//! tail is a first-order random walk with a mild upward bias.
//!
//! Draw order (relevant for scripted random sources): one normal draw per given
//! record when noise injection is on, then per synthesized day one normal draw
//! (calories) followed by one uniform draw (weight drift).

use crate::random::RandomProvider;
use forecast_core::constants::synthesis::{
    CALORIE_MEAN, CALORIE_STD_DEV, WEIGHT_DRIFT_MAX, WEIGHT_DRIFT_MIN,
};
use forecast_core::constants::window::WINDOW_DAYS;
use forecast_core::errors::{ForecastError, ForecastResult};
use forecast_core::models::{round_weight, ExerciseRecord, ObservationWindow};
use tracing::debug;

/// Pads or truncates histories to the seven-day observation window
pub struct WindowSynthesizer;

impl WindowSynthesizer {
    /// Build a seven-day window from 1..=7 chronologically ordered records
    ///
    /// With `noise_injection` set, every given record's calories are shifted by
    /// a `Normal(250, 15)` sample before padding. The input slice is never
    /// modified; perturbed records are copies. Histories longer than seven
    /// records keep their most recent seven.
    ///
    /// # Errors
    ///
    /// Returns `ForecastError::InvalidWindow` if `history` is empty or its last
    /// record has a non-positive bmi
    pub fn synthesize(
        history: &[ExerciseRecord],
        noise_injection: bool,
        random: &dyn RandomProvider,
    ) -> ForecastResult<ObservationWindow> {
        let last = history.last().ok_or_else(|| {
            ForecastError::invalid_window("exercise history must contain at least one record")
        })?;
        let height_squared = last.height_squared()?;

        let start = history.len().saturating_sub(WINDOW_DAYS);
        if start > 0 {
            debug!(
                dropped = start,
                "History longer than the observation window, keeping most recent days"
            );
        }

        let mut records: Vec<ExerciseRecord> = history[start..].to_vec();

        if noise_injection {
            for record in &mut records {
                record.calories += random.normal(CALORIE_MEAN, CALORIE_STD_DEV);
            }
        }

        let missing = WINDOW_DAYS - records.len();
        for _ in 0..missing {
            let previous = records[records.len() - 1];
            records.push(Self::next_day(&previous, height_squared, random));
        }

        debug!(
            given = history.len() - start,
            synthesized = missing,
            noise_injection,
            height_squared,
            "Observation window synthesized"
        );

        ObservationWindow::try_from(records)
    }

    /// Derive the following day from `previous`
    fn next_day(
        previous: &ExerciseRecord,
        height_squared: f64,
        random: &dyn RandomProvider,
    ) -> ExerciseRecord {
        let calories = random.normal(CALORIE_MEAN, CALORIE_STD_DEV);
        let drift = round_weight(random.uniform(WEIGHT_DRIFT_MIN, WEIGHT_DRIFT_MAX));
        let weight = previous.weight + drift;

        ExerciseRecord {
            calories,
            weight,
            bmi: weight / height_squared,
            ..*previous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::{ScriptedRandomProvider, ThreadRandomProvider};

    fn base_record() -> ExerciseRecord {
        ExerciseRecord {
            sex: 0,
            age: 30,
            bmi: 25.0,
            weight: 75.0,
            calories: 300.0,
        }
    }

    #[test]
    fn test_single_record_padded_to_seven() {
        let window = WindowSynthesizer::synthesize(&[base_record()], false, &ThreadRandomProvider)
            .unwrap();
        assert_eq!(window.records().len(), WINDOW_DAYS);
        assert_eq!(window.records()[0], base_record());
    }

    #[test]
    fn test_scripted_walk_is_exact() {
        let random = ScriptedRandomProvider::new(
            [0.1, -0.05, 0.2, 0.0, 0.15, -0.1],
            [240.0, 245.0, 250.0, 255.0, 260.0, 265.0],
        );
        let window = WindowSynthesizer::synthesize(&[base_record()], false, &random).unwrap();

        let weights: Vec<f64> = window.iter().map(|r| r.weight).collect();
        let expected = [75.0, 75.1, 75.05, 75.25, 75.25, 75.4, 75.3];
        for (actual, expected) in weights.iter().zip(expected) {
            assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
        }
        assert!((window.records()[1].calories - 240.0).abs() < f64::EPSILON);
        assert!((window.last().calories - 265.0).abs() < f64::EPSILON);
        assert!((window.last().bmi - 75.3 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_noise_injection_shifts_given_calories_only() {
        let history = [base_record(), base_record()];
        let random = ScriptedRandomProvider::new([], [10.0, 20.0]);
        let window = WindowSynthesizer::synthesize(&history, true, &random).unwrap();

        assert!((window.records()[0].calories - 310.0).abs() < f64::EPSILON);
        assert!((window.records()[1].calories - 320.0).abs() < f64::EPSILON);
        // Inputs are untouched copies
        assert!((history[0].calories - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_full_history_is_not_padded() {
        let history = vec![base_record(); WINDOW_DAYS];
        let random = ScriptedRandomProvider::new([], []);
        let window = WindowSynthesizer::synthesize(&history, false, &random).unwrap();
        assert_eq!(window.records().as_slice(), history.as_slice());
    }

    #[test]
    fn test_long_history_keeps_latest_seven() {
        let history: Vec<_> = (0..9)
            .map(|i| ExerciseRecord {
                weight: 70.0 + f64::from(i),
                ..base_record()
            })
            .collect();
        let window =
            WindowSynthesizer::synthesize(&history, false, &ThreadRandomProvider).unwrap();
        assert!((window.records()[0].weight - 72.0).abs() < f64::EPSILON);
        assert!((window.current_weight() - 78.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_history_rejected() {
        let result = WindowSynthesizer::synthesize(&[], true, &ThreadRandomProvider);
        assert!(matches!(result, Err(ForecastError::InvalidWindow { .. })));
    }

    #[test]
    fn test_non_positive_bmi_rejected() {
        let record = ExerciseRecord {
            bmi: 0.0,
            ..base_record()
        };
        let result = WindowSynthesizer::synthesize(&[record], false, &ThreadRandomProvider);
        assert!(matches!(result, Err(ForecastError::InvalidWindow { .. })));
    }
}
