// ABOUTME: Integration tests for environment-driven server configuration
// ABOUTME: Serialized because each test mutates process environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use forecast_intelligence::ScalerSelection;
use pierre_weight_forecast::config::{Environment, ServerConfig};
use serial_test::serial;
use std::env;
use std::path::Path;

const VARIABLES: &[&str] = &[
    "HTTP_PORT",
    "HTTP_HOST",
    "ENVIRONMENT",
    "FORECAST_MODEL_PATH",
    "FORECAST_TRANSFORMS_PATH",
    "FORECAST_SCALER_MODE",
    "FORECAST_RANDOM_SEED",
];

fn clear_env() {
    for key in VARIABLES {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8000);
    assert_eq!(config.bind_addr().to_string(), "0.0.0.0:8000");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.forecast.scaler_mode, ScalerSelection::LegacyBmi);
    assert_eq!(
        config.forecast.model_path,
        Path::new("artifacts/forecast_model.json")
    );
    assert!(config.forecast.random_seed.is_none());
}

#[test]
#[serial]
fn test_environment_overrides() {
    clear_env();
    env::set_var("HTTP_PORT", "9100");
    env::set_var("HTTP_HOST", "127.0.0.1");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("FORECAST_MODEL_PATH", "/srv/models/dense.json");
    env::set_var("FORECAST_SCALER_MODE", "per_feature");
    env::set_var("FORECAST_RANDOM_SEED", "1234");

    let config = ServerConfig::from_env().unwrap();
    clear_env();

    assert_eq!(config.bind_addr().to_string(), "127.0.0.1:9100");
    assert!(config.environment.is_production());
    assert_eq!(config.forecast.model_path, Path::new("/srv/models/dense.json"));
    assert_eq!(config.forecast.scaler_mode, ScalerSelection::PerFeature);
    assert_eq!(config.forecast.random_seed, Some(1234));
    assert!(config.summary().contains("seeded (1234)"));
}

#[test]
#[serial]
fn test_invalid_values_rejected() {
    clear_env();
    env::set_var("FORECAST_SCALER_MODE", "zscore");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("HTTP_PORT", "not-a-port");
    assert!(ServerConfig::from_env().is_err());

    clear_env();
    env::set_var("FORECAST_RANDOM_SEED", "-5");
    assert!(ServerConfig::from_env().is_err());
    clear_env();
}
