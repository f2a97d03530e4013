// ABOUTME: Environment configuration management for the forecast server
// ABOUTME: Parses HTTP bind settings, artifact locations, scaler mode, and random seed from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration

use anyhow::{Context, Result};
use forecast_intelligence::ScalerSelection;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing::info;

/// Default HTTP listen port
pub const DEFAULT_HTTP_PORT: u16 = 8000;
/// Default bind address
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
/// Default location of the model weights artifact
pub const DEFAULT_MODEL_PATH: &str = "artifacts/forecast_model.json";
/// Default location of the fitted transform bundle
pub const DEFAULT_TRANSFORMS_PATH: &str = "artifacts/feature_transforms.json";

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational (default)
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (default)
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Pipeline artifacts and runtime knobs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ForecastConfig {
    /// Model weights artifact
    pub model_path: PathBuf,
    /// Fitted transform bundle artifact
    pub transforms_path: PathBuf,
    /// Which scaler feeds the weight and calories columns
    pub scaler_mode: ScalerSelection,
    /// Seed for a reproducible random source; `None` uses the thread generator
    pub random_seed: Option<u64>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            transforms_path: PathBuf::from(DEFAULT_TRANSFORMS_PATH),
            scaler_mode: ScalerSelection::default(),
            random_seed: None,
        }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// HTTP bind address
    pub http_host: IpAddr,
    /// Log level
    pub log_level: LogLevel,
    /// Deployment environment
    pub environment: Environment,
    /// Forecast pipeline configuration
    pub forecast: ForecastConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: DEFAULT_HTTP_PORT,
            http_host: IpAddr::from([0, 0, 0, 0]),
            log_level: LogLevel::default(),
            environment: Environment::default(),
            forecast: ForecastConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let http_port = env_var_or("HTTP_PORT", &DEFAULT_HTTP_PORT.to_string())
            .parse()
            .context("Invalid HTTP_PORT value")?;
        let http_host = env_var_or("HTTP_HOST", DEFAULT_HTTP_HOST)
            .parse()
            .context("Invalid HTTP_HOST value")?;

        let scaler_mode = env_var_or("FORECAST_SCALER_MODE", ScalerSelection::default().name())
            .parse::<ScalerSelection>()
            .context("Invalid FORECAST_SCALER_MODE value")?;

        let random_seed = env::var("FORECAST_RANDOM_SEED")
            .ok()
            .map(|seed| seed.trim().parse::<u64>())
            .transpose()
            .context("Invalid FORECAST_RANDOM_SEED value")?;

        let config = Self {
            http_port,
            http_host,
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            forecast: ForecastConfig {
                model_path: PathBuf::from(env_var_or("FORECAST_MODEL_PATH", DEFAULT_MODEL_PATH)),
                transforms_path: PathBuf::from(env_var_or(
                    "FORECAST_TRANSFORMS_PATH",
                    DEFAULT_TRANSFORMS_PATH,
                )),
                scaler_mode,
                random_seed,
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if the port is zero or an artifact path is empty
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            return Err(anyhow::anyhow!("HTTP_PORT must be non-zero"));
        }
        if self.forecast.model_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("FORECAST_MODEL_PATH cannot be empty"));
        }
        if self.forecast.transforms_path.as_os_str().is_empty() {
            return Err(anyhow::anyhow!("FORECAST_TRANSFORMS_PATH cannot be empty"));
        }
        Ok(())
    }

    /// Socket address the HTTP server binds to
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Pierre Weight Forecast Configuration:\n\
             - HTTP: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - Model: {}\n\
             - Transforms: {}\n\
             - Scaler Mode: {}\n\
             - Random Source: {}",
            self.bind_addr(),
            self.environment,
            self.log_level,
            self.forecast.model_path.display(),
            self.forecast.transforms_path.display(),
            self.forecast.scaler_mode,
            self.forecast
                .random_seed
                .map_or_else(|| "thread".to_owned(), |seed| format!("seeded ({seed})")),
        )
    }
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}
