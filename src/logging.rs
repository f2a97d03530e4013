// ABOUTME: Logging configuration and structured logging setup for the forecast server
// ABOUTME: Configures log levels, output formats, and noise reduction for tracing-subscriber
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging setup

use crate::config::{LogLevel, ServerConfig};
use anyhow::Result;
use forecast_core::constants::service_names;
use forecast_core::models::PredictionKind;
use serde_json::json;
use std::env;
use std::io;
use std::str::FromStr;
use tracing::{info, Level};
use tracing_subscriber::{
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Crates that are far too chatty at the application's level
const NOISE_REDUCTION: &[&str] = &["hyper=warn", "hyper::proto=warn", "tower_http=info"];

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: Level,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl FromStr for LogFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        })
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::WEIGHT_FORECAST_SERVER.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level =
            LogLevel::from_str_or_default(&env::var("LOG_LEVEL").unwrap_or_default())
                .to_tracing_level();

        let format = env::var("LOG_FORMAT")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(LogFormat::Pretty);

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        // Production gets the detailed layout
        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: is_production || env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::WEIGHT_FORECAST_SERVER.into()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_owned()),
            environment,
        }
    }

    /// Logging configuration for a loaded server configuration
    ///
    /// The server's log level and environment take precedence over the raw
    /// environment variables read by [`LoggingConfig::from_env`].
    #[must_use]
    pub fn for_server(config: &ServerConfig) -> Self {
        let is_production = config.environment.is_production();
        let from_env = Self::from_env();

        Self {
            level: config.log_level.to_tracing_level(),
            include_location: from_env.include_location || is_production,
            include_thread: from_env.include_thread || is_production,
            include_spans: from_env.include_spans || is_production,
            environment: config.environment.to_string(),
            ..from_env
        }
    }

    /// Build the env filter: `RUST_LOG` directives when set, otherwise the
    /// configured level, with noise reduction applied on top
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::builder()
            .with_default_directive(LevelFilter::from_level(self.level).into())
            .from_env_lossy();

        for directive in NOISE_REDUCTION {
            filter = filter.add_directive(directive.parse().unwrap_or_else(|_| Level::WARN.into()));
        }

        filter
    }

    fn span_events(&self) -> FmtSpan {
        if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let registry = tracing_subscriber::registry().with(self.env_filter());

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events())
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stdout)
                    .with_span_events(self.span_events());

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(io::stdout)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    /// Log structured startup information
    fn log_startup_info(&self) {
        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Pierre weight forecast server starting up"
        );

        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level.as_str(),
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!("Logging configured: {}", config_summary);
    }
}

/// Application-specific logging utilities
pub struct AppLogger;

impl AppLogger {
    /// Log a completed forecast request
    pub fn log_prediction(
        kind: PredictionKind,
        user_id: i64,
        history_len: usize,
        success: bool,
        duration_ms: u64,
    ) {
        info!(
            prediction.kind = kind.collection(),
            user.id = user_id,
            prediction.history_len = history_len,
            prediction.success = success,
            prediction.duration_ms = duration_ms,
            "Forecast request"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!("json".parse::<LogFormat>().ok(), Some(LogFormat::Json));
        assert_eq!("COMPACT".parse::<LogFormat>().ok(), Some(LogFormat::Compact));
        assert_eq!("anything".parse::<LogFormat>().ok(), Some(LogFormat::Pretty));
    }

    #[test]
    fn test_default_service_name() {
        let config = LoggingConfig::default();
        assert_eq!(config.service_name, "pierre-forecast-server");
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn test_server_log_level_drives_filter_level() {
        let server = ServerConfig {
            log_level: LogLevel::Debug,
            environment: crate::config::Environment::Production,
            ..ServerConfig::default()
        };

        let config = LoggingConfig::for_server(&server);
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.environment, "production");
        assert!(config.include_location);
    }
}
