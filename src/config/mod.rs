// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven server, artifact, and pipeline configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Pierre weight forecast server
//!
//! - **Environment**: server and pipeline configuration from environment variables

/// Environment and server configuration
pub mod environment;

pub use environment::{Environment, ForecastConfig, LogLevel, ServerConfig};
