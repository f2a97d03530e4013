// ABOUTME: Main library entry point for the Pierre weight forecast server
// ABOUTME: Configuration, logging, artifact loading, prediction storage, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Pierre Weight Forecast
//!
//! HTTP service that forecasts a user's body weight 30 and 90 days ahead from
//! a short exercise history. The numeric pipeline lives in
//! `forecast-intelligence`; this crate wires it to configuration, startup
//! artifacts, persistence, and axum routes.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use pierre_weight_forecast::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Model and transform artifact loading
pub mod artifacts;

/// Environment-driven configuration
pub mod config;

/// Unified error handling re-exported from `forecast-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Shared server resources
pub mod resources;

/// `HTTP` routes
pub mod routes;

/// Server startup and graceful shutdown
pub mod server;

/// Prediction persistence
pub mod storage;
