// ABOUTME: Weight forecast server binary
// ABOUTME: Parses configuration and CLI overrides, initializes logging, loads artifacts, serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Pierre Weight Forecast Server Binary
//!
//! Environment variables configure the server; command-line flags override them.

use anyhow::Result;
use clap::Parser;
use pierre_weight_forecast::{config::ServerConfig, logging::LoggingConfig, server};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "pierre-forecast-server")]
#[command(about = "Pierre Weight Forecast - 30/90 day body weight forecasts over HTTP")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override the model weights artifact path
    #[arg(long)]
    model: Option<PathBuf>,

    /// Override the feature transforms artifact path
    #[arg(long)]
    transforms: Option<PathBuf>,

    /// Seed the random source for reproducible forecasts
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    fn apply(self, config: &mut ServerConfig) {
        if let Some(http_port) = self.http_port {
            config.http_port = http_port;
        }
        if let Some(model) = self.model {
            config.forecast.model_path = model;
        }
        if let Some(transforms) = self.transforms {
            config.forecast.transforms_path = transforms;
        }
        if let Some(seed) = self.seed {
            config.forecast.random_seed = Some(seed);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    args.apply(&mut config);
    config.validate()?;

    LoggingConfig::for_server(&config).init()?;

    info!("Starting Pierre weight forecast server");
    info!("{}", config.summary());

    let resources = server::build_resources(config)?;

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
