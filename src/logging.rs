// ABOUTME: Logging configuration and structured logging setup for the client library
// ABOUTME: Configures log levels and output formats for debugging and production use
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Structured logging configuration with json/pretty/compact output

use crate::constants::{env_config, service_names};
use anyhow::Result;
use std::env;
use std::io;
use tracing::info;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Service name for structured logging
    pub service_name: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            service_name: service_names::PULSETRACK_CLIENT.into(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var(env_config::LOG_LEVEL).unwrap_or_else(|_| "info".into());

        let format = match env::var(env_config::LOG_FORMAT).as_deref() {
            Ok("json") => LogFormat::Json,
            Ok("compact") => LogFormat::Compact,
            _ => LogFormat::Pretty,
        };

        let environment =
            env::var(env_config::ENVIRONMENT).unwrap_or_else(|_| "development".into());

        Self {
            level,
            format,
            service_name: service_names::PULSETRACK_CLIENT.into(),
            environment,
        }
    }

    /// Initialize the global tracing subscriber.
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed.
    pub fn init(&self) -> Result<()> {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.clone()));

        let registry = tracing_subscriber::registry().with(env_filter);

        match self.format {
            LogFormat::Json => {
                registry
                    .with(fmt::layer().json().with_writer(io::stdout))
                    .try_init()?;
            }
            LogFormat::Pretty => {
                registry
                    .with(fmt::layer().pretty().with_writer(io::stdout))
                    .try_init()?;
            }
            LogFormat::Compact => {
                registry
                    .with(fmt::layer().compact().with_writer(io::stdout))
                    .try_init()?;
            }
        }

        info!(
            service = %self.service_name,
            environment = %self.environment,
            level = %self.level,
            "logging initialized"
        );
        Ok(())
    }
}
