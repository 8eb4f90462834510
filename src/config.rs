// ABOUTME: Environment configuration management for the PulseTrack client
// ABOUTME: Handles environment variables, deployment modes, and runtime configuration parsing
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Environment-based configuration for the client library

use crate::constants::env_config;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default operational logging
    #[default]
    Info,
    /// Verbose debugging
    Debug,
    /// Full tracing
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
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

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated testing
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
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Client configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the hosted backend (e.g. `https://xyz.supabase.co`)
    pub gateway_url: String,
    /// Publishable (anon) API key sent with every request
    pub anon_key: String,
    /// Bearer token for the signed-in session, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway URL or anon key is missing or the
    /// URL does not parse.
    pub fn from_env() -> Result<Self> {
        let gateway_url = env::var(env_config::GATEWAY_URL)
            .with_context(|| format!("{} must be set", env_config::GATEWAY_URL))?;
        let anon_key = env::var(env_config::GATEWAY_ANON_KEY)
            .with_context(|| format!("{} must be set", env_config::GATEWAY_ANON_KEY))?;
        let access_token = env::var(env_config::ACCESS_TOKEN).ok();

        let environment = Environment::from_str_or_default(
            &env::var(env_config::ENVIRONMENT).unwrap_or_default(),
        );
        let log_level =
            LogLevel::from_str_or_default(&env::var(env_config::LOG_LEVEL).unwrap_or_default());

        let config = Self {
            gateway_url,
            anon_key,
            access_token,
            environment,
            log_level,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the gateway URL is not a valid absolute URL or
    /// the anon key is blank.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.gateway_url)
            .with_context(|| format!("invalid gateway URL: {}", self.gateway_url))?;
        if self.anon_key.trim().is_empty() {
            anyhow::bail!("anon key must not be blank");
        }
        if self.access_token.is_none() && self.environment.is_production() {
            warn!("no access token configured; requests run as an anonymous session");
        }
        Ok(())
    }
}
