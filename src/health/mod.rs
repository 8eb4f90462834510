// ABOUTME: External health capability abstraction for device step/heart-rate/sleep data
// ABOUTME: Plugin surface with a permission/connection handshake and per-category readings
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! External health capability
//!
//! The native health SDK is an external capability; this trait models its
//! surface. Readings carry a success flag plus optional fields rather than
//! erroring: a failed sub-query is an expected condition the aggregation
//! layer zero-fills, not an exceptional one.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod synthetic;

pub use synthetic::SyntheticHealthProvider;

/// Connection state reported by the capability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    /// Connected and queryable
    Connected,
    /// Not connected (no permissions, SDK absent, ...)
    Disconnected,
    /// The probe itself failed
    Error,
}

/// Result of the connection probe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionStatus {
    /// Whether the capability is connected
    pub is_connected: bool,
    /// Machine-readable state
    pub status: ConnectionState,
    /// Probe error detail, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ConnectionStatus {
    /// A connected status
    #[must_use]
    pub const fn connected() -> Self {
        Self {
            is_connected: true,
            status: ConnectionState::Connected,
            error: None,
        }
    }

    /// A disconnected status
    #[must_use]
    pub const fn disconnected() -> Self {
        Self {
            is_connected: false,
            status: ConnectionState::Disconnected,
            error: None,
        }
    }

    /// A failed probe
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            is_connected: false,
            status: ConnectionState::Error,
            error: Some(detail.into()),
        }
    }
}

/// Result of the permission handshake
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionOutcome {
    /// Whether permissions were granted
    pub success: bool,
    /// Granted permission scopes, when reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    /// Denial detail, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One day's step reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepsReading {
    /// Whether the query succeeded
    pub success: bool,
    /// Total steps for the day
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_steps: Option<u32>,
    /// Failure detail, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One day's heart-rate reading
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartRateReading {
    /// Whether the query succeeded
    pub success: bool,
    /// Average bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_heart_rate: Option<u32>,
    /// Maximum bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_heart_rate: Option<u32>,
    /// Minimum bpm
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_heart_rate: Option<u32>,
    /// Failure detail, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One night's sleep reading, in minutes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepReading {
    /// Whether the query succeeded
    pub success: bool,
    /// Total sleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_sleep_minutes: Option<u32>,
    /// Deep sleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deep_sleep_minutes: Option<u32>,
    /// Light sleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_sleep_minutes: Option<u32>,
    /// REM sleep
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rem_sleep_minutes: Option<u32>,
    /// Failure detail, when any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Abstraction over the native device health plugin.
///
/// Implementations must be interchangeable: the aggregation layer only sees
/// this trait.
#[async_trait]
pub trait HealthCapability: Send + Sync {
    /// Capability name, recorded as the snapshot source
    fn name(&self) -> &'static str;

    /// Probe the connection/permission state
    async fn check_connection(&self) -> ConnectionStatus;

    /// Run the permission handshake
    async fn request_permissions(&self) -> PermissionOutcome;

    /// Steps for one calendar date
    async fn steps(&self, date: NaiveDate) -> StepsReading;

    /// Heart-rate stats for one calendar date
    async fn heart_rate(&self, date: NaiveDate) -> HeartRateReading;

    /// Sleep stats for one calendar date
    async fn sleep(&self, date: NaiveDate) -> SleepReading;
}
