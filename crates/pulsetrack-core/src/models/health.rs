// ABOUTME: Health snapshot models aggregated from the device health capability
// ABOUTME: Steps, heart-rate, and sleep stats for one calendar date
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Heart-rate statistics for one day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeartRateStats {
    /// Average heart rate in bpm
    pub average: u32,
    /// Maximum heart rate in bpm
    pub max: u32,
    /// Minimum heart rate in bpm
    pub min: u32,
}

/// Sleep statistics for one night, in minutes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepStats {
    /// Total sleep
    pub total_minutes: u32,
    /// Deep sleep
    pub deep_minutes: u32,
    /// Light sleep
    pub light_minutes: u32,
    /// REM sleep
    pub rem_minutes: u32,
}

/// Point-in-time aggregate of external health metrics for one date.
///
/// Persisted via an upsert whose conflict key is the user only, so only the
/// latest snapshot survives per user; this is not a time series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Calendar date the metrics describe
    pub date: NaiveDate,
    /// Total step count
    pub steps: u32,
    /// Heart-rate statistics
    pub heart_rate: HeartRateStats,
    /// Sleep statistics
    pub sleep: SleepStats,
    /// Capability that sourced the data
    pub source: String,
}

impl HealthSnapshot {
    /// An all-zero snapshot for the given date
    #[must_use]
    pub fn empty(date: NaiveDate, source: impl Into<String>) -> Self {
        Self {
            date,
            steps: 0,
            heart_rate: HeartRateStats::default(),
            sleep: SleepStats::default(),
            source: source.into(),
        }
    }
}
