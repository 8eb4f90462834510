// ABOUTME: Synthetic health capability for tests and local development
// ABOUTME: Seedable per-day readings with per-category failure toggles
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Synthetic health provider
//!
//! Stands in for the native health SDK wherever one is unavailable: seeded
//! per-day readings, togglable connection/permission state, and per-category
//! failure injection for exercising the aggregation policy.

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use super::{
    ConnectionStatus, HealthCapability, HeartRateReading, PermissionOutcome, SleepReading,
    StepsReading,
};

/// Reading categories for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Step counting
    Steps,
    /// Heart-rate sampling
    HeartRate,
    /// Sleep staging
    Sleep,
}

/// One seeded day of synthetic readings
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticDay {
    /// Total steps
    pub steps: u32,
    /// Average bpm
    pub hr_average: u32,
    /// Maximum bpm
    pub hr_max: u32,
    /// Minimum bpm
    pub hr_min: u32,
    /// Total sleep minutes
    pub sleep_total: u32,
    /// Deep sleep minutes
    pub sleep_deep: u32,
    /// Light sleep minutes
    pub sleep_light: u32,
    /// REM sleep minutes
    pub sleep_rem: u32,
}

/// Synthetic health capability
pub struct SyntheticHealthProvider {
    connected: AtomicBool,
    permissions_granted: AtomicBool,
    deny_permissions: AtomicBool,
    days: DashMap<NaiveDate, SyntheticDay>,
    failing: DashSet<Category>,
}

impl Default for SyntheticHealthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntheticHealthProvider {
    /// Create a disconnected provider with no seeded data
    #[must_use]
    pub fn new() -> Self {
        Self {
            connected: AtomicBool::new(false),
            permissions_granted: AtomicBool::new(false),
            deny_permissions: AtomicBool::new(false),
            days: DashMap::new(),
            failing: DashSet::new(),
        }
    }

    /// Create a provider that is already connected with permissions granted
    #[must_use]
    pub fn connected() -> Self {
        let provider = Self::new();
        provider.connected.store(true, Ordering::SeqCst);
        provider.permissions_granted.store(true, Ordering::SeqCst);
        provider
    }

    /// Seed readings for one day
    pub fn seed_day(&self, date: NaiveDate, day: SyntheticDay) {
        self.days.insert(date, day);
    }

    /// Make one reading category fail until cleared
    pub fn fail_category(&self, category: Category) {
        self.failing.insert(category);
    }

    /// Clear all injected failures
    pub fn clear_failures(&self) {
        self.failing.clear();
    }

    /// Make the permission handshake fail
    pub fn deny_permissions(&self) {
        self.deny_permissions.store(true, Ordering::SeqCst);
    }

    fn day(&self, date: NaiveDate) -> SyntheticDay {
        self.days.get(&date).map_or_else(SyntheticDay::default, |d| *d.value())
    }
}

#[async_trait]
impl HealthCapability for SyntheticHealthProvider {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    async fn check_connection(&self) -> ConnectionStatus {
        if self.connected.load(Ordering::SeqCst) {
            ConnectionStatus::connected()
        } else {
            ConnectionStatus::disconnected()
        }
    }

    async fn request_permissions(&self) -> PermissionOutcome {
        if self.deny_permissions.load(Ordering::SeqCst) {
            return PermissionOutcome {
                success: false,
                permissions: None,
                error: Some("permission denied".into()),
            };
        }
        self.permissions_granted.store(true, Ordering::SeqCst);
        self.connected.store(true, Ordering::SeqCst);
        PermissionOutcome {
            success: true,
            permissions: Some("steps,heart_rate,sleep".into()),
            error: None,
        }
    }

    async fn steps(&self, date: NaiveDate) -> StepsReading {
        if self.failing.contains(&Category::Steps) {
            return StepsReading {
                success: false,
                total_steps: None,
                error: Some("steps unavailable".into()),
            };
        }
        StepsReading {
            success: true,
            total_steps: Some(self.day(date).steps),
            error: None,
        }
    }

    async fn heart_rate(&self, date: NaiveDate) -> HeartRateReading {
        if self.failing.contains(&Category::HeartRate) {
            return HeartRateReading {
                success: false,
                average_heart_rate: None,
                max_heart_rate: None,
                min_heart_rate: None,
                error: Some("heart rate unavailable".into()),
            };
        }
        let day = self.day(date);
        HeartRateReading {
            success: true,
            average_heart_rate: Some(day.hr_average),
            max_heart_rate: Some(day.hr_max),
            min_heart_rate: Some(day.hr_min),
            error: None,
        }
    }

    async fn sleep(&self, date: NaiveDate) -> SleepReading {
        if self.failing.contains(&Category::Sleep) {
            return SleepReading {
                success: false,
                total_sleep_minutes: None,
                deep_sleep_minutes: None,
                light_sleep_minutes: None,
                rem_sleep_minutes: None,
                error: Some("sleep unavailable".into()),
            };
        }
        let day = self.day(date);
        SleepReading {
            success: true,
            total_sleep_minutes: Some(day.sleep_total),
            deep_sleep_minutes: Some(day.sleep_deep),
            light_sleep_minutes: Some(day.sleep_light),
            rem_sleep_minutes: Some(day.sleep_rem),
            error: None,
        }
    }
}
