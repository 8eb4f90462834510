// ABOUTME: Health-data aggregation store over the external health capability
// ABOUTME: Three concurrent sub-queries, zero-filled on failure, persisted last-snapshot-wins
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Health-data aggregation
//!
//! `fetch_health_data` queries steps, heart rate, and sleep concurrently and
//! never partial-fails: a missing or failed category contributes zeros. The
//! combined snapshot is upserted with the user as the only conflict key, so
//! a later fetch for a different date overwrites the previous snapshot.
//! The store is "latest known state", not a time series.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;
use tracing::{error, warn};

use crate::context::{AuthContext, DataContext};
use crate::health::{ConnectionStatus, PermissionOutcome};
use pulsetrack_core::models::{HealthSnapshot, HeartRateStats, SleepStats};

/// State holder for device health data
pub struct HealthDataStore {
    auth: AuthContext,
    data: DataContext,
    connected: AtomicBool,
    loading: AtomicBool,
    latest: RwLock<Option<HealthSnapshot>>,
}

impl HealthDataStore {
    /// Create a store; call [`Self::refresh_connection`] to probe the
    /// capability
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            connected: AtomicBool::new(false),
            loading: AtomicBool::new(false),
            latest: RwLock::new(None),
        }
    }

    /// Probe the capability's connection state and remember the result
    pub async fn refresh_connection(&self) -> ConnectionStatus {
        let status = self.data.health().check_connection().await;
        self.connected.store(status.is_connected, Ordering::SeqCst);
        status
    }

    /// Run the permission handshake; a successful grant re-probes the
    /// connection
    pub async fn request_permissions(&self) -> PermissionOutcome {
        self.loading.store(true, Ordering::SeqCst);
        let outcome = self.data.health().request_permissions().await;
        if outcome.success {
            self.refresh_connection().await;
        } else {
            warn!(
                error = outcome.error.as_deref().unwrap_or("permission request failed"),
                "health permissions not granted"
            );
        }
        self.loading.store(false, Ordering::SeqCst);
        outcome
    }

    /// Fetch one day of health data.
    ///
    /// The three sub-queries run concurrently; every missing or failed
    /// category is zero-filled so the aggregation never fails wholesale.
    /// The snapshot is persisted best-effort (conflict key: user only) and
    /// returned either way.
    pub async fn fetch_health_data(&self, date: NaiveDate) -> HealthSnapshot {
        self.loading.store(true, Ordering::SeqCst);

        let capability = self.data.health();
        let (steps, heart_rate, sleep) = tokio::join!(
            capability.steps(date),
            capability.heart_rate(date),
            capability.sleep(date),
        );

        let snapshot = HealthSnapshot {
            date,
            steps: if steps.success {
                steps.total_steps.unwrap_or(0)
            } else {
                0
            },
            heart_rate: if heart_rate.success {
                HeartRateStats {
                    average: heart_rate.average_heart_rate.unwrap_or(0),
                    max: heart_rate.max_heart_rate.unwrap_or(0),
                    min: heart_rate.min_heart_rate.unwrap_or(0),
                }
            } else {
                HeartRateStats::default()
            },
            sleep: if sleep.success {
                SleepStats {
                    total_minutes: sleep.total_sleep_minutes.unwrap_or(0),
                    deep_minutes: sleep.deep_sleep_minutes.unwrap_or(0),
                    light_minutes: sleep.light_sleep_minutes.unwrap_or(0),
                    rem_minutes: sleep.rem_sleep_minutes.unwrap_or(0),
                }
            } else {
                SleepStats::default()
            },
            source: self.data.health().name().to_owned(),
        };

        *self.latest.write().await = Some(snapshot.clone());
        self.persist(&snapshot).await;

        self.loading.store(false, Ordering::SeqCst);
        snapshot
    }

    /// Best-effort persistence: failures are logged, never surfaced
    async fn persist(&self, snapshot: &HealthSnapshot) {
        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => return,
            Err(e) => {
                warn!(error = %e, "auth lookup failed storing health snapshot");
                return;
            }
        };
        if let Err(e) = self
            .data
            .gateway()
            .upsert_health_snapshot(user.id, snapshot)
            .await
        {
            error!(error = %e, user_id = %user.id, "error storing health snapshot");
        }
    }

    /// Most recently fetched snapshot, when any
    pub async fn latest(&self) -> Option<HealthSnapshot> {
        self.latest.read().await.clone()
    }

    /// Whether the capability reported itself connected at the last probe
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Whether a fetch or permission handshake is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }
}
