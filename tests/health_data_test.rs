// ABOUTME: Integration tests for health-data aggregation
// ABOUTME: Covers zero-filled partial failure, last-snapshot-wins persistence, and the handshake
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use chrono::NaiveDate;
use common::{create_harness, create_signed_in_harness};
use pulsetrack::constants::tables;
use pulsetrack::gateway::memory::Op;
use pulsetrack::gateway::DataGateway;
use pulsetrack::health::synthetic::{Category, SyntheticDay};
use pulsetrack::stores::HealthDataStore;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn active_day() -> SyntheticDay {
    SyntheticDay {
        steps: 12_340,
        hr_average: 62,
        hr_max: 158,
        hr_min: 47,
        sleep_total: 440,
        sleep_deep: 90,
        sleep_light: 260,
        sleep_rem: 90,
    }
}

#[tokio::test]
async fn test_fetch_aggregates_all_categories() {
    let (harness, _user) = create_signed_in_harness().await;
    let day = date(2025, 3, 10);
    harness.health.seed_day(day, active_day());
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    let snapshot = store.fetch_health_data(day).await;

    assert_eq!(snapshot.steps, 12_340);
    assert_eq!(snapshot.heart_rate.average, 62);
    assert_eq!(snapshot.sleep.total_minutes, 440);
    assert_eq!(snapshot.source, "synthetic");
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_failed_category_is_zero_filled_not_fatal() {
    let (harness, _user) = create_signed_in_harness().await;
    let day = date(2025, 3, 10);
    harness.health.seed_day(day, active_day());
    harness.health.fail_category(Category::HeartRate);
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    let snapshot = store.fetch_health_data(day).await;

    // Heart rate zeroed, the rest intact
    assert_eq!(snapshot.heart_rate.average, 0);
    assert_eq!(snapshot.heart_rate.max, 0);
    assert_eq!(snapshot.heart_rate.min, 0);
    assert_eq!(snapshot.steps, 12_340);
    assert_eq!(snapshot.sleep.deep_minutes, 90);
}

#[tokio::test]
async fn test_second_fetch_overwrites_first_snapshot() {
    let (harness, user) = create_signed_in_harness().await;
    let monday = date(2025, 3, 10);
    let tuesday = date(2025, 3, 11);
    harness.health.seed_day(monday, active_day());
    harness.health.seed_day(
        tuesday,
        SyntheticDay {
            steps: 900,
            ..SyntheticDay::default()
        },
    );
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    store.fetch_health_data(monday).await;
    store.fetch_health_data(tuesday).await;

    // Conflict key is the user only: a single row survives, the latest one
    let stored = harness
        .gateway
        .get_health_snapshot(user.id)
        .await
        .expect("select works")
        .expect("row exists");
    assert_eq!(stored.date, tuesday);
    assert_eq!(stored.steps, 900);
}

#[tokio::test]
async fn test_persistence_failure_is_swallowed() {
    let (harness, user) = create_signed_in_harness().await;
    let day = date(2025, 3, 10);
    harness.health.seed_day(day, active_day());
    harness.gateway.fail_on(tables::HEALTH_SNAPSHOTS, Op::Upsert);
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    let snapshot = store.fetch_health_data(day).await;

    // The caller still gets the aggregate; only the write was lost
    assert_eq!(snapshot.steps, 12_340);
    assert_eq!(store.latest().await, Some(snapshot));
    harness.gateway.clear_failures();
    let stored = harness
        .gateway
        .get_health_snapshot(user.id)
        .await
        .expect("select works");
    assert!(stored.is_none());
}

#[tokio::test]
async fn test_anonymous_fetch_skips_persistence() {
    let harness = create_harness();
    let day = date(2025, 3, 10);
    harness.health.seed_day(day, active_day());
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    let snapshot = store.fetch_health_data(day).await;

    assert_eq!(snapshot.steps, 12_340);
}

#[tokio::test]
async fn test_connection_probe_and_permission_regrant() {
    let harness = create_harness();
    let store = HealthDataStore::new(harness.auth.clone(), harness.data.clone());

    // connected() harness starts connected
    let status = store.refresh_connection().await;
    assert!(status.is_connected);
    assert!(store.is_connected());

    let outcome = store.request_permissions().await;
    assert!(outcome.success);
    assert!(store.is_connected());
}

#[tokio::test]
async fn test_denied_permissions_leave_store_disconnected() {
    let harness = create_harness();
    let provider = pulsetrack::health::SyntheticHealthProvider::new();
    provider.deny_permissions();
    let data = pulsetrack::context::DataContext::new(
        harness.gateway.clone(),
        std::sync::Arc::new(provider),
    );
    let store = HealthDataStore::new(harness.auth.clone(), data);

    let status = store.refresh_connection().await;
    assert!(!status.is_connected);

    let outcome = store.request_permissions().await;
    assert!(!outcome.success);
    assert!(!store.is_connected());
}
