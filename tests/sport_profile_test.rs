// ABOUTME: Integration tests for the sport profile store
// ABOUTME: Covers default mapping, save-as-source-of-truth, and swallowed read failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use common::{create_harness, create_signed_in_harness};
use pulsetrack::constants::tables;
use pulsetrack::gateway::memory::Op;
use pulsetrack::models::SportProfile;
use pulsetrack::stores::{sport_info, SportProfileStore};

fn swimmer_profile() -> SportProfile {
    SportProfile {
        primary_sport: "swimming".into(),
        experience_level: "beginner".into(),
        competitive_level: "club".into(),
        training_frequency: 4,
        session_duration: 90,
        current_goals: "qualify for regionals".into(),
    }
}

#[tokio::test]
async fn test_absent_row_maps_to_defaults() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = SportProfileStore::new(harness.auth.clone(), harness.data.clone());

    store.load().await;

    let profile = store.profile().await;
    assert_eq!(profile, SportProfile::default());
    assert_eq!(profile.training_frequency, 3);
    assert_eq!(profile.session_duration, 60);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_save_replaces_state_with_exact_input() {
    let (harness, user) = create_signed_in_harness().await;
    let store = SportProfileStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;

    store.save(swimmer_profile()).await.expect("save succeeds");

    // In-memory state is the exact input, no re-fetch involved
    assert_eq!(store.profile().await, swimmer_profile());

    // And the row actually landed in the remote store
    use pulsetrack::gateway::DataGateway;
    let row = harness
        .gateway
        .get_sport_profile(user.id)
        .await
        .expect("select works")
        .expect("row exists");
    assert_eq!(row, swimmer_profile());
}

#[tokio::test]
async fn test_save_requires_a_session() {
    let harness = create_harness();
    let store = SportProfileStore::new(harness.auth.clone(), harness.data.clone());

    let error = store.save(swimmer_profile()).await.expect_err("no session");
    assert_eq!(error.http_status(), 401);
}

#[tokio::test]
async fn test_read_error_leaves_prior_state_intact() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = SportProfileStore::new(harness.auth.clone(), harness.data.clone());
    store.save(swimmer_profile()).await.expect("save succeeds");

    harness.gateway.fail_on(tables::SPORT_PROFILES, Op::Select);
    store.reload().await;

    assert_eq!(store.profile().await, swimmer_profile());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_has_profile_requires_sport_and_experience() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = SportProfileStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;
    assert!(!store.has_profile().await);

    store.save(swimmer_profile()).await.expect("save succeeds");
    assert!(store.has_profile().await);

    let mut incomplete = swimmer_profile();
    incomplete.primary_sport = String::new();
    store.save(incomplete).await.expect("save succeeds");
    assert!(!store.has_profile().await);
}

#[tokio::test]
async fn test_sport_info_lookup_and_fallback() {
    let swimming = sport_info("swimming");
    assert_eq!(swimming.label, "Swimming");
    assert_eq!(swimming.icon, "🏊‍♂️");

    // Unknown codes resolve to the fallback pair instead of failing
    let archery = sport_info("archery");
    assert_eq!(archery.label, "archery");
    assert_eq!(archery.icon, "🏃‍♂️");
}
