// ABOUTME: Integration tests for the onboarding gate
// ABOUTME: Covers fail-open resolution, optimistic completion, and checked reset
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use common::{create_harness, create_signed_in_harness, seed_profile};
use pulsetrack::gateway::memory::Op;
use pulsetrack::gateway::DataGateway;
use pulsetrack::models::SportProfile;
use pulsetrack::stores::OnboardingGate;

#[tokio::test]
async fn test_no_profile_row_needs_onboarding() {
    let (harness, _user) = create_signed_in_harness().await;
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    gate.load().await;

    assert!(gate.needs_onboarding().await);
    assert!(!gate.is_loading());
}

#[tokio::test]
async fn test_completed_profile_does_not_need_onboarding() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, true);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    gate.load().await;

    assert!(!gate.needs_onboarding().await);
}

#[tokio::test]
async fn test_incomplete_profile_needs_onboarding() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, false);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    gate.load().await;

    assert!(gate.needs_onboarding().await);
}

#[tokio::test]
async fn test_read_error_fails_open_toward_setup() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, true);
    harness.gateway.fail_on("profiles", Op::Select);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    gate.load().await;

    assert!(gate.needs_onboarding().await);
    assert!(!gate.is_loading());
}

#[tokio::test]
async fn test_anonymous_session_skips_fetch_and_settles() {
    let harness = create_harness();
    // A fetch would error loudly if fired; the gate must not fire one
    harness.gateway.fail_on("profiles", Op::Select);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    gate.load().await;

    assert!(!gate.is_loading());
    assert!(!gate.needs_onboarding().await);
}

#[tokio::test]
async fn test_complete_onboarding_is_local_only() {
    let (harness, _user) = create_signed_in_harness().await;
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());
    gate.load().await;
    assert!(gate.needs_onboarding().await);

    gate.complete_onboarding().await;

    assert!(!gate.needs_onboarding().await);
    // No profile row was written by the local transition
    let profile = harness
        .gateway
        .get_profile(_user.id)
        .await
        .expect("select works");
    assert!(profile.is_none());
}

#[tokio::test]
async fn test_reset_onboarding_clears_profile_and_sport_profile() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, true);
    harness.gateway.seed_sport_profile(
        user.id,
        SportProfile {
            primary_sport: "swimming".into(),
            experience_level: "advanced".into(),
            ..SportProfile::default()
        },
    );
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());
    gate.load().await;
    assert!(!gate.needs_onboarding().await);

    gate.reset_onboarding().await.expect("reset succeeds");

    assert!(gate.needs_onboarding().await);
    let profile = harness
        .gateway
        .get_profile(user.id)
        .await
        .expect("select works")
        .expect("row kept");
    assert!(!profile.onboarding_completed);
    assert!(profile.preferences.is_none());
    let sport = harness
        .gateway
        .get_sport_profile(user.id)
        .await
        .expect("select works");
    assert!(sport.is_none());
}

#[tokio::test]
async fn test_reset_onboarding_surfaces_profile_update_failure() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, true);
    harness.gateway.fail_on("profiles", Op::Update);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());
    gate.load().await;

    assert!(gate.reset_onboarding().await.is_err());
    // Gate unchanged on failure
    assert!(!gate.needs_onboarding().await);
}

#[tokio::test]
async fn test_reset_onboarding_surfaces_sport_profile_delete_failure() {
    let (harness, user) = create_signed_in_harness().await;
    seed_profile(&harness, &user, true);
    harness.gateway.fail_on("user_sport_profiles", Op::Delete);
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());
    gate.load().await;

    assert!(gate.reset_onboarding().await.is_err());
    assert!(!gate.needs_onboarding().await);
}

#[tokio::test]
async fn test_reset_onboarding_requires_a_session() {
    let harness = create_harness();
    let gate = OnboardingGate::new(harness.auth.clone(), harness.data.clone());

    let error = gate.reset_onboarding().await.expect_err("no session");
    assert_eq!(error.http_status(), 401);
}
