// ABOUTME: Integration test for the generation guard on entity load cycles
// ABOUTME: A stale response resolving late must not overwrite fresher state
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use common::{create_signed_in_harness, seed_profile};
use pulsetrack::stores::OnboardingGate;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::test]
async fn test_stale_response_does_not_overwrite_fresher_state() {
    let (harness, user) = create_signed_in_harness().await;
    let gate = Arc::new(OnboardingGate::new(
        harness.auth.clone(),
        harness.data.clone(),
    ));

    // First cycle: no profile row yet, and the read resolves slowly. Its
    // answer ("needs onboarding") will be stale by the time it lands.
    harness
        .gateway
        .set_select_delay(Some(Duration::from_millis(200)))
        .await;
    let slow_cycle = {
        let gate = Arc::clone(&gate);
        tokio::spawn(async move { gate.load().await })
    };
    // Let the slow cycle get its read in flight
    sleep(Duration::from_millis(30)).await;

    // Meanwhile the user finishes onboarding and a fresh cycle runs fast
    harness.gateway.set_select_delay(None).await;
    seed_profile(&harness, &user, true);
    gate.load().await;
    assert!(!gate.needs_onboarding().await);

    // The slow cycle resolves now; its generation is stale and must lose
    slow_cycle.await.expect("task completes");
    assert!(!gate.needs_onboarding().await);
    assert!(!gate.is_loading());
}

#[tokio::test]
async fn test_local_transition_invalidates_in_flight_cycle() {
    let (harness, _user) = create_signed_in_harness().await;
    let gate = Arc::new(OnboardingGate::new(
        harness.auth.clone(),
        harness.data.clone(),
    ));

    // Slow cycle would resolve to "needs onboarding" (no profile row)
    harness
        .gateway
        .set_select_delay(Some(Duration::from_millis(200)))
        .await;
    let slow_cycle = {
        let gate = Arc::clone(&gate);
        tokio::spawn(async move { gate.load().await })
    };
    sleep(Duration::from_millis(30)).await;

    // The setup flow finishes locally while the read is still in flight
    gate.complete_onboarding().await;
    assert!(!gate.needs_onboarding().await);

    slow_cycle.await.expect("task completes");
    assert!(!gate.needs_onboarding().await);
}
