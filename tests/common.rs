// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides common gateway, health provider, and user creation helpers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(dead_code, clippy::unwrap_used, clippy::expect_used)]

//! Shared test utilities for `pulsetrack`
//!
//! Common setup to reduce duplication across integration tests.

use std::sync::{Arc, Once};
use uuid::Uuid;

use pulsetrack::context::{AuthContext, DataContext};
use pulsetrack::gateway::MemoryGateway;
use pulsetrack::health::SyntheticHealthProvider;
use pulsetrack::models::{AuthUser, Profile};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_test_writer()
            .init();
    });
}

/// Everything a store test needs in one bundle
pub struct TestHarness {
    pub gateway: Arc<MemoryGateway>,
    pub health: Arc<SyntheticHealthProvider>,
    pub auth: AuthContext,
    pub data: DataContext,
}

/// Standard harness with an anonymous session and a connected provider
pub fn create_harness() -> TestHarness {
    init_test_logging();
    let gateway = Arc::new(MemoryGateway::new());
    let health = Arc::new(SyntheticHealthProvider::connected());
    let auth = AuthContext::new(gateway.clone());
    let data = DataContext::new(gateway.clone(), health.clone());
    TestHarness {
        gateway,
        health,
        auth,
        data,
    }
}

/// Standard harness with a signed-in user
pub async fn create_signed_in_harness() -> (TestHarness, AuthUser) {
    let harness = create_harness();
    let user = AuthUser::new(Uuid::new_v4(), Some("athlete@example.com".into()));
    harness.gateway.sign_in(user.clone()).await;
    (harness, user)
}

/// Seed a profile row for `user`, optionally marked onboarded
pub fn seed_profile(harness: &TestHarness, user: &AuthUser, onboarding_completed: bool) {
    let mut profile = Profile::new(user.id, user.email.clone());
    profile.onboarding_completed = onboarding_completed;
    harness.gateway.seed_profile(profile);
}
