// ABOUTME: Integration tests for the goal store
// ABOUTME: Covers CRUD mirroring, derived progress, and swallowed list failures
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

mod common;

use common::create_signed_in_harness;
use pulsetrack::constants::tables;
use pulsetrack::gateway::memory::Op;
use pulsetrack::models::NewGoal;
use pulsetrack::stores::GoalStore;

fn distance_goal(name: &str, current: f64, target: f64) -> NewGoal {
    NewGoal {
        name: name.into(),
        description: None,
        category: "endurance".into(),
        current_value: current,
        target_value: target,
        unit: "km".into(),
        target_date: None,
    }
}

#[tokio::test]
async fn test_create_and_list_goals() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;

    store
        .create(distance_goal("Swim 10k", 0.0, 10.0))
        .await
        .expect("create succeeds");
    store
        .create(distance_goal("Run 100k", 0.0, 100.0))
        .await
        .expect("create succeeds");

    let goals = store.goals().await;
    assert_eq!(goals.len(), 2);
    // Newest first
    assert_eq!(goals[0].name, "Run 100k");
}

#[tokio::test]
async fn test_progress_is_derived_and_clamped() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;

    let goal = store
        .create(distance_goal("Swim 200k", 50.0, 200.0))
        .await
        .expect("create succeeds");
    assert!((goal.progress_percent() - 25.0).abs() < f64::EPSILON);

    store
        .set_progress(goal.id, 300.0)
        .await
        .expect("update succeeds");
    let goals = store.goals().await;
    let updated = goals.iter().find(|g| g.id == goal.id).expect("goal kept");
    // Display clamps to 100% while the underlying ratio stays above 1
    assert!((updated.progress_percent() - 100.0).abs() < f64::EPSILON);
    assert!(updated.ratio() > 1.0);
}

#[tokio::test]
async fn test_completion_toggle_mirrors_locally() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;

    let goal = store
        .create(distance_goal("Swim 5k", 5.0, 5.0))
        .await
        .expect("create succeeds");
    store
        .set_completed(goal.id, true)
        .await
        .expect("update succeeds");

    assert!(store.goals().await[0].completed);
}

#[tokio::test]
async fn test_delete_removes_goal() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;

    let goal = store
        .create(distance_goal("Row 42k", 0.0, 42.0))
        .await
        .expect("create succeeds");
    store.delete(goal.id).await.expect("delete succeeds");

    assert!(store.goals().await.is_empty());
}

#[tokio::test]
async fn test_list_failure_keeps_last_known_goals() {
    let (harness, _user) = create_signed_in_harness().await;
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());
    store.load().await;
    store
        .create(distance_goal("Swim 10k", 2.0, 10.0))
        .await
        .expect("create succeeds");

    harness.gateway.fail_on(tables::GOALS, Op::Select);
    store.reload().await;

    assert_eq!(store.goals().await.len(), 1);
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_mutations_require_a_session() {
    let harness = common::create_harness();
    let store = GoalStore::new(harness.auth.clone(), harness.data.clone());

    let error = store
        .create(distance_goal("Swim 10k", 0.0, 10.0))
        .await
        .expect_err("no session");
    assert_eq!(error.http_status(), 401);
}
