// ABOUTME: Remote data gateway abstraction for the PulseTrack client
// ABOUTME: Pluggable backends: Supabase-convention REST and an in-process test double
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Remote data gateway abstraction
//!
//! The hosted backend owns every entity; this trait is the client's only
//! doorway to it. Not-found is a valid empty state and surfaces as
//! `Ok(None)`, never as an error. Backends:
//!
//! - [`RestGateway`]: table-oriented REST speaking Supabase conventions
//!   (PostgREST filters, declared-conflict-key upserts, `/functions/v1`
//!   invocation, `/auth/v1/user`)
//! - [`MemoryGateway`]: in-process double for tests, including handlers that
//!   reproduce the serverless function contracts

use async_trait::async_trait;
use chrono::NaiveDate;
use pulsetrack_core::errors::AppResult;
use pulsetrack_core::models::{
    AuthUser, Goal, GoalUpdate, HealthSnapshot, NewGoal, NewWorkout, Profile, ProfileUpdate,
    ScheduledWorkout, SportProfile, Workout,
};
use serde_json::Value;
use uuid::Uuid;

pub mod memory;
pub mod rest;

pub use memory::MemoryGateway;
pub use rest::RestGateway;

/// Core gateway abstraction trait.
///
/// All backends implement this trait to give the state stores a consistent
/// interface; the stores never see wire-level concerns.
#[async_trait]
pub trait DataGateway: Send + Sync {
    // ================================
    // Auth session
    // ================================

    /// Identity of the signed-in user, `None` for anonymous sessions
    async fn current_user(&self) -> AppResult<Option<AuthUser>>;

    /// End the current session
    async fn sign_out(&self) -> AppResult<()>;

    // ================================
    // Display profiles
    // ================================

    /// Get the profile row for a user; `Ok(None)` when absent
    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>>;

    /// Insert-or-update a profile row (conflict key: id)
    async fn upsert_profile(&self, profile: &Profile) -> AppResult<()>;

    /// Partially update a profile row
    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<()>;

    // ================================
    // Sport profiles
    // ================================

    /// Get the sport profile for a user; `Ok(None)` when never saved
    async fn get_sport_profile(&self, user_id: Uuid) -> AppResult<Option<SportProfile>>;

    /// Insert-or-update the sport profile (conflict key: user id)
    async fn upsert_sport_profile(&self, user_id: Uuid, profile: &SportProfile) -> AppResult<()>;

    /// Delete the sport profile row, used to reset onboarding
    async fn delete_sport_profile(&self, user_id: Uuid) -> AppResult<()>;

    // ================================
    // Goals
    // ================================

    /// All goals for a user, newest first
    async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>>;

    /// Create a goal and return the stored row
    async fn create_goal(&self, user_id: Uuid, goal: &NewGoal) -> AppResult<Goal>;

    /// Partially update a goal row
    async fn update_goal(&self, user_id: Uuid, goal_id: Uuid, update: &GoalUpdate)
        -> AppResult<()>;

    /// Delete a goal row
    async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<()>;

    // ================================
    // Workouts
    // ================================

    /// All workouts for a user, newest first
    async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>>;

    /// Create a workout and return the stored row
    async fn create_workout(&self, user_id: Uuid, workout: &NewWorkout) -> AppResult<Workout>;

    /// Scheduled workouts within an inclusive date range, ordered by date
    async fn list_scheduled_workouts(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>>;

    /// Mark a scheduled workout completed or not
    async fn set_scheduled_completion(
        &self,
        user_id: Uuid,
        scheduled_id: Uuid,
        completed: bool,
    ) -> AppResult<()>;

    // ================================
    // Health snapshots
    // ================================

    /// Latest health snapshot for a user; `Ok(None)` when never written
    async fn get_health_snapshot(&self, user_id: Uuid) -> AppResult<Option<HealthSnapshot>>;

    /// Insert-or-update the health snapshot.
    ///
    /// The declared conflict key is the user id only: a later write for a
    /// different date overwrites the previous date's snapshot.
    async fn upsert_health_snapshot(
        &self,
        user_id: Uuid,
        snapshot: &HealthSnapshot,
    ) -> AppResult<()>;

    // ================================
    // Serverless functions
    // ================================

    /// Invoke a serverless function with a JSON body and return its JSON
    /// response
    async fn invoke_function(&self, name: &str, body: Value) -> AppResult<Value>;
}
