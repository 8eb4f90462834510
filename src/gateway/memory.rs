// ABOUTME: In-process gateway backend used by tests and local development
// ABOUTME: DashMap-backed tables, failure/latency injection, and serverless-contract handlers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! In-memory gateway backend
//!
//! Substitutes for the hosted backend in tests: every table lives in a
//! `DashMap`, the serverless functions are reproduced by local handlers
//! honoring their wire contracts (401 unauthenticated, AI-unconfigured
//! failure, blank-feedback rejection, best-effort question persistence), and
//! failures/latency can be injected per table and operation.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use dashmap::{DashMap, DashSet};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::warn;
use uuid::Uuid;

use crate::constants::{functions, tables};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{
    AuthUser, Goal, GoalUpdate, HealthSnapshot, NewGoal, NewWorkout, Profile, ProfileUpdate,
    ScheduledWorkout, SportProfile, Workout,
};

use super::DataGateway;

/// Gateway operation kinds for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// Table reads
    Select,
    /// Row creation
    Insert,
    /// Partial updates
    Update,
    /// Insert-or-update writes
    Upsert,
    /// Row deletion
    Delete,
    /// Serverless function invocation
    Invoke,
}

/// A Q&A row persisted by the ask-workout-question handler
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutQuestionRow {
    /// Asking user
    pub user_id: Uuid,
    /// Workout the question was about, when known
    pub workout_id: Option<Uuid>,
    /// The question text
    pub question: String,
    /// The generated answer
    pub answer: String,
    /// Sport context
    pub sport: Option<String>,
}

/// In-memory gateway backend
pub struct MemoryGateway {
    current_user: RwLock<Option<AuthUser>>,
    profiles: DashMap<Uuid, Profile>,
    sport_profiles: DashMap<Uuid, SportProfile>,
    goals: DashMap<Uuid, Goal>,
    workouts: DashMap<Uuid, Workout>,
    scheduled: DashMap<Uuid, ScheduledWorkout>,
    snapshots: DashMap<Uuid, HealthSnapshot>,
    questions: DashMap<Uuid, WorkoutQuestionRow>,
    failures: DashSet<(String, Op)>,
    select_delay: RwLock<Option<Duration>>,
    ai_configured: AtomicBool,
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGateway {
    /// Create an empty backend with an anonymous session
    #[must_use]
    pub fn new() -> Self {
        Self {
            current_user: RwLock::new(None),
            profiles: DashMap::new(),
            sport_profiles: DashMap::new(),
            goals: DashMap::new(),
            workouts: DashMap::new(),
            scheduled: DashMap::new(),
            snapshots: DashMap::new(),
            questions: DashMap::new(),
            failures: DashSet::new(),
            select_delay: RwLock::new(None),
            ai_configured: AtomicBool::new(true),
        }
    }

    /// Sign a user in
    pub async fn sign_in(&self, user: AuthUser) {
        *self.current_user.write().await = Some(user);
    }

    /// Seed a profile row
    pub fn seed_profile(&self, profile: Profile) {
        self.profiles.insert(profile.id, profile);
    }

    /// Seed a sport profile row
    pub fn seed_sport_profile(&self, user_id: Uuid, profile: SportProfile) {
        self.sport_profiles.insert(user_id, profile);
    }

    /// Seed a scheduled workout row
    pub fn seed_scheduled_workout(&self, scheduled: ScheduledWorkout) {
        self.scheduled.insert(scheduled.id, scheduled);
    }

    /// Make every `op` against `table` fail until cleared.
    ///
    /// For function invocation, `table` is the function name.
    pub fn fail_on(&self, table: &str, op: Op) {
        self.failures.insert((table.to_owned(), op));
    }

    /// Clear all injected failures
    pub fn clear_failures(&self) {
        self.failures.clear();
    }

    /// Delay every select by the given duration (stale-response testing)
    pub async fn set_select_delay(&self, delay: Option<Duration>) {
        *self.select_delay.write().await = delay;
    }

    /// Toggle the simulated AI service configuration
    pub fn set_ai_configured(&self, configured: bool) {
        self.ai_configured.store(configured, Ordering::SeqCst);
    }

    /// Persisted Q&A rows, for assertions
    #[must_use]
    pub fn questions(&self) -> Vec<WorkoutQuestionRow> {
        self.questions.iter().map(|r| r.value().clone()).collect()
    }

    /// Delay delivery of an already-captured select result.
    ///
    /// The read happens at call time; only the response is late. This models
    /// a slow network answer carrying data that may be stale on arrival.
    async fn deliver<T>(&self, result: T) -> T {
        let delay = *self.select_delay.read().await;
        if let Some(delay) = delay {
            sleep(delay).await;
        }
        result
    }

    fn check(&self, table: &str, op: Op) -> AppResult<()> {
        if self.failures.contains(&(table.to_owned(), op)) {
            return Err(
                AppError::gateway(format!("injected failure: {table}"))
                    .with_resource_id(table.to_owned()),
            );
        }
        Ok(())
    }

    async fn handle_ask_workout_question(&self, body: &Value) -> AppResult<Value> {
        let Some(user) = self.current_user.read().await.clone() else {
            return Err(AppError::auth_required());
        };
        if !self.ai_configured.load(Ordering::SeqCst) {
            return Err(AppError::external_service(
                functions::ASK_WORKOUT_QUESTION,
                "AI service not configured",
            ));
        }

        let question = body
            .get("question")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();
        let sport = body
            .get("sport")
            .and_then(Value::as_str)
            .map(ToOwned::to_owned);
        let workout_id = body
            .get("workoutId")
            .and_then(Value::as_str)
            .and_then(|s| Uuid::parse_str(s).ok());

        let answer = format!(
            "Coaching answer ({}): {}",
            sport.as_deref().unwrap_or("general"),
            question
        );

        // Persisting the Q&A row is best-effort; the caller still gets
        // the answer when it fails.
        if self.check(tables::WORKOUT_QUESTIONS, Op::Insert).is_ok() {
            self.questions.insert(
                Uuid::new_v4(),
                WorkoutQuestionRow {
                    user_id: user.id,
                    workout_id,
                    question,
                    answer: answer.clone(),
                    sport,
                },
            );
        } else {
            warn!("failed to persist workout question");
        }

        Ok(json!({ "answer": answer }))
    }

    async fn handle_send_feedback(&self, body: &Value) -> AppResult<Value> {
        let feedback = body
            .get("feedback")
            .and_then(Value::as_str)
            .unwrap_or_default();
        if feedback.trim().is_empty() {
            return Err(AppError::internal("Feedback is required"));
        }
        Ok(json!({ "id": Uuid::new_v4() }))
    }
}

#[async_trait]
impl DataGateway for MemoryGateway {
    async fn current_user(&self) -> AppResult<Option<AuthUser>> {
        Ok(self.current_user.read().await.clone())
    }

    async fn sign_out(&self) -> AppResult<()> {
        *self.current_user.write().await = None;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        self.check(tables::PROFILES, Op::Select)?;
        let row = self.profiles.get(&user_id).map(|r| r.value().clone());
        Ok(self.deliver(row).await)
    }

    async fn upsert_profile(&self, profile: &Profile) -> AppResult<()> {
        self.check(tables::PROFILES, Op::Upsert)?;
        self.profiles.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<()> {
        self.check(tables::PROFILES, Op::Update)?;
        if let Some(mut row) = self.profiles.get_mut(&user_id) {
            update.apply_to(row.value_mut());
        }
        Ok(())
    }

    async fn get_sport_profile(&self, user_id: Uuid) -> AppResult<Option<SportProfile>> {
        self.check(tables::SPORT_PROFILES, Op::Select)?;
        let row = self.sport_profiles.get(&user_id).map(|r| r.value().clone());
        Ok(self.deliver(row).await)
    }

    async fn upsert_sport_profile(&self, user_id: Uuid, profile: &SportProfile) -> AppResult<()> {
        self.check(tables::SPORT_PROFILES, Op::Upsert)?;
        self.sport_profiles.insert(user_id, profile.clone());
        Ok(())
    }

    async fn delete_sport_profile(&self, user_id: Uuid) -> AppResult<()> {
        self.check(tables::SPORT_PROFILES, Op::Delete)?;
        self.sport_profiles.remove(&user_id);
        Ok(())
    }

    async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        self.check(tables::GOALS, Op::Select)?;
        let mut goals: Vec<Goal> = self
            .goals
            .iter()
            .filter(|r| r.value().user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        goals.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(self.deliver(goals).await)
    }

    async fn create_goal(&self, user_id: Uuid, goal: &NewGoal) -> AppResult<Goal> {
        self.check(tables::GOALS, Op::Insert)?;
        let now = Utc::now();
        let row = Goal {
            id: Uuid::new_v4(),
            user_id,
            name: goal.name.clone(),
            description: goal.description.clone(),
            category: goal.category.clone(),
            current_value: goal.current_value,
            target_value: goal.target_value,
            unit: goal.unit.clone(),
            target_date: goal.target_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.goals.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        update: &GoalUpdate,
    ) -> AppResult<()> {
        self.check(tables::GOALS, Op::Update)?;
        if let Some(mut row) = self.goals.get_mut(&goal_id) {
            if row.value().user_id == user_id {
                update.apply_to(row.value_mut());
            }
        }
        Ok(())
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<()> {
        self.check(tables::GOALS, Op::Delete)?;
        self.goals
            .remove_if(&goal_id, |_, row| row.user_id == user_id);
        Ok(())
    }

    async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        self.check(tables::WORKOUTS, Op::Select)?;
        let mut workouts: Vec<Workout> = self
            .workouts
            .iter()
            .filter(|r| r.value().user_id == user_id)
            .map(|r| r.value().clone())
            .collect();
        workouts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(self.deliver(workouts).await)
    }

    async fn create_workout(&self, user_id: Uuid, workout: &NewWorkout) -> AppResult<Workout> {
        self.check(tables::WORKOUTS, Op::Insert)?;
        let row = Workout {
            id: Uuid::new_v4(),
            user_id,
            title: workout.title.clone(),
            description: workout.description.clone(),
            sport: workout.sport.clone(),
            duration: workout.duration,
            workout_type: workout.workout_type.clone(),
            exercises: workout.exercises.clone(),
            completed: false,
            created_at: Utc::now(),
        };
        self.workouts.insert(row.id, row.clone());
        Ok(row)
    }

    async fn list_scheduled_workouts(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        self.check(tables::SCHEDULED_WORKOUTS, Op::Select)?;
        let mut rows: Vec<ScheduledWorkout> = self
            .scheduled
            .iter()
            .filter(|r| {
                let row = r.value();
                row.user_id == user_id && row.scheduled_date >= from && row.scheduled_date <= to
            })
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by_key(|r| r.scheduled_date);
        Ok(self.deliver(rows).await)
    }

    async fn set_scheduled_completion(
        &self,
        user_id: Uuid,
        scheduled_id: Uuid,
        completed: bool,
    ) -> AppResult<()> {
        self.check(tables::SCHEDULED_WORKOUTS, Op::Update)?;
        if let Some(mut row) = self.scheduled.get_mut(&scheduled_id) {
            if row.value().user_id == user_id {
                row.value_mut().completed = completed;
                row.value_mut().updated_at = Utc::now();
            }
        }
        Ok(())
    }

    async fn get_health_snapshot(&self, user_id: Uuid) -> AppResult<Option<HealthSnapshot>> {
        self.check(tables::HEALTH_SNAPSHOTS, Op::Select)?;
        let row = self.snapshots.get(&user_id).map(|r| r.value().clone());
        Ok(self.deliver(row).await)
    }

    async fn upsert_health_snapshot(
        &self,
        user_id: Uuid,
        snapshot: &HealthSnapshot,
    ) -> AppResult<()> {
        self.check(tables::HEALTH_SNAPSHOTS, Op::Upsert)?;
        // Conflict key is the user id only: last snapshot wins
        self.snapshots.insert(user_id, snapshot.clone());
        Ok(())
    }

    async fn invoke_function(&self, name: &str, body: Value) -> AppResult<Value> {
        self.check(name, Op::Invoke)?;
        match name {
            functions::ASK_WORKOUT_QUESTION => self.handle_ask_workout_question(&body).await,
            functions::SEND_FEEDBACK => self.handle_send_feedback(&body).await,
            other => Err(AppError::not_found(format!("function {other}"))),
        }
    }
}
