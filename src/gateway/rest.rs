// ABOUTME: REST backend for the data gateway speaking Supabase conventions
// ABOUTME: PostgREST table operations, functions invocation, and the auth user endpoint
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! REST gateway backend
//!
//! Speaks the hosted backend's three surfaces:
//!
//! - `/rest/v1/<table>`: PostgREST reads and writes. Filters ride in the
//!   query string (`user_id=eq.<id>`), upserts declare their conflict key via
//!   `on_conflict` plus a `Prefer: resolution=merge-duplicates` header, and
//!   the "no rows" condition (PostgREST code `PGRST116`) maps to `Ok(None)`.
//! - `/functions/v1/<name>`: serverless function invocation.
//! - `/auth/v1/user`: the session's identity.
//!
//! No explicit timeout is applied to outbound calls; failure is detected only
//! via the call erroring.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::constants::{conflict_keys, tables};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{
    AuthUser, Exercise, Goal, GoalUpdate, HealthSnapshot, NewGoal, NewWorkout, Profile,
    ProfileUpdate, ScheduledWorkout, SportProfile, Workout,
};

use super::DataGateway;

/// PostgREST error code for "no rows returned by a single-object request"
const NO_ROWS_CODE: &str = "PGRST116";

/// Upsert preference: merge on the declared conflict key, skip the echo
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

/// REST-backed gateway against a Supabase-compatible backend
pub struct RestGateway {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: RwLock<Option<String>>,
}

impl RestGateway {
    /// Create a gateway for the given backend
    #[must_use]
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            anon_key: anon_key.into(),
            access_token: RwLock::new(None),
        }
    }

    /// Create a gateway from loaded configuration
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.gateway_url.trim_end_matches('/').to_owned(),
            anon_key: config.anon_key.clone(),
            access_token: RwLock::new(config.access_token.clone()),
        }
    }

    /// Install the bearer token of a signed-in session
    pub async fn set_access_token(&self, token: Option<String>) {
        *self.access_token.write().await = token;
    }

    async fn bearer(&self) -> String {
        self.access_token
            .read()
            .await
            .clone()
            .unwrap_or_else(|| self.anon_key.clone())
    }

    async fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(self.bearer().await)
    }

    async fn table_request(&self, method: Method, table: &str) -> RequestBuilder {
        self.request(method, &format!("rest/v1/{table}")).await
    }

    /// Fetch zero or one row as a single object; `Ok(None)` when absent
    async fn select_optional<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> AppResult<Option<T>> {
        let response = self
            .table_request(Method::GET, table)
            .await
            .query(query)
            .header("Accept", "application/vnd.pgrst.object+json")
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("select from {table} failed")).with_source(e))?;

        if response.status().is_success() {
            let row = response
                .json::<T>()
                .await
                .map_err(|e| AppError::serialization(e.to_string()))?;
            return Ok(Some(row));
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if let Ok(error) = serde_json::from_str::<PostgrestError>(&body) {
            if error.code.as_deref() == Some(NO_ROWS_CODE) {
                return Ok(None);
            }
        }
        Err(table_error(table, status, &body))
    }

    /// Fetch all matching rows
    async fn select_rows<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> AppResult<Vec<T>> {
        let response = self
            .table_request(Method::GET, table)
            .await
            .query(query)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("select from {table} failed")).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(table_error(table, status, &body));
        }
        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::serialization(e.to_string()))
    }

    /// Insert one row and return the stored representation
    async fn insert_returning<T: DeserializeOwned>(
        &self,
        table: &str,
        body: &Value,
    ) -> AppResult<T> {
        let response = self
            .table_request(Method::POST, table)
            .await
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("insert into {table} failed")).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(table_error(table, status, &body));
        }
        let mut rows = response
            .json::<Vec<T>>()
            .await
            .map_err(|e| AppError::serialization(e.to_string()))?;
        rows.pop()
            .ok_or_else(|| AppError::gateway(format!("insert into {table} returned no row")))
    }

    /// Fire a write (upsert/update/delete) and discard the response body
    async fn write(
        &self,
        method: Method,
        table: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
        prefer: Option<&str>,
    ) -> AppResult<()> {
        let mut request = self.table_request(method, table).await.query(query);
        if let Some(prefer) = prefer {
            request = request.header("Prefer", prefer);
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request
            .send()
            .await
            .map_err(|e| AppError::gateway(format!("write to {table} failed")).with_source(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(table_error(table, status, &body));
        }
        Ok(())
    }
}

fn table_error(table: &str, status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<PostgrestError>(body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.chars().take(200).collect());
    AppError::gateway(format!("{table}: {status}: {message}")).with_resource_id(table.to_owned())
}

fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{value}")
}

/// PostgREST error body
#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

/// Error body the serverless functions return
#[derive(Debug, Deserialize)]
struct FunctionErrorBody {
    error: Option<String>,
}

// ============================================================================
// Wire rows
// ============================================================================
// The remote store's rows carry columns the domain models do not (ids,
// timestamps, nullable columns); these types absorb the difference.

#[derive(Debug, Deserialize)]
struct ProfileRow {
    id: Uuid,
    email: Option<String>,
    full_name: Option<String>,
    username: Option<String>,
    avatar_url: Option<String>,
    onboarding_completed: Option<bool>,
    preferences: Option<Value>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            full_name: row.full_name,
            username: row.username,
            avatar_url: row.avatar_url,
            onboarding_completed: row.onboarding_completed.unwrap_or(false),
            preferences: row.preferences.filter(|p| !p.is_null()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SportProfileRow {
    primary_sport: String,
    experience_level: String,
    competitive_level: String,
    training_frequency: u32,
    session_duration: u32,
    current_goals: Option<String>,
}

impl From<SportProfileRow> for SportProfile {
    fn from(row: SportProfileRow) -> Self {
        Self {
            primary_sport: row.primary_sport,
            experience_level: row.experience_level,
            competitive_level: row.competitive_level,
            training_frequency: row.training_frequency,
            session_duration: row.session_duration,
            current_goals: row.current_goals.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WorkoutRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    description: Option<String>,
    sport: String,
    duration: Option<u32>,
    workout_type: String,
    exercises: Vec<Exercise>,
    completed: Option<bool>,
    created_at: DateTime<Utc>,
}

impl From<WorkoutRow> for Workout {
    fn from(row: WorkoutRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            sport: row.sport,
            duration: row.duration,
            workout_type: row.workout_type,
            exercises: row.exercises,
            completed: row.completed.unwrap_or(false),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ScheduledWorkoutRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    sport: String,
    workout_type: String,
    scheduled_date: NaiveDate,
    session_time_of_day: Option<String>,
    workout_id: Option<Uuid>,
    completed: Option<bool>,
    skipped: Option<bool>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ScheduledWorkoutRow> for ScheduledWorkout {
    fn from(row: ScheduledWorkoutRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            sport: row.sport,
            workout_type: row.workout_type,
            scheduled_date: row.scheduled_date,
            session_time_of_day: row.session_time_of_day,
            workout_id: row.workout_id,
            completed: row.completed.unwrap_or(false),
            skipped: row.skipped.unwrap_or(false),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Health snapshots live in a single JSON column keyed by user
#[derive(Debug, Serialize, Deserialize)]
struct HealthSnapshotRow {
    data: HealthSnapshot,
}

/// Identity payload from `/auth/v1/user`
#[derive(Debug, Deserialize)]
struct AuthUserResponse {
    id: Uuid,
    email: Option<String>,
}

#[async_trait]
impl DataGateway for RestGateway {
    async fn current_user(&self) -> AppResult<Option<AuthUser>> {
        if self.access_token.read().await.is_none() {
            return Ok(None);
        }
        let response = self
            .request(Method::GET, "auth/v1/user")
            .await
            .send()
            .await
            .map_err(|e| AppError::gateway("auth user lookup failed").with_source(e))?;

        match response.status() {
            status if status.is_success() => {
                let user = response
                    .json::<AuthUserResponse>()
                    .await
                    .map_err(|e| AppError::serialization(e.to_string()))?;
                Ok(Some(AuthUser::new(user.id, user.email)))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(table_error("auth/v1/user", status, &body))
            }
        }
    }

    async fn sign_out(&self) -> AppResult<()> {
        if self.access_token.read().await.is_none() {
            return Ok(());
        }
        let response = self
            .request(Method::POST, "auth/v1/logout")
            .await
            .send()
            .await
            .map_err(|e| AppError::gateway("sign out failed").with_source(e))?;

        // An already-expired session is as signed out as it gets
        if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(table_error("auth/v1/logout", status, &body));
        }
        self.set_access_token(None).await;
        Ok(())
    }

    async fn get_profile(&self, user_id: Uuid) -> AppResult<Option<Profile>> {
        let row: Option<ProfileRow> = self
            .select_optional(
                tables::PROFILES,
                &[("select", "*".into()), ("id", eq(user_id))],
            )
            .await?;
        Ok(row.map(Profile::from))
    }

    async fn upsert_profile(&self, profile: &Profile) -> AppResult<()> {
        let body = serde_json::to_value(profile)?;
        self.write(
            Method::POST,
            tables::PROFILES,
            &[("on_conflict", conflict_keys::PROFILES.into())],
            Some(&body),
            Some(UPSERT_PREFER),
        )
        .await
    }

    async fn update_profile(&self, user_id: Uuid, update: &ProfileUpdate) -> AppResult<()> {
        let body = serde_json::to_value(update)?;
        self.write(
            Method::PATCH,
            tables::PROFILES,
            &[("id", eq(user_id))],
            Some(&body),
            Some("return=minimal"),
        )
        .await
    }

    async fn get_sport_profile(&self, user_id: Uuid) -> AppResult<Option<SportProfile>> {
        let row: Option<SportProfileRow> = self
            .select_optional(
                tables::SPORT_PROFILES,
                &[("select", "*".into()), ("user_id", eq(user_id))],
            )
            .await?;
        Ok(row.map(SportProfile::from))
    }

    async fn upsert_sport_profile(&self, user_id: Uuid, profile: &SportProfile) -> AppResult<()> {
        let mut body = serde_json::to_value(profile)?;
        if let Value::Object(map) = &mut body {
            map.insert("user_id".into(), json!(user_id));
        }
        self.write(
            Method::POST,
            tables::SPORT_PROFILES,
            &[("on_conflict", conflict_keys::SPORT_PROFILES.into())],
            Some(&body),
            Some(UPSERT_PREFER),
        )
        .await
    }

    async fn delete_sport_profile(&self, user_id: Uuid) -> AppResult<()> {
        self.write(
            Method::DELETE,
            tables::SPORT_PROFILES,
            &[("user_id", eq(user_id))],
            None,
            None,
        )
        .await
    }

    async fn list_goals(&self, user_id: Uuid) -> AppResult<Vec<Goal>> {
        self.select_rows(
            tables::GOALS,
            &[
                ("select", "*".into()),
                ("user_id", eq(user_id)),
                ("order", "created_at.desc".into()),
            ],
        )
        .await
    }

    async fn create_goal(&self, user_id: Uuid, goal: &NewGoal) -> AppResult<Goal> {
        let mut body = serde_json::to_value(goal)?;
        if let Value::Object(map) = &mut body {
            map.insert("user_id".into(), json!(user_id));
        }
        self.insert_returning(tables::GOALS, &body).await
    }

    async fn update_goal(
        &self,
        user_id: Uuid,
        goal_id: Uuid,
        update: &GoalUpdate,
    ) -> AppResult<()> {
        let body = serde_json::to_value(update)?;
        self.write(
            Method::PATCH,
            tables::GOALS,
            &[("id", eq(goal_id)), ("user_id", eq(user_id))],
            Some(&body),
            Some("return=minimal"),
        )
        .await
    }

    async fn delete_goal(&self, user_id: Uuid, goal_id: Uuid) -> AppResult<()> {
        self.write(
            Method::DELETE,
            tables::GOALS,
            &[("id", eq(goal_id)), ("user_id", eq(user_id))],
            None,
            None,
        )
        .await
    }

    async fn list_workouts(&self, user_id: Uuid) -> AppResult<Vec<Workout>> {
        let rows: Vec<WorkoutRow> = self
            .select_rows(
                tables::WORKOUTS,
                &[
                    ("select", "*".into()),
                    ("user_id", eq(user_id)),
                    ("order", "created_at.desc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Workout::from).collect())
    }

    async fn create_workout(&self, user_id: Uuid, workout: &NewWorkout) -> AppResult<Workout> {
        let mut body = serde_json::to_value(workout)?;
        if let Value::Object(map) = &mut body {
            map.insert("user_id".into(), json!(user_id));
        }
        let row: WorkoutRow = self.insert_returning(tables::WORKOUTS, &body).await?;
        Ok(Workout::from(row))
    }

    async fn list_scheduled_workouts(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        let rows: Vec<ScheduledWorkoutRow> = self
            .select_rows(
                tables::SCHEDULED_WORKOUTS,
                &[
                    ("select", "*".into()),
                    ("user_id", eq(user_id)),
                    ("scheduled_date", format!("gte.{from}")),
                    ("scheduled_date", format!("lte.{to}")),
                    ("order", "scheduled_date.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(ScheduledWorkout::from).collect())
    }

    async fn set_scheduled_completion(
        &self,
        user_id: Uuid,
        scheduled_id: Uuid,
        completed: bool,
    ) -> AppResult<()> {
        self.write(
            Method::PATCH,
            tables::SCHEDULED_WORKOUTS,
            &[("id", eq(scheduled_id)), ("user_id", eq(user_id))],
            Some(&json!({ "completed": completed })),
            Some("return=minimal"),
        )
        .await
    }

    async fn get_health_snapshot(&self, user_id: Uuid) -> AppResult<Option<HealthSnapshot>> {
        let row: Option<HealthSnapshotRow> = self
            .select_optional(
                tables::HEALTH_SNAPSHOTS,
                &[("select", "data".into()), ("user_id", eq(user_id))],
            )
            .await?;
        Ok(row.map(|r| r.data))
    }

    async fn upsert_health_snapshot(
        &self,
        user_id: Uuid,
        snapshot: &HealthSnapshot,
    ) -> AppResult<()> {
        let body = json!({
            "user_id": user_id,
            "data": snapshot,
        });
        self.write(
            Method::POST,
            tables::HEALTH_SNAPSHOTS,
            &[("on_conflict", conflict_keys::HEALTH_SNAPSHOTS.into())],
            Some(&body),
            Some(UPSERT_PREFER),
        )
        .await
    }

    async fn invoke_function(&self, name: &str, body: Value) -> AppResult<Value> {
        debug!(function = name, "invoking serverless function");
        let response = self
            .request(Method::POST, &format!("functions/v1/{name}"))
            .await
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::external_service(name, "function invocation failed").with_source(e)
            })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|e| AppError::serialization(e.to_string()));
        }

        let detail = response
            .json::<FunctionErrorBody>()
            .await
            .ok()
            .and_then(|b| b.error)
            .unwrap_or_else(|| status.to_string());
        warn!(function = name, %status, detail, "function invocation rejected");

        if status == StatusCode::UNAUTHORIZED {
            return Err(AppError::auth_required());
        }
        Err(AppError::external_service(name, detail))
    }
}
