// ABOUTME: Workout store: workout list plus scheduled-workout operations
// ABOUTME: Ranged scheduled queries pass through; the workout list follows the loading pattern
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Workout store
//!
//! The workout list is loaded once per user like every other entity.
//! Scheduled workouts are a ranged query over the calendar, so they pass
//! through to the gateway instead of being held as mount-loaded state.

use chrono::NaiveDate;
use tracing::warn;
use uuid::Uuid;

use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{NewWorkout, ScheduledWorkout, Workout};

use super::loader::Loader;

/// State holder for the user's workouts
pub struct WorkoutStore {
    auth: AuthContext,
    data: DataContext,
    loader: Loader<Vec<Workout>>,
}

impl WorkoutStore {
    /// Create a store; call [`Self::load`] to populate it
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            loader: Loader::new(),
        }
    }

    /// Load all workouts for the current user, newest first
    pub async fn load(&self) {
        let generation = self.loader.begin();

        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.loader.commit(generation, Vec::new()).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "auth lookup failed loading workouts");
                self.loader.settle(generation);
                return;
            }
        };

        match self.data.gateway().list_workouts(user.id).await {
            Ok(workouts) => {
                self.loader.commit(generation, workouts).await;
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "error loading workouts");
                self.loader.settle(generation);
            }
        }
    }

    /// Re-load the workout list
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Create a workout and prepend it to the in-memory list.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the insert fails.
    pub async fn create(&self, workout: NewWorkout) -> AppResult<Workout> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        let created = self.data.gateway().create_workout(user.id, &workout).await?;
        let mirrored = created.clone();
        self.loader
            .mutate(|workouts| workouts.insert(0, mirrored))
            .await;
        Ok(created)
    }

    /// Scheduled workouts within an inclusive date range, ordered by date.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the query fails.
    pub async fn scheduled_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<ScheduledWorkout>> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data
            .gateway()
            .list_scheduled_workouts(user.id, from, to)
            .await
    }

    /// Mark a scheduled workout completed or not.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the update fails.
    pub async fn set_scheduled_completion(
        &self,
        scheduled_id: Uuid,
        completed: bool,
    ) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data
            .gateway()
            .set_scheduled_completion(user.id, scheduled_id, completed)
            .await
    }

    /// Current workout list, empty until loaded
    pub async fn workouts(&self) -> Vec<Workout> {
        self.loader.value_or(Vec::new()).await
    }

    /// Whether a load cycle is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
