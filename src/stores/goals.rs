// ABOUTME: Goals store: list and mutate user goals with optimistic local updates
// ABOUTME: List failures are swallowed; mutations surface their errors
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Goals store
//!
//! Holds the user's goal list newest-first. Mutations write through the
//! gateway and mirror the change into the in-memory list on success.

use tracing::warn;
use uuid::Uuid;

use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{Goal, GoalUpdate, NewGoal};

use super::loader::Loader;

/// State holder for the user's goals
pub struct GoalStore {
    auth: AuthContext,
    data: DataContext,
    loader: Loader<Vec<Goal>>,
}

impl GoalStore {
    /// Create a store; call [`Self::load`] to populate it
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            loader: Loader::new(),
        }
    }

    /// Load all goals for the current user, newest first
    pub async fn load(&self) {
        let generation = self.loader.begin();

        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.loader.commit(generation, Vec::new()).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "auth lookup failed loading goals");
                self.loader.settle(generation);
                return;
            }
        };

        match self.data.gateway().list_goals(user.id).await {
            Ok(goals) => {
                self.loader.commit(generation, goals).await;
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "error loading goals");
                self.loader.settle(generation);
            }
        }
    }

    /// Re-load the goal list
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Create a goal and prepend it to the in-memory list.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the insert fails.
    pub async fn create(&self, goal: NewGoal) -> AppResult<Goal> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        let created = self.data.gateway().create_goal(user.id, &goal).await?;
        let mirrored = created.clone();
        self.loader
            .mutate(|goals| goals.insert(0, mirrored))
            .await;
        Ok(created)
    }

    /// Update a goal's current value.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the update fails.
    pub async fn set_progress(&self, goal_id: Uuid, current_value: f64) -> AppResult<()> {
        self.update(goal_id, GoalUpdate::progress(current_value))
            .await
    }

    /// Toggle a goal's completion flag.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the update fails.
    pub async fn set_completed(&self, goal_id: Uuid, completed: bool) -> AppResult<()> {
        self.update(
            goal_id,
            GoalUpdate {
                completed: Some(completed),
                ..GoalUpdate::default()
            },
        )
        .await
    }

    /// Apply a partial update to one goal.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the update fails.
    pub async fn update(&self, goal_id: Uuid, update: GoalUpdate) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data
            .gateway()
            .update_goal(user.id, goal_id, &update)
            .await?;
        self.loader
            .mutate(|goals| {
                if let Some(goal) = goals.iter_mut().find(|g| g.id == goal_id) {
                    update.apply_to(goal);
                }
            })
            .await;
        Ok(())
    }

    /// Delete a goal.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the delete fails.
    pub async fn delete(&self, goal_id: Uuid) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data.gateway().delete_goal(user.id, goal_id).await?;
        self.loader
            .mutate(|goals| goals.retain(|g| g.id != goal_id))
            .await;
        Ok(())
    }

    /// Current goal list, empty until loaded
    pub async fn goals(&self) -> Vec<Goal> {
        self.loader.value_or(Vec::new()).await
    }

    /// Whether a load cycle is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
