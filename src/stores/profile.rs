// ABOUTME: Display profile store: load and partial update of the profile row
// ABOUTME: Successful updates are applied to the in-memory copy without a re-fetch
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Display profile store
//!
//! The profile row is one-to-one with the user and never deleted. Absence is
//! a valid state (a brand-new account whose row has not materialized yet).

use tracing::warn;

use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{Profile, ProfileUpdate};

use super::loader::Loader;

/// State holder for the user's display profile
pub struct ProfileStore {
    auth: AuthContext,
    data: DataContext,
    loader: Loader<Option<Profile>>,
}

impl ProfileStore {
    /// Create a store; call [`Self::load`] to populate it
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            loader: Loader::new(),
        }
    }

    /// Load the profile for the current user
    pub async fn load(&self) {
        let generation = self.loader.begin();

        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.loader.commit(generation, None).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "auth lookup failed loading profile");
                self.loader.settle(generation);
                return;
            }
        };

        match self.data.gateway().get_profile(user.id).await {
            Ok(profile) => {
                self.loader.commit(generation, profile).await;
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "error loading profile");
                self.loader.settle(generation);
            }
        }
    }

    /// Re-load the profile
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Partially update the profile row.
    ///
    /// User-initiated mutation: failures surface to the caller. On success
    /// the update is applied to the in-memory copy without a re-fetch.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the update fails.
    pub async fn update(&self, update: ProfileUpdate) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data.gateway().update_profile(user.id, &update).await?;
        self.loader
            .mutate(|slot| {
                if let Some(profile) = slot.as_mut() {
                    update.apply_to(profile);
                }
            })
            .await;
        Ok(())
    }

    /// Current profile, `None` until loaded or when absent
    pub async fn profile(&self) -> Option<Profile> {
        self.loader.value_or(None).await
    }

    /// Whether a load cycle is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
