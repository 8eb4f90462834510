// ABOUTME: Sport profile store: load/save of the onboarding sport profile
// ABOUTME: Saves replace in-memory state with the exact input, no re-fetch
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Sport profile store
//!
//! Holds the one sport profile row per user. Absence maps to defaults (a
//! fresh profile with schema defaults), read failures leave prior state
//! intact, and a successful save becomes the new source of truth without a
//! round-trip.

use tracing::warn;

use crate::context::{AuthContext, DataContext};
use pulsetrack_core::errors::{AppError, AppResult};
use pulsetrack_core::models::{Sport, SportInfo, SportProfile};

use super::loader::Loader;

/// Display label and icon for a sport code; unknown codes resolve to the
/// fallback pair instead of failing
#[must_use]
pub fn sport_info(code: &str) -> SportInfo {
    Sport::from_code(code).info()
}

/// State holder for the user's sport profile
pub struct SportProfileStore {
    auth: AuthContext,
    data: DataContext,
    loader: Loader<SportProfile>,
}

impl SportProfileStore {
    /// Create a store; call [`Self::load`] to populate it
    #[must_use]
    pub fn new(auth: AuthContext, data: DataContext) -> Self {
        Self {
            auth,
            data,
            loader: Loader::new(),
        }
    }

    /// Load the sport profile for the current user.
    ///
    /// No row yet means defaults, not an error. Read failures are logged and
    /// swallowed, leaving prior state intact.
    pub async fn load(&self) {
        let generation = self.loader.begin();

        let user = match self.auth.current_user().await {
            Ok(Some(user)) => user,
            Ok(None) => {
                self.loader.commit(generation, SportProfile::default()).await;
                return;
            }
            Err(e) => {
                warn!(error = %e, "auth lookup failed loading sport profile");
                self.loader.settle(generation);
                return;
            }
        };

        match self.data.gateway().get_sport_profile(user.id).await {
            Ok(Some(profile)) => {
                self.loader.commit(generation, profile).await;
            }
            Ok(None) => {
                self.loader.commit(generation, SportProfile::default()).await;
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "error loading sport profile");
                self.loader.settle(generation);
            }
        }
    }

    /// Re-load the sport profile
    pub async fn reload(&self) {
        self.load().await;
    }

    /// Save the sport profile (upsert keyed by user id).
    ///
    /// On success the in-memory state becomes exactly `profile`; callers
    /// must treat the write as the new source of truth.
    ///
    /// # Errors
    ///
    /// Returns an error for anonymous sessions or when the upsert fails.
    pub async fn save(&self, profile: SportProfile) -> AppResult<()> {
        let user = self
            .auth
            .current_user()
            .await?
            .ok_or_else(AppError::auth_required)?;

        self.data
            .gateway()
            .upsert_sport_profile(user.id, &profile)
            .await?;
        self.loader.force(profile).await;
        Ok(())
    }

    /// Current sport profile, defaults until loaded
    pub async fn profile(&self) -> SportProfile {
        self.loader.value_or(SportProfile::default()).await
    }

    /// Completeness predicate: both primary sport and experience level set
    pub async fn has_profile(&self) -> bool {
        self.profile().await.is_complete()
    }

    /// Whether a load cycle is in flight
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loader.is_loading()
    }
}
